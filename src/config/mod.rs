pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "postboard")]
#[command(about = "Render a tag-filtered, searchable post board to static HTML")]
pub struct CliConfig {
    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    #[arg(long, default_value = "./site")]
    pub output_path: String,

    #[arg(long, help = "Optional TOML site configuration file")]
    pub config: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Tags to pre-select")]
    pub tags: Vec<String>,

    #[arg(long, default_value = "", help = "Initial search query")]
    pub search: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn initial_tags(&self) -> &[String] {
        &self.tags
    }

    fn initial_search(&self) -> &str {
        &self.search
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
