use crate::core::render::{SiteMeta, TagColor, Theme};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_color, validate_non_empty_string, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Site configuration loaded from a TOML file. Everything beyond the site
/// name is optional and falls back to the CLI defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteSection,
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub theme: ThemeSection,
    #[serde(default)]
    pub browse: BrowseSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Tag pill colors keyed by tag label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeSection {
    #[serde(default)]
    pub tags: HashMap<String, TagColorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagColorConfig {
    pub background: String,
    pub text: String,
}

/// Filter state applied before the page is rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseSection {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub search: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_output_path() -> String {
    "./site".to_string()
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values; unknown
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("site.name", &self.site.name)?;
        validate_path("data.dir", &self.data.dir)?;
        validate_path("output.path", &self.output.path)?;

        for (tag, colors) in &self.theme.tags {
            validate_color(&format!("theme.tags.{}.background", tag), &colors.background)?;
            validate_color(&format!("theme.tags.{}.text", tag), &colors.text)?;
        }

        Ok(())
    }

    /// Presentation settings for the renderer's document shell.
    pub fn site_meta(&self) -> SiteMeta {
        let tag_colors = self
            .theme
            .tags
            .iter()
            .map(|(tag, colors)| {
                (
                    tag.clone(),
                    TagColor {
                        background: colors.background.clone(),
                        text: colors.text.clone(),
                    },
                )
            })
            .collect();

        SiteMeta {
            name: self.site.name.clone(),
            tagline: self.site.tagline.clone(),
            theme: Theme::new(tag_colors),
        }
    }
}

impl ConfigProvider for SiteConfig {
    fn data_dir(&self) -> &str {
        &self.data.dir
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn initial_tags(&self) -> &[String] {
        &self.browse.tags
    }

    fn initial_search(&self) -> &str {
        &self.browse.search
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_site_config() {
        let toml_content = r##"
[site]
name = "Alpha Board"
tagline = "DeFi reviews and referrals"

[data]
dir = "./content"

[output]
path = "./public"

[theme.tags."DEX"]
background = "#d5f4e6"
text = "#138d75"
"##;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.site.name, "Alpha Board");
        assert_eq!(config.data_dir(), "./content");
        assert_eq!(config.output_path(), "./public");
        assert_eq!(config.theme.tags["DEX"].text, "#138d75");
    }

    #[test]
    fn test_defaults_for_omitted_sections() {
        let config = SiteConfig::from_toml_str("[site]\nname = \"Minimal\"\n").unwrap();

        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.output_path(), "./site");
        assert!(config.theme.tags.is_empty());
        assert!(config.initial_tags().is_empty());
        assert_eq!(config.initial_search(), "");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_SITE_NAME", "Env Board");

        let toml_content = r#"
[site]
name = "${TEST_SITE_NAME}"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.site.name, "Env Board");

        std::env::remove_var("TEST_SITE_NAME");
    }

    #[test]
    fn test_config_validation_rejects_bad_color() {
        let toml_content = r##"
[site]
name = "Board"

[theme.tags."DEX"]
background = "not-a-color"
text = "#138d75"
"##;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_blank_name() {
        let config = SiteConfig::from_toml_str("[site]\nname = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[site]
name = "File Board"
tagline = "From a file"

[browse]
tags = ["DEX"]
search = "hylo"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.site.name, "File Board");
        assert_eq!(config.initial_tags(), ["DEX".to_string()]);
        assert_eq!(config.initial_search(), "hylo");
    }

    #[test]
    fn test_site_meta_builds_theme() {
        let toml_content = r##"
[site]
name = "Board"
tagline = "tag colors"

[theme.tags."Trading 101"]
background = "#ffe9b3"
text = "#d35400"
"##;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        let meta = config.site_meta();

        assert_eq!(meta.name, "Board");
        let colors = meta.theme.color_for("Trading 101");
        assert_eq!(colors.background, "#ffe9b3");
        assert_eq!(colors.text, "#d35400");

        let fallback = meta.theme.color_for("Unknown");
        assert_eq!(fallback.background, "var(--tag-pill)");
    }
}
