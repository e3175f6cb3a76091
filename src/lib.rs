pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::SiteConfig};

pub use core::browser::Browser;
pub use core::engine::SiteEngine;
pub use core::pipeline::StaticSitePipeline;
pub use core::render::{SiteMeta, TagColor, Theme};
pub use domain::model::{
    BrowseEvent, Catalog, FilterState, PageRegions, Post, Referral, RegionUpdate, RenderedSite,
    SourceData,
};
pub use utils::error::{Result, SiteError};
