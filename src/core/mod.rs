pub mod browser;
pub mod engine;
pub mod filter;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{
    BrowseEvent, Catalog, FilterState, PageRegions, Post, Referral, RegionUpdate, RenderedSite,
    SourceData,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
