use crate::core::browser::Browser;
use crate::core::render::{self, SiteMeta};
use crate::core::{BrowseEvent, ConfigProvider, Pipeline, RenderedSite, SourceData, Storage};
use crate::utils::error::{Result, SiteError};

const POSTS_FILE: &str = "posts.json";
const REFERRALS_FILE: &str = "referrals.json";
const OUTPUT_FILE: &str = "index.html";

/// Builds the static page: reads the post and referral collections from
/// storage, applies the configured initial filter events, and writes the
/// assembled document back through storage.
pub struct StaticSitePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    site: SiteMeta,
}

impl<S: Storage, C: ConfigProvider> StaticSitePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            site: SiteMeta::default(),
        }
    }

    pub fn with_site(mut self, site: SiteMeta) -> Self {
        self.site = site;
        self
    }

    /// Read one collection file. An absent or unparseable file yields an
    /// absent collection (the browser degrades); other IO failures abort.
    async fn read_collection(&self, file: &str) -> Result<Option<serde_json::Value>> {
        let path = format!("{}/{}", self.config.data_dir(), file);

        match self.storage.read_file(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::error!("Failed to parse {} as JSON: {}", path, e);
                    Ok(None)
                }
            },
            Err(SiteError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Data file not found: {}", path);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StaticSitePipeline<S, C> {
    async fn extract(&self) -> Result<SourceData> {
        tracing::debug!("Reading data sources from: {}", self.config.data_dir());

        let posts = self.read_collection(POSTS_FILE).await?;
        let referrals = self.read_collection(REFERRALS_FILE).await?;

        Ok(SourceData { posts, referrals })
    }

    async fn render(&self, data: SourceData) -> Result<RenderedSite> {
        let mut browser = Browser::from_sources(&data, self.site.theme.clone());

        if browser.is_degraded() {
            tracing::warn!("Rendering degraded page: a data source is missing");
        } else {
            tracing::info!(
                "Loaded {} posts, {} referrals",
                browser.catalog().posts.len(),
                browser.catalog().referrals.len()
            );

            for tag in self.config.initial_tags() {
                browser.handle(BrowseEvent::TagToggled(tag.clone()));
            }
            let query = self.config.initial_search();
            if !query.is_empty() {
                browser.handle(BrowseEvent::SearchChanged(query.to_string()));
            }
        }

        let regions = browser.render_all();
        let document = render::render_page(&regions, &self.site);
        Ok(RenderedSite { regions, document })
    }

    async fn publish(&self, site: RenderedSite) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), OUTPUT_FILE);

        tracing::debug!(
            "Writing document ({} bytes) to storage",
            site.document.len()
        );
        self.storage
            .write_file(&output_path, site.document.as_bytes())
            .await?;

        Ok(output_path)
    }
}
