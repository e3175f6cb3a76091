use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives the three pipeline stages: extract the data sources, render the
/// page, publish the document.
pub struct SiteEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SiteEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting site build");

        tracing::info!("Loading data sources...");
        let data = self.pipeline.extract().await?;

        tracing::info!("Rendering page...");
        let site = self.pipeline.render(data).await?;

        tracing::info!("Publishing document...");
        let output_path = self.pipeline.publish(site).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
