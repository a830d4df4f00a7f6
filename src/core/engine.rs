use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct GenerationEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> GenerationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting specification generation");
        self.monitor.log_stats("Start");

        let input = self.pipeline.extract().await?;
        tracing::info!(
            "Collected template ({} filled fields) and {} documents",
            input.template.filled_count(),
            input.documents.len()
        );
        self.monitor.log_stats("Extract");

        let document = self.pipeline.transform(&input).await?;
        tracing::info!(
            "Composed '{}' ({} bytes of markdown)",
            document.title,
            document.markdown.len()
        );
        self.monitor.log_stats("Compose");

        let output_path = self.pipeline.load(&input, document).await?;
        tracing::info!("Specification saved to {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
