use crate::config::Config;
use crate::error::{Result, ViewportError};
use crate::events::Measurement;
use tracing::{debug, info};

use super::dry_run::DryRunSource;
use super::sway::SwaySource;
use super::xdotool::XdotoolSource;

/// Trait for sources that can report the current window size
#[async_trait::async_trait]
pub trait MeasurementSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Check that the source works in the current session
    async fn test(&self) -> Result<()>;

    /// Measure the tracked window
    async fn measure(&self) -> Result<Measurement>;
}

/// Factory function to create a measurement source based on the dry_run flag and detection mode
pub async fn create_measurement_source(config: &Config, dry_run: bool) -> Result<Box<dyn MeasurementSource>> {
    if dry_run {
        return Ok(Box::new(DryRunSource::new(config.window.dry_run_widths.clone())?));
    }

    match config.window.detection_mode.as_str() {
        "xdotool" => Ok(Box::new(XdotoolSource::new())),
        "sway" => Ok(Box::new(SwaySource::new())),
        "auto" => detect_working_source().await,
        other => Err(ViewportError::Internal(format!("Неизвестный режим детекции: {}", other))),
    }
}

async fn detect_working_source() -> Result<Box<dyn MeasurementSource>> {
    info!("Определяем рабочий способ замера окна...");

    let candidates: Vec<Box<dyn MeasurementSource>> = vec![Box::new(XdotoolSource::new()), Box::new(SwaySource::new())];

    for source in candidates {
        match source.test().await {
            Ok(()) => {
                info!("Используем {}", source.name());
                return Ok(source);
            }
            Err(e) => debug!("{} не подходит: {}", source.name(), e),
        }
    }

    Err(ViewportError::ServiceUnavailable(
        "ни один способ замера окна не работает".to_string(),
    ))
}
