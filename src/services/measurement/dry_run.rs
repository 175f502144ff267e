use crate::error::{Result, ViewportError};
use crate::events::Measurement;
use parking_lot::Mutex;
use tracing::info;

use super::r#trait::MeasurementSource;

const DRY_RUN_HEIGHT: u32 = 768;

/// Эмуляция окна: по кругу проигрывает заданные ширины
pub struct DryRunSource {
    widths: Vec<u32>,
    index: Mutex<usize>,
}

impl DryRunSource {
    pub fn new(widths: Vec<u32>) -> Result<Self> {
        if widths.is_empty() {
            return Err(ViewportError::ServiceUnavailable(
                "dry-run: список dry_run_widths пуст".to_string(),
            ));
        }

        info!("Dry-run режим - размер окна эмулируется, ширины: {:?}", widths);
        Ok(Self {
            widths,
            index: Mutex::new(0),
        })
    }
}

#[async_trait::async_trait]
impl MeasurementSource for DryRunSource {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn test(&self) -> Result<()> {
        Ok(())
    }

    async fn measure(&self) -> Result<Measurement> {
        let mut index = self.index.lock();
        let width = self.widths[*index];
        *index = (*index + 1) % self.widths.len();
        Ok(Measurement::new(width, DRY_RUN_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_widths_cycle() {
        let source = DryRunSource::new(vec![900, 500]).unwrap();
        let mut widths = Vec::new();
        for _ in 0..5 {
            widths.push(source.measure().await.unwrap().width);
        }
        assert_eq!(widths, vec![900, 500, 900, 500, 900]);
    }

    #[test]
    fn test_empty_widths_rejected() {
        assert!(matches!(DryRunSource::new(vec![]), Err(ViewportError::ServiceUnavailable(_))));
    }
}
