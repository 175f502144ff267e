use crate::config::Config;
use crate::error::{Result, ViewportError};
use crate::events::{Measurement, WindowEvent};
use crate::services::measurement::MeasurementSource;
use crate::services::registry::ViewportRegistry;
use crate::trace_if_enabled;
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

/// Опрашивает источник замеров и превращает изменения размера окна в события.
///
/// Первый успешный замер считается загрузкой, последующие передаются дальше
/// только если геометрия окна изменилась.
pub struct ResizeWatcher {
    config: Arc<Config>,
    source: Box<dyn MeasurementSource>,
    registry: Arc<ViewportRegistry>,
    last: Option<Measurement>,
    failures: u32,
}

impl ResizeWatcher {
    pub fn new(config: Arc<Config>, source: Box<dyn MeasurementSource>, registry: Arc<ViewportRegistry>) -> Self {
        info!("Инициализация ResizeWatcher (источник: {})", source.name());
        Self {
            config,
            source,
            registry,
            last: None,
            failures: 0,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut interval = interval(Duration::from_millis(self.config.window.polling_interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            "ResizeWatcher запущен, интервал опроса {}мс",
            self.config.window.polling_interval_ms
        );

        loop {
            interval.tick().await;
            self.poll_once().await?;
        }
    }

    /// Один замер; возвращает событие, если оно было передано элементам
    pub async fn poll_once(&mut self) -> Result<Option<WindowEvent>> {
        let measurement = match self.source.measure().await {
            Ok(measurement) => {
                self.failures = 0;
                measurement
            }
            Err(e) => {
                self.failures += 1;
                warn!(
                    "Не удалось измерить окно ({}/{}): {}",
                    self.failures, self.config.window.max_measurement_failures, e
                );
                if self.failures >= self.config.window.max_measurement_failures {
                    let reason = match e {
                        ViewportError::Measurement(msg) => msg,
                        other => other.to_string(),
                    };
                    return Err(ViewportError::Measurement(format!(
                        "{} неудачных замеров подряд через {}: {}",
                        self.failures,
                        self.source.name(),
                        reason
                    )));
                }
                return Ok(None);
            }
        };

        let event = match self.last {
            None => WindowEvent::loaded(measurement),
            Some(prev) if measurement.differs_from(&prev) => WindowEvent::resized(measurement),
            Some(_) => {
                trace_if_enabled!("Размер окна не изменился: {}", measurement);
                return Ok(None);
            }
        };

        self.last = Some(measurement);
        self.registry.dispatch(&event)?;
        Ok(Some(event))
    }

    #[allow(dead_code)]
    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        info!("ResizeWatcher завершает работу");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowEventType;
    use crate::services::measurement::DryRunSource;

    fn watcher(widths: Vec<u32>) -> (ResizeWatcher, Arc<ViewportRegistry>) {
        let config = Arc::new(Config::default());
        let registry = Arc::new(ViewportRegistry::from_config(&config).unwrap());
        let source = Box::new(DryRunSource::new(widths).unwrap());
        (ResizeWatcher::new(config, source, registry.clone()), registry)
    }

    #[tokio::test]
    async fn test_load_then_resize_events() {
        let (mut w, registry) = watcher(vec![900, 900, 500]);

        let load = w.poll_once().await.unwrap().unwrap();
        assert_eq!(load.event_type, WindowEventType::Load);
        assert_eq!(registry.classes("body").unwrap(), vec!["viewport-desktop".to_string()]);

        assert!(w.poll_once().await.unwrap().is_none());

        let resize = w.poll_once().await.unwrap().unwrap();
        assert_eq!(resize.event_type, WindowEventType::Resize);
        assert_eq!(resize.measurement.width, 500);
        assert_eq!(registry.classes("body").unwrap(), vec!["viewport-tablet-portrait".to_string()]);
        assert_eq!(w.last_measurement(), Some(Measurement::new(500, 768)));
    }

    struct BrokenSource;

    #[async_trait::async_trait]
    impl MeasurementSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn test(&self) -> Result<()> {
            Ok(())
        }

        async fn measure(&self) -> Result<Measurement> {
            Err(ViewportError::Measurement("нет дисплея".to_string()))
        }
    }

    #[tokio::test]
    async fn test_consecutive_failures_surface_error() {
        let mut config = Config::default();
        config.window.max_measurement_failures = 2;
        let config = Arc::new(config);
        let registry = Arc::new(ViewportRegistry::from_config(&config).unwrap());
        let mut w = ResizeWatcher::new(config, Box::new(BrokenSource), registry);

        assert!(w.poll_once().await.unwrap().is_none());
        let err = w.poll_once().await.unwrap_err();
        assert!(matches!(err, ViewportError::Measurement(_)));

        let message = err.to_string();
        assert_eq!(message.matches("Не удалось измерить окно").count(), 1);
        assert!(message.contains("через broken: нет дисплея"));
    }
}
