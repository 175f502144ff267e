use crate::breakpoints::BreakpointTable;
use crate::error::Result;
use crate::events::{Direction, Measurement, TransitionEvent, ViewportData};
use crate::services::sinks::{CallbackSink, ClassToggleSink, ReadyHook};
use crate::services::tracker::{ViewportState, ViewportTracker};
use std::sync::Arc;
use tracing::{error, info};

pub const DEFAULT_CSS_PREFIX: &str = "viewport-";

/// Один отслеживаемый элемент: свой трекер, свой префикс, свои обработчики.
///
/// Экземпляры ничего не разделяют между собой, включая последние
/// вычисленные данные о вьюпорте.
pub struct ViewportClass {
    element: String,
    css_prefix: String,
    tracker: ViewportTracker,
    class_sink: Arc<dyn ClassToggleSink>,
    callback: Option<Box<dyn CallbackSink>>,
    ready_hook: Option<Box<dyn ReadyHook>>,
    data: Option<ViewportData>,
}

impl ViewportClass {
    pub fn new(element: impl Into<String>, table: BreakpointTable, class_sink: Arc<dyn ClassToggleSink>) -> Self {
        Self {
            element: element.into(),
            css_prefix: DEFAULT_CSS_PREFIX.to_string(),
            tracker: ViewportTracker::new(table),
            class_sink,
            callback: None,
            ready_hook: None,
            data: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.css_prefix = prefix.into();
        self
    }

    pub fn with_callback(mut self, callback: Box<dyn CallbackSink>) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn with_ready_hook(mut self, hook: Box<dyn ReadyHook>) -> Self {
        self.ready_hook = Some(hook);
        self
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn css_prefix(&self) -> &str {
        &self.css_prefix
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &ViewportState {
        self.tracker.state()
    }

    /// Данные последнего замера, `None` до первого замера
    pub fn data(&self) -> Option<&ViewportData> {
        self.data.as_ref()
    }

    pub fn handle(&mut self, measurement: Measurement) -> Result<Option<TransitionEvent>> {
        let breakpoint = self.tracker.table().resolve(measurement.width);
        self.data = Some(ViewportData::new(breakpoint, measurement));

        let Some(event) = self.tracker.on_measurement(measurement.width) else {
            return Ok(None);
        };

        info!("Элемент '{}': смена вьюпорта {}", self.element, event);

        self.class_sink
            .swap_class(&self.css_prefix, event.previous.as_deref(), &event.viewport)?;

        if let Some(callback) = &self.callback {
            if let Err(e) = callback.on_viewport_change(event.max_width, &event.viewport, event.direction) {
                error!("Обработчик смены вьюпорта для '{}' завершился с ошибкой: {}", self.element, e);
            }
        }

        if event.direction == Direction::Initial {
            if let (Some(hook), Some(data)) = (&self.ready_hook, &self.data) {
                if let Err(e) = hook.on_ready(&event.viewport, data) {
                    error!("Хук готовности для '{}' завершился с ошибкой: {}", self.element, e);
                }
            }
        }

        Ok(Some(event))
    }
}
