use serde::{Deserialize, Serialize};
use std::fmt;

/// Размеры окна в пикселях на момент замера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Measurement {
    pub width: u32,
    pub height: u32,
}

impl Measurement {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Изменилась ли геометрия относительно предыдущего замера
    pub fn differs_from(&self, other: &Measurement) -> bool {
        self.width != other.width || self.height != other.height
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Событие окна, порождающее замер
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEvent {
    pub measurement: Measurement,
    pub timestamp: std::time::Instant,
    pub event_type: WindowEventType,
}

impl WindowEvent {
    pub fn new(measurement: Measurement, event_type: WindowEventType) -> Self {
        Self {
            measurement,
            timestamp: std::time::Instant::now(),
            event_type,
        }
    }

    pub fn loaded(measurement: Measurement) -> Self {
        Self::new(measurement, WindowEventType::Load)
    }

    pub fn resized(measurement: Measurement) -> Self {
        Self::new(measurement, WindowEventType::Resize)
    }
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} ({}ms ago)",
            self.event_type,
            self.measurement,
            self.timestamp.elapsed().as_millis()
        )
    }
}

/// Тип события окна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowEventType {
    /// Первый замер после запуска
    Load,
    Resize,
}
