use crate::breakpoints::Breakpoint;
use crate::events::Measurement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Почему сменился вьюпорт
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Первичная классификация при загрузке
    Initial,
    Grew,
    Shrank,
}

impl Direction {
    /// Числовое значение `resized`: 0 при загрузке, 1 при росте, -1 при сжатии
    pub fn resized(self) -> i8 {
        match self {
            Direction::Initial => 0,
            Direction::Grew => 1,
            Direction::Shrank => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Initial => "initial",
            Direction::Grew => "grew",
            Direction::Shrank => "shrank",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Переход между брейкпоинтами
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub viewport: String,
    pub max_width: Option<u32>,
    /// Ширина окна в момент входа в брейкпоинт
    pub width: u32,
    pub direction: Direction,
    pub previous: Option<String>,
    pub timestamp: std::time::Instant,
}

impl TransitionEvent {
    pub fn new(breakpoint: &Breakpoint, width: u32, direction: Direction, previous: Option<String>) -> Self {
        Self {
            viewport: breakpoint.name.clone(),
            max_width: breakpoint.max_width,
            width,
            direction,
            previous,
            timestamp: std::time::Instant::now(),
        }
    }
}

impl fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.previous {
            Some(prev) => write!(f, "{} -> {} ({}, {}px)", prev, self.viewport, self.direction, self.width),
            None => write!(f, "{} ({}, {}px)", self.viewport, self.direction, self.width),
        }
    }
}

/// Последние вычисленные данные о вьюпорте, обновляются на каждом замере
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportData {
    pub viewport: String,
    pub viewport_width: Option<u32>,
    pub width: u32,
    pub height: u32,
}

impl ViewportData {
    pub fn new(breakpoint: &Breakpoint, measurement: Measurement) -> Self {
        Self {
            viewport: breakpoint.name.clone(),
            viewport_width: breakpoint.max_width,
            width: measurement.width,
            height: measurement.height,
        }
    }
}

impl fmt::Display for ViewportData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let viewport_width = self
            .viewport_width
            .map(|w| w.to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "viewport={} viewport_width={} width={} height={}",
            self.viewport, viewport_width, self.width, self.height
        )
    }
}
