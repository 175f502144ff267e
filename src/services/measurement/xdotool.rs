use crate::error::{Result, ViewportError};
use crate::events::Measurement;
use std::process::Command;
use tracing::debug;

use super::r#trait::MeasurementSource;

pub struct XdotoolSource;

impl XdotoolSource {
    pub fn new() -> Self {
        Self
    }

    fn geometry_output() -> Result<String> {
        let output = Command::new("xdotool")
            .args(["getactivewindow", "getwindowgeometry", "--shell"])
            .output()
            .map_err(|e| {
                debug!("xdotool не найден или не работает: {}", e);
                ViewportError::Measurement(format!("xdotool не найден: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("xdotool вернул ошибку: {}", stderr);
            return Err(ViewportError::Measurement(format!("xdotool вернул ошибку: {}", stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Разбор вывода `getwindowgeometry --shell` (строки вида `WIDTH=1920`)
pub(crate) fn parse_shell_geometry(output: &str) -> Result<Measurement> {
    let mut width = None;
    let mut height = None;

    for line in output.lines() {
        match line.trim().split_once('=') {
            Some(("WIDTH", value)) => width = value.trim().parse::<u32>().ok(),
            Some(("HEIGHT", value)) => height = value.trim().parse::<u32>().ok(),
            _ => {}
        }
    }

    match (width, height) {
        (Some(width), Some(height)) => Ok(Measurement::new(width, height)),
        _ => Err(ViewportError::Measurement(
            "в выводе xdotool нет WIDTH/HEIGHT".to_string(),
        )),
    }
}

#[async_trait::async_trait]
impl MeasurementSource for XdotoolSource {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    async fn test(&self) -> Result<()> {
        parse_shell_geometry(&Self::geometry_output()?).map(|_| ())
    }

    async fn measure(&self) -> Result<Measurement> {
        let measurement = parse_shell_geometry(&Self::geometry_output()?)?;
        debug!("xdotool получил размер окна: {}", measurement);
        Ok(measurement)
    }
}
