use crate::error::{Result, ViewportError};
use crate::events::Measurement;
use serde::Deserialize;
use std::process::Command;
use tracing::debug;

use super::r#trait::MeasurementSource;

pub struct SwaySource;

impl SwaySource {
    pub fn new() -> Self {
        Self
    }

    fn tree_output() -> Result<String> {
        let output = Command::new("swaymsg")
            .args(["-t", "get_tree"])
            .output()
            .map_err(|e| ViewportError::Measurement(format!("swaymsg не найден: {}", e)))?;

        if !output.status.success() {
            return Err(ViewportError::Measurement("swaymsg вернул ошибку".to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[derive(Debug, Deserialize)]
struct SwayRect {
    width: u32,
    height: u32,
}

/// Узел дерева `swaymsg -t get_tree`; остальные поля не нужны
#[derive(Debug, Deserialize)]
struct SwayNode {
    #[serde(default)]
    focused: bool,
    rect: SwayRect,
    #[serde(default)]
    nodes: Vec<SwayNode>,
    #[serde(default)]
    floating_nodes: Vec<SwayNode>,
}

impl SwayNode {
    fn find_focused(&self) -> Option<&SwayNode> {
        if self.focused {
            return Some(self);
        }
        self.nodes
            .iter()
            .chain(&self.floating_nodes)
            .find_map(SwayNode::find_focused)
    }
}

/// Размер `rect` сфокусированного узла из вывода `swaymsg -t get_tree`
pub(crate) fn parse_focused_rect(tree: &str) -> Result<Measurement> {
    let root: SwayNode = serde_json::from_str(tree)
        .map_err(|e| ViewportError::Measurement(format!("не удалось разобрать дерево Sway: {}", e)))?;

    let focused = root
        .find_focused()
        .ok_or_else(|| ViewportError::Measurement("активное окно в Sway не найдено".to_string()))?;

    Ok(Measurement::new(focused.rect.width, focused.rect.height))
}

#[async_trait::async_trait]
impl MeasurementSource for SwaySource {
    fn name(&self) -> &'static str {
        "sway"
    }

    async fn test(&self) -> Result<()> {
        Self::tree_output().map(|_| ())
    }

    async fn measure(&self) -> Result<Measurement> {
        let measurement = parse_focused_rect(&Self::tree_output()?)?;
        debug!("sway получил размер окна: {}", measurement);
        Ok(measurement)
    }
}
