use crate::breakpoints::{default_breakpoints, Breakpoint, BreakpointTable};
use crate::services::viewport_class::DEFAULT_CSS_PREFIX;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub window: WindowConfig,
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// auto | xdotool | sway
    pub detection_mode: String,
    pub polling_interval_ms: u64,
    pub max_measurement_failures: u32,
    /// Ширины, которые проигрывает dry-run источник
    #[serde(default)]
    pub dry_run_widths: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewportConfig {
    pub css_prefix: String,
    pub breakpoints: Vec<Breakpoint>,
}

/// Отслеживаемый элемент; незаданные поля берутся из [`ViewportConfig`]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElementConfig {
    pub name: String,
    #[serde(default)]
    pub css_prefix: Option<String>,
    #[serde(default)]
    pub breakpoints: Option<Vec<Breakpoint>>,
    /// Команда, вызываемая при каждой смене вьюпорта
    #[serde(default)]
    pub on_change: Option<Vec<String>>,
    /// Команда, вызываемая один раз после первичной классификации
    #[serde(default)]
    pub on_ready: Option<Vec<String>>,
}

impl ElementConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css_prefix: None,
            breakpoints: None,
            on_change: None,
            on_ready: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            window: WindowConfig {
                detection_mode: "auto".to_string(),
                polling_interval_ms: 250,
                max_measurement_failures: 5,
                dry_run_widths: vec![1024, 700, 400, 300, 200, 900],
            },
            viewport: ViewportConfig {
                css_prefix: DEFAULT_CSS_PREFIX.to_string(),
                breakpoints: default_breakpoints(),
            },
            elements: vec![ElementConfig::new("body")],
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("VPC_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек замера окна
        match self.window.detection_mode.as_str() {
            "auto" | "xdotool" | "sway" => {}
            _ => anyhow::bail!("Неверный режим детекции окна: {}", self.window.detection_mode),
        }

        if self.window.polling_interval_ms < 50 {
            anyhow::bail!("polling_interval_ms должно быть минимум 50");
        }

        if self.window.max_measurement_failures == 0 {
            anyhow::bail!("max_measurement_failures должно быть больше 0");
        }

        BreakpointTable::new(self.viewport.breakpoints.clone()).context("Секция [viewport]")?;

        // Валидация элементов
        if self.elements.is_empty() {
            anyhow::bail!("Не задано ни одного элемента");
        }

        let mut names = HashSet::new();
        for (i, element) in self.elements.iter().enumerate() {
            if element.name.trim().is_empty() {
                anyhow::bail!("Пустое имя у элемента #{}", i + 1);
            }
            if !names.insert(element.name.as_str()) {
                anyhow::bail!("Элемент '{}' указан дважды", element.name);
            }

            self.table_for(element)
                .with_context(|| format!("Элемент '{}'", element.name))?;

            for (kind, command) in [("on_change", &element.on_change), ("on_ready", &element.on_ready)] {
                if matches!(command, Some(cmd) if cmd.is_empty()) {
                    anyhow::bail!("Пустая команда {} у элемента '{}'", kind, element.name);
                }
            }
        }

        Ok(())
    }

    /// Таблица брейкпоинтов элемента с учётом значения по умолчанию
    pub fn table_for(&self, element: &ElementConfig) -> crate::error::Result<BreakpointTable> {
        let entries = element
            .breakpoints
            .clone()
            .unwrap_or_else(|| self.viewport.breakpoints.clone());
        BreakpointTable::new(entries)
    }

    pub fn prefix_for(&self, element: &ElementConfig) -> String {
        element
            .css_prefix
            .clone()
            .unwrap_or_else(|| self.viewport.css_prefix.clone())
    }
}
