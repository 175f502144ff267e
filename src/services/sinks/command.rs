use crate::error::{Result, ViewportError};
use crate::events::{Direction, ViewportData};
use std::process::Stdio;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::r#trait::{CallbackSink, ReadyHook};

/// Внешняя команда, вызываемая при смене вьюпорта или готовности элемента.
///
/// Параметры передаются через переменные окружения `VIEWPORT_*`. Команда
/// запускается в фоне: трекер не ждёт её завершения, код выхода пишется в лог.
pub struct CommandHook {
    element: String,
    program: String,
    args: Vec<String>,
}

impl CommandHook {
    /// `command` — программа и её аргументы, как в конфигурации
    pub fn new(element: impl Into<String>, command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ViewportError::Callback("пустая команда обработчика".to_string()))?;

        Ok(Self {
            element: element.into(),
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Запускает команду и возвращает задачу, ожидающую её завершения
    fn spawn(&self, envs: Vec<(&'static str, String)>) -> Result<JoinHandle<Result<()>>> {
        let runtime = Handle::try_current()
            .map_err(|e| ViewportError::Callback(format!("нет tokio runtime для '{}': {}", self.program, e)))?;

        debug!("Запуск обработчика '{}' для элемента '{}'", self.program, self.element);

        let child = Command::new(&self.program)
            .args(&self.args)
            .env("VIEWPORT_ELEMENT", &self.element)
            .envs(envs)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ViewportError::Callback(format!("не удалось запустить '{}': {}", self.program, e)))?;

        let program = self.program.clone();
        let element = self.element.clone();

        Ok(runtime.spawn(async move {
            let output = child
                .wait_with_output()
                .await
                .map_err(|e| ViewportError::Callback(format!("ожидание '{}' прервано: {}", program, e)))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let err = ViewportError::Callback(format!(
                    "'{}' завершился с {}: {}",
                    program,
                    output.status,
                    stderr.trim()
                ));
                warn!("Обработчик элемента '{}': {}", element, err);
                return Err(err);
            }

            debug!("Обработчик '{}' для элемента '{}' завершился", program, element);
            Ok(())
        }))
    }

    pub fn spawn_change(
        &self,
        max_width: Option<u32>,
        viewport: &str,
        direction: Direction,
    ) -> Result<JoinHandle<Result<()>>> {
        self.spawn(vec![
            ("VIEWPORT_EVENT", "change".to_string()),
            ("VIEWPORT_NAME", viewport.to_string()),
            ("VIEWPORT_MAX_WIDTH", max_width_env(max_width)),
            ("VIEWPORT_DIRECTION", direction.to_string()),
            ("VIEWPORT_RESIZED", direction.resized().to_string()),
        ])
    }

    pub fn spawn_ready(&self, viewport: &str, data: &ViewportData) -> Result<JoinHandle<Result<()>>> {
        self.spawn(vec![
            ("VIEWPORT_EVENT", "ready".to_string()),
            ("VIEWPORT_NAME", viewport.to_string()),
            ("VIEWPORT_MAX_WIDTH", max_width_env(data.viewport_width)),
            ("VIEWPORT_WIDTH", data.width.to_string()),
            ("VIEWPORT_HEIGHT", data.height.to_string()),
        ])
    }
}

fn max_width_env(max_width: Option<u32>) -> String {
    max_width.map(|w| w.to_string()).unwrap_or_default()
}

impl CallbackSink for CommandHook {
    fn on_viewport_change(&self, max_width: Option<u32>, viewport: &str, direction: Direction) -> Result<()> {
        self.spawn_change(max_width, viewport, direction).map(drop)
    }
}

impl ReadyHook for CommandHook {
    fn on_ready(&self, viewport: &str, data: &ViewportData) -> Result<()> {
        self.spawn_ready(viewport, data).map(drop)
    }
}
