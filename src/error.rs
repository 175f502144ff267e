use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewportError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректная таблица брейкпоинтов: {0}")]
    InvalidTable(String),

    #[error("Не удалось измерить окно: {0}")]
    Measurement(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Ошибка обработчика: {0}")]
    Callback(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ViewportError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! viewport_error {
    (invalid_table, $($arg:tt)*) => {
        $crate::error::ViewportError::InvalidTable(format!($($arg)*))
    };
    (measurement, $($arg:tt)*) => {
        $crate::error::ViewportError::Measurement(format!($($arg)*))
    };
    (service_unavailable, $($arg:tt)*) => {
        $crate::error::ViewportError::ServiceUnavailable(format!($($arg)*))
    };
    (callback, $($arg:tt)*) => {
        $crate::error::ViewportError::Callback(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::ViewportError::Internal(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_builds_variant() {
        let err = viewport_error!(invalid_table, "пустая таблица ({} записей)", 0);
        assert!(matches!(err, ViewportError::InvalidTable(ref msg) if msg.contains("0 записей")));
    }
}
