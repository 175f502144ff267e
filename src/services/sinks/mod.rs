//! Приёмники переходов: классы элемента, пользовательские обработчики, хук готовности.
//!
//! Здесь нет логики брейкпоинтов: решение о переходе принимает ViewportTracker.

mod command;
mod element;
mod r#trait;

pub use self::command::CommandHook;
pub use self::element::ElementClassList;
pub use self::r#trait::{CallbackSink, ClassToggleSink, ReadyFn, ReadyHook};
