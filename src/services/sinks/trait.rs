use crate::error::Result;
use crate::events::{Direction, ViewportData};

/// Sink that keeps the viewport class of a target element in sync.
pub trait ClassToggleSink: Send + Sync {
    /// Remove `prefix + old` (if any) and add `prefix + new`
    fn swap_class(&self, prefix: &str, old: Option<&str>, new: &str) -> Result<()>;
}

/// User callback fired on every breakpoint transition.
///
/// Receives the max width of the new breakpoint (`None` for the unbounded one),
/// its name and the direction of the change.
pub trait CallbackSink: Send + Sync {
    fn on_viewport_change(&self, max_width: Option<u32>, viewport: &str, direction: Direction) -> Result<()>;
}

/// Hook fired once, after the element received its initial class.
pub trait ReadyHook: Send + Sync {
    fn on_ready(&self, viewport: &str, data: &ViewportData) -> Result<()>;
}

impl<F> CallbackSink for F
where
    F: Fn(Option<u32>, &str, Direction) + Send + Sync,
{
    fn on_viewport_change(&self, max_width: Option<u32>, viewport: &str, direction: Direction) -> Result<()> {
        self(max_width, viewport, direction);
        Ok(())
    }
}

/// Ready hook built from a closure
#[allow(dead_code)]
pub struct ReadyFn<F>(pub F);

impl<F> ReadyHook for ReadyFn<F>
where
    F: Fn(&str, &ViewportData) + Send + Sync,
{
    fn on_ready(&self, viewport: &str, data: &ViewportData) -> Result<()> {
        (self.0)(viewport, data);
        Ok(())
    }
}

/// Prefixed CSS class name for a viewport
pub fn class_name(prefix: &str, viewport: &str) -> String {
    format!("{}{}", prefix, viewport)
}
