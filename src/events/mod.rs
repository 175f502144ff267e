pub mod viewport;
pub mod window;

pub use viewport::{Direction, TransitionEvent, ViewportData};
pub use window::{Measurement, WindowEvent, WindowEventType};
