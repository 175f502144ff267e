pub mod measurement;
pub mod registry;
pub mod resize_watcher;
pub mod sinks;
pub mod tracker;
pub mod viewport_class;

pub use measurement::create_measurement_source;
pub use registry::ViewportRegistry;
pub use resize_watcher::ResizeWatcher;
