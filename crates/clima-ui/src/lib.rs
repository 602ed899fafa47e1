//! Search widget for Clima: page regions, markup rendering and the input
//! controller that wires user events to the weather provider.

pub mod controller;
pub mod debounce;
pub mod error_mapping;
pub mod page;
pub mod render;

pub use controller::{AppState, ControllerSettings, WeatherApp};
pub use debounce::Debouncer;
pub use error_mapping::IntoAppError;
pub use page::Page;
pub use render::Renderer;
