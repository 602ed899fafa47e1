//! Weather service for Clima
//!
//! Looks up current conditions for a city via the OpenWeatherMap API and
//! maps provider condition codes to display icons.

pub mod icon;
pub mod provider;
pub mod types;

pub use icon::icon_for;
pub use provider::{ProviderSettings, WeatherProvider};
pub use types::*;
