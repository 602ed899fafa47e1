//! Presentation layer: turns widget state into region markup.
//!
//! Templates are compiled once; HTML auto-escaping applies to every value,
//! so city names typed by the user and provider text are inert.

use minijinja::{context, Environment};

use clima_weather::{icon_for, WeatherResult};

use crate::page::Page;

const LOADING_TEMPLATE: &str = "loading.html";
const ERROR_TEMPLATE: &str = "error.html";
const WEATHER_TEMPLATE: &str = "weather.html";
const RECENT_TEMPLATE: &str = "recent.html";
const PAGE_TEMPLATE: &str = "page.html";

/// Meters per second to kilometers per hour
const MS_TO_KMH: f64 = 3.6;

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(LOADING_TEMPLATE, include_str!("../templates/loading.html"))?;
        env.add_template(ERROR_TEMPLATE, include_str!("../templates/error.html"))?;
        env.add_template(WEATHER_TEMPLATE, include_str!("../templates/weather.html"))?;
        env.add_template(RECENT_TEMPLATE, include_str!("../templates/recent.html"))?;
        env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
        Ok(Self { env })
    }

    /// Spinner and status text
    pub fn render_loading(&self, page: &mut Page) -> Result<(), minijinja::Error> {
        page.weather_info = self.env.get_template(LOADING_TEMPLATE)?.render(context! {})?;
        Ok(())
    }

    /// Error icon and the message verbatim
    pub fn render_error(&self, page: &mut Page, message: &str) -> Result<(), minijinja::Error> {
        page.weather_info = self
            .env
            .get_template(ERROR_TEMPLATE)?
            .render(context! { message => message })?;
        Ok(())
    }

    pub fn render_weather(
        &self,
        page: &mut Page,
        result: &WeatherResult,
    ) -> Result<(), minijinja::Error> {
        page.weather_info = self.env.get_template(WEATHER_TEMPLATE)?.render(context! {
            name => &result.name,
            icon => icon_for(&result.icon_code),
            temperature => round_half_up(result.temperature),
            description => capitalize_first(&result.description),
            feels_like => round_half_up(result.feels_like),
            humidity => result.humidity,
            wind_kmh => wind_kmh(result.wind_speed),
        })?;
        Ok(())
    }

    /// Heading plus one button per city; clears the region for an empty list
    pub fn render_recent_searches(
        &self,
        page: &mut Page,
        cities: &[String],
    ) -> Result<(), minijinja::Error> {
        if cities.is_empty() {
            page.recent_searches.clear();
            return Ok(());
        }

        page.recent_searches = self
            .env
            .get_template(RECENT_TEMPLATE)?
            .render(context! { cities => cities })?;
        Ok(())
    }

    /// Whole document: body theme, toggle icon, input value and both regions.
    ///
    /// Regions are already rendered markup and are embedded as-is.
    pub fn render_page(&self, page: &Page) -> Result<String, minijinja::Error> {
        self.env.get_template(PAGE_TEMPLATE)?.render(context! {
            body_class => page.body_class(),
            theme_icon => &page.theme_icon,
            input => &page.input,
            weather_info => &page.weather_info,
            recent_searches => &page.recent_searches,
        })
    }
}

/// Round to the nearest integer, halves toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Wind speed in whole km/h from m/s
pub fn wind_kmh(meters_per_second: f64) -> i64 {
    round_half_up(meters_per_second * MS_TO_KMH)
}

/// Upper-case the first character, leave the rest untouched
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
