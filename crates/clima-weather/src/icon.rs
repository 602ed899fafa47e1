//! Maps OpenWeatherMap condition codes to Font Awesome icon names.

/// Icon used for codes outside the table
pub const FALLBACK_ICON: &str = "cloud";

/// Get the icon name for a provider condition code (`"01d"`, `"10n"`, ...)
pub fn icon_for(code: &str) -> &'static str {
    match code {
        "01d" => "sun",
        "01n" => "moon",
        "02d" => "cloud-sun",
        "02n" => "cloud-moon",
        "03d" | "03n" => "cloud",
        "04d" | "04n" => "clouds",
        "09d" | "09n" => "cloud-showers-heavy",
        "10d" | "10n" => "cloud-rain",
        "11d" | "11n" => "bolt",
        "13d" | "13n" => "snowflake",
        "50d" | "50n" => "smog",
        _ => FALLBACK_ICON,
    }
}
