//! The widget's display surface.

use clima_services::Theme;

/// Body class applied while the dark theme is active
pub const DARK_THEME_CLASS: &str = "dark-theme";

/// Current contents of every region the widget writes to.
///
/// Each region holds an HTML fragment and is replaced wholesale on render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Weather display region: loading, error or result markup
    pub weather_info: String,
    /// Recent-searches region; empty when there is no history
    pub recent_searches: String,
    /// Value of the city text input
    pub input: String,
    /// Whether the body carries `dark-theme`
    pub dark_theme: bool,
    /// Class list of the theme toggle icon
    pub theme_icon: String,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a theme to the body class and toggle icon
    pub fn apply_theme(&mut self, theme: Theme) {
        self.dark_theme = theme.is_dark();
        // The toggle shows the theme you would switch to
        self.theme_icon = match theme {
            Theme::Light => "fas fa-moon".to_string(),
            Theme::Dark => "fas fa-sun".to_string(),
        };
    }

    /// Class attribute of the page body
    pub fn body_class(&self) -> &'static str {
        if self.dark_theme {
            DARK_THEME_CLASS
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_theme() {
        let mut page = Page::new();

        page.apply_theme(Theme::Dark);
        assert_eq!(page.body_class(), "dark-theme");
        assert_eq!(page.theme_icon, "fas fa-sun");

        page.apply_theme(Theme::Light);
        assert_eq!(page.body_class(), "");
        assert_eq!(page.theme_icon, "fas fa-moon");
    }
}
