//! Input controller: wires form submits, live typing, recent-search clicks
//! and the theme toggle to the provider, the preferences and the page.
//!
//! All handlers share one `WeatherApp` context. Locks are never held across
//! an await; the only suspension point is the provider call.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use clima_core::{AppError, UiConfig, ValidationError};
use clima_services::{Preferences, RecentSearches, Theme};
use clima_weather::{FetchMode, WeatherProvider, WeatherResult};

use crate::debounce::Debouncer;
use crate::error_mapping::IntoAppError;
use crate::page::Page;
use crate::render::Renderer;

/// Controller tuning
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub preview_min_chars: usize,
    pub max_recent: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

impl From<&UiConfig> for ControllerSettings {
    fn from(config: &UiConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            preview_min_chars: config.preview_min_chars,
            max_recent: config.max_recent,
        }
    }
}

/// Mutable session state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Set while a full lookup is in flight
    pub loading: bool,
    pub recent: RecentSearches,
    pub theme: Theme,
}

struct Inner {
    provider: WeatherProvider,
    preferences: Preferences,
    renderer: Renderer,
    settings: ControllerSettings,
    debouncer: Debouncer,
    state: Mutex<AppState>,
    page: Mutex<Page>,
}

/// Application context shared by every UI handler.
#[derive(Clone)]
pub struct WeatherApp {
    inner: Arc<Inner>,
}

impl WeatherApp {
    /// Build the context, loading theme and history from `preferences`
    pub fn new(
        provider: WeatherProvider,
        preferences: Preferences,
        settings: ControllerSettings,
    ) -> Result<Self, AppError> {
        let renderer = Renderer::new().map_err(IntoAppError::into_app_error)?;

        let state = AppState {
            loading: false,
            recent: RecentSearches::from_stored(preferences.recent_searches(), settings.max_recent),
            theme: preferences.theme(),
        };

        tracing::debug!(
            theme = state.theme.as_str(),
            recent = state.recent.len(),
            "Loaded preferences"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                provider,
                preferences,
                renderer,
                debouncer: Debouncer::new(settings.debounce),
                settings,
                state: Mutex::new(state),
                page: Mutex::new(Page::new()),
            }),
        })
    }

    /// Apply the stored theme and draw the recent-search list
    pub fn init(&self) {
        let (theme, recent) = {
            let state = self.inner.state.lock();
            (state.theme, state.recent.as_slice().to_vec())
        };

        let mut page = self.inner.page.lock();
        page.apply_theme(theme);
        self.render(|r| r.render_recent_searches(&mut page, &recent));
    }

    /// Snapshot of the page regions
    pub fn page(&self) -> Page {
        self.inner.page.lock().clone()
    }

    /// The whole page as an HTML document
    pub fn render_page(&self) -> Result<String, AppError> {
        let page = self.page();
        self.inner
            .renderer
            .render_page(&page)
            .map_err(IntoAppError::into_app_error)
    }

    /// Snapshot of the session state
    pub fn state(&self) -> AppState {
        self.inner.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().loading
    }

    pub fn theme(&self) -> Theme {
        self.inner.state.lock().theme
    }

    pub fn recent_searches(&self) -> Vec<String> {
        self.inner.state.lock().recent.as_slice().to_vec()
    }

    /// Form submit with the text currently in the input.
    pub async fn submit(&self, input: &str) -> Result<WeatherResult, AppError> {
        self.inner.page.lock().input = input.to_string();

        let city = input.trim();
        if city.is_empty() {
            let err = AppError::from(ValidationError::EmptyCity);
            self.show_error(err.user_message());
            return Err(err);
        }

        self.get_weather(city, FetchMode::Full).await
    }

    /// Keystroke in the input. Schedules a debounced preview lookup.
    pub fn input_changed(&self, value: &str) -> JoinHandle<()> {
        self.inner.page.lock().input = value.to_string();

        let app = self.clone();
        let value = value.to_string();
        self.inner
            .debouncer
            .schedule(async move { app.preview(&value).await })
    }

    /// Click on a recent-search entry.
    pub async fn recent_clicked(&self, city: &str) -> Result<WeatherResult, AppError> {
        self.inner.page.lock().input = city.to_string();
        self.get_weather(city, FetchMode::Full).await
    }

    /// Flip and persist the theme.
    pub fn toggle_theme(&self) -> Result<Theme, AppError> {
        let mut state = self.inner.state.lock();
        let next = state.theme.toggled();

        self.inner
            .preferences
            .set_theme(next)
            .map_err(IntoAppError::into_app_error)?;

        state.theme = next;
        self.inner.page.lock().apply_theme(next);

        tracing::info!(theme = next.as_str(), "Theme toggled");
        Ok(next)
    }

    /// Run one lookup. Full mode drives the loading flag, the weather region
    /// and the history; preview mode only performs the request.
    pub async fn get_weather(&self, city: &str, mode: FetchMode) -> Result<WeatherResult, AppError> {
        if mode == FetchMode::Full {
            self.inner.state.lock().loading = true;
            let mut page = self.inner.page.lock();
            self.render(|r| r.render_loading(&mut page));
        }

        let result = self
            .inner
            .provider
            .fetch(city, mode)
            .await
            .map_err(IntoAppError::into_app_error);

        if mode == FetchMode::Full {
            match &result {
                Ok(weather) => {
                    {
                        let mut page = self.inner.page.lock();
                        self.render(|r| r.render_weather(&mut page, weather));
                    }
                    self.add_to_recent(city);
                }
                Err(e) => {
                    tracing::info!("Lookup for {} failed: {}", city, e);
                    self.show_error(e.user_message());
                }
            }
            self.inner.state.lock().loading = false;
        }

        result
    }

    /// Record `city` in the history, persisting and redrawing on change
    pub fn add_to_recent(&self, city: &str) {
        let recent = {
            let mut state = self.inner.state.lock();
            if !state.recent.add(city) {
                return;
            }
            state.recent.as_slice().to_vec()
        };

        if let Err(e) = self.inner.preferences.set_recent_searches(&recent) {
            tracing::warn!("Failed to persist recent searches: {}", e);
        }

        let mut page = self.inner.page.lock();
        self.render(|r| r.render_recent_searches(&mut page, &recent));
    }

    async fn preview(&self, value: &str) {
        let city = value.trim();
        if city.chars().count() < self.inner.settings.preview_min_chars {
            return;
        }

        // Preview results are never shown
        match self.get_weather(city, FetchMode::Preview).await {
            Ok(weather) => tracing::debug!("Preview resolved: {}", weather.name),
            Err(e) => tracing::debug!("Preview error: {}", e),
        }
    }

    fn show_error(&self, message: &str) {
        let mut page = self.inner.page.lock();
        self.render(|r| r.render_error(&mut page, message));
    }

    fn render<F>(&self, draw: F)
    where
        F: FnOnce(&Renderer) -> Result<(), minijinja::Error>,
    {
        if let Err(e) = draw(&self.inner.renderer) {
            tracing::error!("Render failed: {:?}", e.into_app_error());
        }
    }
}
