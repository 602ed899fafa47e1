use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use clima_services::{FileStore, Preferences};
use clima_ui::{ControllerSettings, WeatherApp};
use clima_weather::{ProviderSettings, WeatherProvider};

const HELP: &str = "\
Type a city and press Enter to search.
  /type <text>   simulate typing (debounced preview)
  /recent <n>    click the n-th recent search
  /theme         toggle light/dark theme
  /quit          exit";

/// One line of input, as a UI event
enum Event {
    Submit(String),
    Type(String),
    Recent(usize),
    ToggleTheme,
    Help,
    Quit,
}

impl Event {
    fn parse(line: &str) -> Option<Self> {
        let Some(command) = line.strip_prefix('/') else {
            return Some(Self::Submit(line.to_string()));
        };

        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        match name {
            "type" => Some(Self::Type(arg.to_string())),
            "recent" => arg.trim().parse().ok().map(Self::Recent),
            "theme" => Some(Self::ToggleTheme),
            "help" => Some(Self::Help),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

fn print_page(widget: &WeatherApp) {
    match widget.render_page() {
        Ok(html) => println!("{}", html),
        Err(e) => tracing::error!("Failed to render page: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    clima_core::init()?;

    let mut app = clima_core::App::new()?;
    app.initialize()?;
    let config = app.config_arc();

    let provider = WeatherProvider::new(ProviderSettings {
        api_url: config.weather.api_url.clone(),
        api_key: config.weather.api_key.clone(),
        units: config.weather.units.clone(),
        lang: config.weather.lang.clone(),
        timeout: Duration::from_secs(config.weather.timeout_secs),
    })
    .context("Failed to create weather provider")?;

    let store = Arc::new(FileStore::open(config.preferences_path()));
    let widget = WeatherApp::new(
        provider,
        Preferences::new(store),
        ControllerSettings::from(&config.ui),
    )?;
    widget.init();

    tracing::info!("Clima started");
    println!("{}", HELP);
    print_page(&widget);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(event) = Event::parse(line.trim_end()) else {
            println!("Unknown command. /help for usage.");
            continue;
        };

        match event {
            Event::Submit(text) => {
                if let Err(e) = widget.submit(&text).await {
                    tracing::debug!("Search failed: {}", e);
                }
            }
            Event::Type(text) => {
                // Previews render nothing; the task runs detached while input continues
                drop(widget.input_changed(&text));
                continue;
            }
            Event::Recent(n) => {
                let recent = widget.recent_searches();
                match n.checked_sub(1).and_then(|i| recent.get(i)) {
                    Some(city) => {
                        if let Err(e) = widget.recent_clicked(city).await {
                            tracing::debug!("Search failed: {}", e);
                        }
                    }
                    None => {
                        println!("No recent search #{}", n);
                        continue;
                    }
                }
            }
            Event::ToggleTheme => {
                if let Err(e) = widget.toggle_theme() {
                    tracing::warn!("Failed to toggle theme: {}", e);
                    println!("{}", e.user_message());
                }
            }
            Event::Help => {
                println!("{}", HELP);
                continue;
            }
            Event::Quit => break,
        }

        print_page(&widget);
    }

    // Graceful shutdown
    app.shutdown()?;

    Ok(())
}
