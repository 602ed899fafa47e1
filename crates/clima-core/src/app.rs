use anyhow::{Context, Result};
use std::sync::Arc;

use crate::{Config, ValidationResult};

/// Application configuration and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance from the on-disk configuration
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        Ok(Self::with_config(config, validation))
    }

    /// Create an application instance around an already loaded configuration
    pub fn with_config(config: Config, validation: ValidationResult) -> Self {
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Prepare the directories the application writes into
    pub fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.config.config_dir)
            .context("Failed to create config directory")?;

        tracing::info!(
            config_dir = %self.config.config_dir.display(),
            warnings = self.validation.warnings.len(),
            "Application initialized successfully"
        );
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the configuration
    pub fn config_arc(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Warnings collected while validating the configuration
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }
}
