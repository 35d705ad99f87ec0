//! spacetraveling: a blog front-end backed by a headless CMS
//!
//! This crate fetches paged post listings from a Prismic-style content API,
//! normalizes the records into [`content::Post`] values and derives display
//! fields such as publication dates and reading time.

pub mod client;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod pagination;
pub mod server;

use anyhow::Result;
use std::path::Path;

use crate::client::PrismicClient;
use crate::pagination::Paginator;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            config::SiteConfig::default()
        };
        config.apply_env_overrides();

        Ok(Self { config, base_dir })
    }

    /// Build a client for the configured content API
    pub fn client(&self) -> Result<PrismicClient> {
        if self.config.api_endpoint.is_empty() {
            anyhow::bail!(
                "No content API configured. Set api_endpoint in _config.yml or {}",
                config::ENDPOINT_ENV
            );
        }
        Ok(PrismicClient::new(
            &self.config.api_endpoint,
            self.config.access_token.clone(),
        ))
    }

    /// Build a paginator over the configured document type
    pub fn paginator(&self) -> Result<Paginator<PrismicClient>> {
        Ok(Paginator::from_config(self.client()?, &self.config))
    }

    /// List posts
    pub async fn list(&self, all: bool) -> Result<()> {
        commands::list::run(self, all).await
    }

    /// Show a single post
    pub async fn show(&self, uid: &str, html: bool) -> Result<()> {
        commands::show::run(self, uid, html).await
    }
}
