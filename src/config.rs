use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The TMDB key is the only secret and comes from the environment (never
/// hardcoded). The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Path to the catalog CSV
    pub dataset_path: String,
    /// TMDB API key — only needed for poster operations
    pub tmdb_api_key: String,
    /// TMDB API endpoint (defaults to https://api.themoviedb.org/3)
    pub tmdb_api_url: String,
    /// Base URL for poster images (w500 size)
    pub image_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the TMDB key, which is only required
    /// for poster operations — browsing and recommendations work without it.
    pub fn load() -> Result<Self> {
        Ok(Self {
            dataset_path: env::var("MARQUEE_DATASET")
                .unwrap_or_else(|_| "data/movies.csv".to_string()),
            tmdb_api_key: env::var("TMDB_API_KEY").unwrap_or_default(),
            tmdb_api_url: env::var("TMDB_API_URL")
                .unwrap_or_else(|_| crate::posters::client::DEFAULT_API_URL.to_string()),
            image_base_url: env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|_| crate::posters::client::DEFAULT_IMAGE_BASE_URL.to_string()),
        })
    }

    /// Check that the TMDB API key is configured.
    /// Call this before any operation that fetches posters.
    pub fn require_tmdb(&self) -> Result<()> {
        if self.tmdb_api_key.is_empty() {
            anyhow::bail!(
                "TMDB_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
