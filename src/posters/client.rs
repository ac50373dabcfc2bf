// TMDB image client — thin reqwest wrapper with an owned URL cache.
//
// Poster lookups go through the "movie images" endpoint; the first
// poster's file path becomes the full w500 image URL. Lookups never fail
// outward: any error is logged and cached as None, so each id costs at
// most one request per process.

use std::collections::HashMap;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, warn};

/// Default TMDB API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Default base URL for poster images (w500 size).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Client for the TMDB movie-images endpoint.
///
/// The cache is an owned field, not a process global — independent
/// instances (and tests) coexist without sharing state.
pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    image_base_url: String,
    cache: HashMap<i64, Option<String>>,
}

impl TmdbClient {
    pub fn new(api_key: &str, api_url: &str, image_base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("marquee/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            cache: HashMap::new(),
        })
    }

    /// Full poster URL for a TMDB movie id, or None if the movie has no
    /// posters or the lookup fails. Hits and failures are both cached.
    pub async fn poster_url(&mut self, poster_id: i64) -> Option<String> {
        if let Some(cached) = self.cache.get(&poster_id) {
            debug!(poster_id, "Poster cache hit");
            return cached.clone();
        }

        let url = self
            .fetch_poster_url(poster_id)
            .await
            .unwrap_or_else(|error| {
                warn!(poster_id, error = %error, "Poster lookup failed");
                None
            });

        self.cache.insert(poster_id, url.clone());
        url
    }

    /// Fetch poster URLs for a batch of ids with bounded concurrency,
    /// showing progress. Already-cached ids are skipped. Returns how many
    /// of the requested ids now resolve to a poster.
    pub async fn fetch_posters(&mut self, poster_ids: &[i64], concurrency: usize) -> usize {
        let pending: Vec<i64> = poster_ids
            .iter()
            .copied()
            .filter(|id| !self.cache.contains_key(id))
            .collect();

        if !pending.is_empty() {
            let pb = ProgressBar::new(pending.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Posters [{bar:30}] {pos}/{len} ({eta})")
                    .unwrap(),
            );

            let this = &*self;
            let fetched: Vec<(i64, Option<String>)> = stream::iter(pending)
                .map(|id| {
                    let pb = pb.clone();
                    async move {
                        let url = this.fetch_poster_url(id).await.unwrap_or_else(|error| {
                            warn!(poster_id = id, error = %error, "Poster lookup failed");
                            None
                        });
                        pb.inc(1);
                        (id, url)
                    }
                })
                .buffer_unordered(concurrency.max(1))
                .collect()
                .await;
            pb.finish_and_clear();

            self.cache.extend(fetched);
        }

        poster_ids
            .iter()
            .filter(|id| matches!(self.cache.get(id), Some(Some(_))))
            .count()
    }

    /// Number of cached lookups (hits and misses both count).
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    async fn fetch_poster_url(&self, poster_id: i64) -> Result<Option<String>> {
        let url = format!("{}/movie/{}/images", self.api_url, poster_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Image request failed for movie {poster_id}"))?;

        if !response.status().is_success() {
            anyhow::bail!("TMDB returned {} for movie {}", response.status(), poster_id);
        }

        let images: MovieImages = response
            .json()
            .await
            .with_context(|| format!("Failed to deserialize image list for movie {poster_id}"))?;

        Ok(images
            .posters
            .into_iter()
            .find_map(|poster| poster.file_path)
            .map(|path| format!("{}{}", self.image_base_url, path)))
    }
}

// -- Serde types for the movie-images response --

#[derive(Debug, Deserialize)]
struct MovieImages {
    #[serde(default)]
    posters: Vec<PosterImage>,
}

#[derive(Debug, Deserialize)]
struct PosterImage {
    file_path: Option<String>,
}
