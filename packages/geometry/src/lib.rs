#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Regional boundary geometry: fetching, caching, and join-key binding.
//!
//! Boundaries come from an external GeoJSON endpoint (by default the
//! geoBoundaries ADM1 collection for Kazakhstan). Each render cycle makes
//! at most one bounded fetch attempt: any transport, status, or payload
//! problem collapses into [`GeometryUnavailableError`], and the caller
//! falls back to a non-geographic rendering instead of retrying. A
//! successful fetch is cached for the life of the process.

pub mod bind;
pub mod features;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use bind::{BoundRegion, bind_regions};
pub use features::{BoundaryFeature, FeatureSet, parse_feature_collection};

/// Default geometry endpoint: Kazakhstan first-level boundaries from
/// geoBoundaries.
pub const DEFAULT_GEOMETRY_URL: &str =
    "https://raw.githubusercontent.com/wmgeolab/geoBoundaries/main/releaseData/gbOpen/KAZ/ADM1/geoBoundaries-KAZ-ADM1.geojson";

/// Default feature property carrying the join key.
pub const DEFAULT_JOIN_PROPERTY: &str = "shapeName";

/// Default per-fetch timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifies an external geometry provider: where to fetch the feature
/// collection and which feature property carries the join key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometrySourceRef {
    /// Endpoint returning a GeoJSON `FeatureCollection`.
    pub url: String,
    /// Feature property holding the region code or name.
    pub join_property: String,
}

impl GeometrySourceRef {
    #[must_use]
    pub fn new(url: impl Into<String>, join_property: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            join_property: join_property.into(),
        }
    }
}

impl Default for GeometrySourceRef {
    fn default() -> Self {
        Self::new(DEFAULT_GEOMETRY_URL, DEFAULT_JOIN_PROPERTY)
    }
}

/// The single failure type for geometry operations.
///
/// Transport errors, HTTP error statuses, timeouts, and malformed payloads
/// all collapse here. Callers only learn that geometry cannot be used this
/// cycle and react by falling back; the cause is kept for logs.
#[derive(Debug, Error)]
#[error("geometry unavailable: {reason}")]
pub struct GeometryUnavailableError {
    reason: String,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GeometryUnavailableError {
    /// Wraps a failure description without an underlying cause.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            cause: None,
        }
    }

    /// Wraps a failure description around its underlying cause.
    #[must_use]
    pub fn with_cause(
        reason: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            reason: reason.into(),
            cause: Some(Box::new(cause)),
        }
    }
}

impl From<reqwest::Error> for GeometryUnavailableError {
    fn from(e: reqwest::Error) -> Self {
        let reason = if e.is_timeout() {
            "request timed out"
        } else {
            "http request failed"
        };
        Self::with_cause(reason, e)
    }
}

impl From<geojson::Error> for GeometryUnavailableError {
    fn from(e: geojson::Error) -> Self {
        Self::with_cause("payload is not valid geojson", e)
    }
}

/// Process-lifetime cache of fetched feature sets, keyed by source URL.
///
/// Injected into [`GeometrySource`] at construction so tests and tools can
/// share or isolate caches explicitly. Boundaries are immutable reference
/// data: the only invalidation is process restart.
#[derive(Debug, Default)]
pub struct GeometryCache {
    entries: RwLock<HashMap<String, Arc<FeatureSet>>>,
}

impl GeometryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached feature set for `url`, if one has been stored.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<Arc<FeatureSet>> {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.get(url).cloned()
    }

    /// Stores `features` for `url`. Concurrent fetches of the same URL may
    /// race; the payloads are identical reference data, so last write wins.
    pub fn insert(&self, url: &str, features: Arc<FeatureSet>) {
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(url.to_string(), features);
    }

    /// Number of cached source URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Seam between rendering and the geometry transport, so strategy tests
/// can substitute canned or failing sources.
#[async_trait]
pub trait GeometryFetcher: Send + Sync {
    /// Returns the feature set for `source`, fetching it if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryUnavailableError`] when the source cannot be used
    /// this cycle, whatever the underlying reason.
    async fn fetch(
        &self,
        source: &GeometrySourceRef,
    ) -> Result<Arc<FeatureSet>, GeometryUnavailableError>;
}

/// HTTP-backed geometry source with an injected cache.
pub struct GeometrySource {
    client: reqwest::Client,
    cache: Arc<GeometryCache>,
}

impl GeometrySource {
    /// Builds a source around an existing HTTP client.
    #[must_use]
    pub const fn new(client: reqwest::Client, cache: Arc<GeometryCache>) -> Self {
        Self { client, cache }
    }

    /// Builds a source with its own client bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryUnavailableError`] if the HTTP client cannot be
    /// constructed.
    pub fn with_timeout(
        timeout: Duration,
        cache: Arc<GeometryCache>,
    ) -> Result<Self, GeometryUnavailableError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, cache))
    }
}

#[async_trait]
impl GeometryFetcher for GeometrySource {
    async fn fetch(
        &self,
        source: &GeometrySourceRef,
    ) -> Result<Arc<FeatureSet>, GeometryUnavailableError> {
        if let Some(cached) = self.cache.get(&source.url) {
            log::debug!("Geometry cache hit for {}", source.url);
            return Ok(cached);
        }

        log::info!("Fetching boundary geometry from {}", source.url);
        let response = self.client.get(&source.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeometryUnavailableError::new(format!(
                "geometry endpoint returned HTTP {status}"
            )));
        }

        let body = response.text().await?;
        let features = Arc::new(parse_feature_collection(&body, &source.join_property)?);

        self.cache.insert(&source.url, Arc::clone(&features));
        log::info!(
            "Cached {} boundary features for {}",
            features.len(),
            source.url
        );

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_points_at_geoboundaries() {
        let source = GeometrySourceRef::default();
        assert!(source.url.contains("geoBoundaries-KAZ-ADM1"));
        assert_eq!(source.join_property, "shapeName");
    }

    #[test]
    fn error_display_includes_reason() {
        let err = GeometryUnavailableError::new("endpoint melted");
        assert_eq!(err.to_string(), "geometry unavailable: endpoint melted");
    }

    #[test]
    fn cache_stores_by_url() {
        let cache = GeometryCache::new();
        assert!(cache.is_empty());

        cache.insert("http://a", Arc::new(FeatureSet::default()));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("http://a").is_some());
        assert!(cache.get("http://b").is_none());
    }

    #[tokio::test]
    async fn fetch_serves_cached_features_without_network() {
        let cache = Arc::new(GeometryCache::new());
        let source_ref = GeometrySourceRef::default();
        cache.insert(&source_ref.url, Arc::new(FeatureSet::default()));

        let source = GeometrySource::with_timeout(Duration::from_secs(1), Arc::clone(&cache))
            .expect("client builds");
        let features = source.fetch(&source_ref).await.expect("cache hit");
        assert!(features.is_empty());
    }
}
