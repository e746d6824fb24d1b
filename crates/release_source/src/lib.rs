use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, ensure, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::domain::{MovieId, MovieRelease, UserId};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

mod seed;
pub use seed::seed_catalog;

/// Source of release records for an inclusive date range.
///
/// Implementations must only return releases whose `release_date` lies
/// within `start..=end`.
#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    async fn releases_for_range(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<MovieRelease>>;
}

pub struct MissingReleaseRepository;

#[async_trait]
impl ReleaseRepository for MissingReleaseRepository {
    async fn releases_for_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MovieRelease>> {
        Err(anyhow!(
            "release repository unavailable for range {start}..={end}"
        ))
    }
}

/// Serves a fixed set of releases held in memory.
#[derive(Default)]
pub struct InMemoryReleaseRepository {
    releases: RwLock<Vec<MovieRelease>>,
}

impl InMemoryReleaseRepository {
    pub fn new(releases: Vec<MovieRelease>) -> Self {
        Self {
            releases: RwLock::new(releases),
        }
    }

    pub fn with_seed_catalog() -> Self {
        Self::new(seed_catalog())
    }

    /// Loads a JSON array of releases.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read release file '{}'", path.display()))?;
        let releases: Vec<MovieRelease> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse release file '{}'", path.display()))?;
        debug!(count = releases.len(), path = %path.display(), "loaded release file");
        Ok(Self::new(releases))
    }

    pub async fn replace_all(&self, releases: Vec<MovieRelease>) {
        *self.releases.write().await = releases;
    }

    pub async fn all(&self) -> Vec<MovieRelease> {
        self.releases.read().await.clone()
    }
}

#[async_trait]
impl ReleaseRepository for InMemoryReleaseRepository {
    async fn releases_for_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MovieRelease>> {
        ensure!(start <= end, "invalid release range {start}..={end}");
        let guard = self.releases.read().await;
        Ok(guard
            .iter()
            .filter(|release| (start..=end).contains(&release.release_date))
            .cloned()
            .collect())
    }
}

/// Remote side of the per-movie release notification flag.
#[async_trait]
pub trait SubscriptionBackend: Send + Sync {
    async fn set_subscription(&self, user_id: UserId, movie_id: &MovieId, enabled: bool)
        -> Result<()>;
}

pub struct MissingSubscriptionBackend;

#[async_trait]
impl SubscriptionBackend for MissingSubscriptionBackend {
    async fn set_subscription(
        &self,
        user_id: UserId,
        movie_id: &MovieId,
        _enabled: bool,
    ) -> Result<()> {
        Err(anyhow!(
            "subscription backend unavailable for user {} movie {movie_id}",
            user_id.0
        ))
    }
}

/// Accepts every change and remembers the last confirmed value.
#[derive(Default)]
pub struct LocalSubscriptionBackend {
    confirmed: Mutex<HashMap<(UserId, MovieId), bool>>,
}

impl LocalSubscriptionBackend {
    pub async fn confirmed(&self, user_id: UserId, movie_id: &MovieId) -> Option<bool> {
        self.confirmed
            .lock()
            .await
            .get(&(user_id, movie_id.clone()))
            .copied()
    }
}

#[async_trait]
impl SubscriptionBackend for LocalSubscriptionBackend {
    async fn set_subscription(
        &self,
        user_id: UserId,
        movie_id: &MovieId,
        enabled: bool,
    ) -> Result<()> {
        self.confirmed
            .lock()
            .await
            .insert((user_id, movie_id.clone()), enabled);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
