//! Per-movie release notification flags.
//!
//! [`NotificationToggles::toggle`] is the purely local optimistic flip.
//! [`NotificationSync`] reconciles the same state with a
//! [`SubscriptionBackend`], keeping a change pending until the backend
//! confirms it and rolling back on failure.

use std::{collections::HashMap, sync::Arc};

use release_source::{LocalSubscriptionBackend, SubscriptionBackend};
use serde::{Deserialize, Serialize};
use shared::domain::{MovieId, UserId};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::CalendarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Subscription {
    #[default]
    Unsubscribed,
    Pending {
        target: bool,
    },
    Subscribed,
}

impl Subscription {
    fn settled(enabled: bool) -> Self {
        if enabled {
            Self::Subscribed
        } else {
            Self::Unsubscribed
        }
    }

    /// What the bell icon shows. A pending change displays its target.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Subscribed | Self::Pending { target: true })
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    user_id: UserId,
    movie_id: MovieId,
    previous: bool,
    target: bool,
}

impl PendingToggle {
    pub fn target(&self) -> bool {
        self.target
    }
}

#[derive(Debug, Default)]
pub struct NotificationToggles {
    entries: HashMap<(UserId, MovieId), Subscription>,
}

impl NotificationToggles {
    pub fn state(&self, user_id: UserId, movie_id: &MovieId) -> Subscription {
        self.entries
            .get(&(user_id, movie_id.clone()))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_enabled(&self, user_id: UserId, movie_id: &MovieId) -> bool {
        self.state(user_id, movie_id).is_enabled()
    }

    /// Flips the local flag and returns the new value.
    pub fn toggle(&mut self, user_id: UserId, movie_id: &MovieId) -> bool {
        let enabled = !self.is_enabled(user_id, movie_id);
        self.entries
            .insert((user_id, movie_id.clone()), Subscription::settled(enabled));
        enabled
    }

    pub fn begin_toggle(
        &mut self,
        user_id: UserId,
        movie_id: &MovieId,
    ) -> Result<PendingToggle, CalendarError> {
        let current = self.state(user_id, movie_id);
        if current.is_pending() {
            return Err(CalendarError::TogglePending(movie_id.clone()));
        }
        let previous = current.is_enabled();
        let target = !previous;
        self.entries
            .insert((user_id, movie_id.clone()), Subscription::Pending { target });
        Ok(PendingToggle {
            user_id,
            movie_id: movie_id.clone(),
            previous,
            target,
        })
    }

    /// Settles a pending change at its target value.
    pub fn commit(&mut self, pending: PendingToggle) -> bool {
        self.settle(pending.user_id, pending.movie_id, pending.target, pending.target)
    }

    /// Restores the value from before the pending change.
    pub fn rollback(&mut self, pending: PendingToggle) -> bool {
        self.settle(pending.user_id, pending.movie_id, pending.target, pending.previous)
    }

    fn settle(&mut self, user_id: UserId, movie_id: MovieId, target: bool, value: bool) -> bool {
        let key = (user_id, movie_id);
        let entry = self.entries.entry(key).or_default();
        if *entry != (Subscription::Pending { target }) {
            // Superseded by a local toggle.
            return entry.is_enabled();
        }
        *entry = Subscription::settled(value);
        value
    }
}

pub struct NotificationSync {
    backend: Arc<dyn SubscriptionBackend>,
    toggles: Mutex<NotificationToggles>,
}

impl NotificationSync {
    pub fn new(backend: Arc<dyn SubscriptionBackend>) -> Self {
        Self {
            backend,
            toggles: Mutex::new(NotificationToggles::default()),
        }
    }

    pub fn local() -> Self {
        Self::new(Arc::new(LocalSubscriptionBackend::default()))
    }

    pub async fn state(&self, user_id: UserId, movie_id: &MovieId) -> Subscription {
        self.toggles.lock().await.state(user_id, movie_id)
    }

    /// Shows the new value immediately, then confirms it with the backend.
    /// On failure the previous value is restored and the error returned.
    pub async fn toggle(&self, user_id: UserId, movie_id: &MovieId) -> Result<bool, CalendarError> {
        let pending = self.toggles.lock().await.begin_toggle(user_id, movie_id)?;
        let target = pending.target();
        match self
            .backend
            .set_subscription(user_id, movie_id, target)
            .await
        {
            Ok(()) => {
                debug!(user_id = user_id.0, %movie_id, enabled = target, "notification change confirmed");
                Ok(self.toggles.lock().await.commit(pending))
            }
            Err(err) => {
                warn!(user_id = user_id.0, %movie_id, error = %err, "notification change rolled back");
                self.toggles.lock().await.rollback(pending);
                Err(CalendarError::Subscription(format!("{err:#}")))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/notification_tests.rs"]
mod tests;
