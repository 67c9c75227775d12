//! SessionSweeper - background eviction of idle sessions.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `idle_ttl` | 24h | Sessions untouched for longer are dropped |
//! | `interval` | 5m | How often the store is swept |
//!
//! An evicted user simply starts over from `Idle` on the next event.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::Timestamp;
use crate::ports::SessionStore;

/// Configuration for the SessionSweeper.
#[derive(Debug, Clone)]
pub struct SessionSweeperConfig {
    pub idle_ttl: Duration,
    pub interval: Duration,
}

impl Default for SessionSweeperConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(24 * 60 * 60),
            interval: Duration::from_secs(5 * 60),
        }
    }
}

impl SessionSweeperConfig {
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = ttl;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Periodically evicts sessions idle for longer than the configured TTL.
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    config: SessionSweeperConfig,
}

impl SessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, config: SessionSweeperConfig) -> Self {
        Self { store, config }
    }

    /// Runs the sweep loop until the shutdown signal flips to `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        // The first tick completes immediately; skip it so a fresh process
        // does not sweep an empty store.
        interval.tick().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Session sweeper stopping");
                        return;
                    }
                }
                _ = interval.tick() => {
                    self.sweep_once();
                }
            }
        }
    }

    /// Evicts idle sessions once. Returns how many were dropped.
    pub fn sweep_once(&self) -> usize {
        let cutoff = Timestamp::now().minus_secs(self.config.idle_ttl.as_secs());
        let evicted = self.store.evict_idle(cutoff);
        if evicted > 0 {
            tracing::info!(evicted, remaining = self.store.len(), "Evicted idle sessions");
        }
        evicted
    }
}
