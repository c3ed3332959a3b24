//! Application state management
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use webterm_core::{
    Config, Console, CoreError, PermissionSet, Result, TreeClient, TreeError, TreeNode,
};

/// A mounted view and the last time a request touched it
struct ViewEntry {
    console: Console,
    last_seen: Instant,
}

impl ViewEntry {
    fn touch(&mut self) -> &mut Console {
        self.last_seen = Instant::now();
        &mut self.console
    }
}

/// Thread-safe application state wrapper
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    /// Mounted views by view id
    views: Arc<RwLock<HashMap<String, ViewEntry>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            views: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Grants for a request presenting `token` as `X-Token`
    pub fn permissions_for(&self, token: Option<&str>) -> PermissionSet {
        self.config.permissions_for(token)
    }

    /// Mount a new view and return its id. The host tree is not requested
    /// here, see `spawn_tree_fetch`.
    pub fn mount(&self, permissions: PermissionSet) -> Result<String> {
        let console = Console::mount(&self.config, permissions)?;
        let view_id = Uuid::new_v4().to_string();

        self.views.write().insert(
            view_id.clone(),
            ViewEntry {
                console,
                last_seen: Instant::now(),
            },
        );
        tracing::info!(view_id = %view_id, "Mounted console view");

        Ok(view_id)
    }

    pub fn unmount(&self, view_id: &str) -> bool {
        let removed = self.views.write().remove(view_id).is_some();
        if removed {
            tracing::info!(view_id = %view_id, "Unmounted console view");
        }
        removed
    }

    pub fn view_count(&self) -> usize {
        self.views.read().len()
    }

    /// Read access to a view. Counts as activity for the idle sweep.
    pub fn with_view<F, T>(&self, view_id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Console) -> Result<T>,
    {
        let mut guard = self.views.write();
        match guard.get_mut(view_id) {
            Some(entry) => f(entry.touch()),
            None => Err(CoreError::NotMounted(view_id.to_string())),
        }
    }

    pub fn with_view_mut<F, T>(&self, view_id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Console) -> Result<T>,
    {
        let mut guard = self.views.write();
        match guard.get_mut(view_id) {
            Some(entry) => f(entry.touch()),
            None => Err(CoreError::NotMounted(view_id.to_string())),
        }
    }

    /// Deliver a tree fetch result. Returns false when the view was torn
    /// down before the request finished; the result is dropped.
    pub fn finish_tree_fetch(
        &self,
        view_id: &str,
        result: std::result::Result<Vec<TreeNode>, TreeError>,
    ) -> bool {
        match self.views.write().get_mut(view_id) {
            Some(entry) => {
                entry.console.finish_tree_fetch(result);
                true
            }
            None => {
                tracing::debug!(view_id = %view_id, "Dropped tree for unmounted view");
                false
            }
        }
    }

    /// Request the host tree in the background for `view_id`
    pub fn spawn_tree_fetch(&self, view_id: String) {
        let state = self.clone();
        let client = TreeClient::new(
            &self.config.api_base,
            self.config.api_token.clone(),
            self.config.fetch_timeout(),
        );

        tokio::spawn(async move {
            let result = match client {
                Ok(client) => client.fetch_tree().await,
                Err(e) => Err(e),
            };
            state.finish_tree_fetch(&view_id, result);
        });
    }

    /// Drop views idle for longer than the configured timeout, as seen at
    /// `now`. Returns how many were dropped.
    pub fn sweep_idle(&self, now: Instant) -> usize {
        let timeout = self.config.view_idle_timeout();
        let mut views = self.views.write();
        let before = views.len();

        views.retain(|view_id, entry| {
            let keep = now.saturating_duration_since(entry.last_seen) <= timeout;
            if !keep {
                tracing::info!(view_id = %view_id, "Dropped idle console view");
            }
            keep
        });

        before - views.len()
    }

    /// Run `sweep_idle` periodically for the life of the process
    pub fn spawn_idle_sweeper(&self) {
        let state = self.clone();
        let period = (self.config.view_idle_timeout() / 4).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let dropped = state.sweep_idle(Instant::now());
                if dropped > 0 {
                    tracing::debug!(dropped, remaining = state.view_count(), "Idle sweep");
                }
            }
        });
    }
}
