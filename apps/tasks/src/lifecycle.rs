//! Ordered release of long-lived resources.
//!
//! Startup registers a stop hook right after each resource is acquired.
//! [`Lifecycle::stop`] runs the hooks newest first, so the listener drains
//! before the pool it depends on is closed.

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;
use tracing::{error, info};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

type StopHook = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), BoxError>> + Send>;

/// A stop hook that failed. Carries the first failure only.
#[derive(Debug, Error)]
#[error("failed to stop {name}: {source}")]
pub struct LifecycleError {
    pub name: &'static str,
    #[source]
    pub source: BoxError,
}

#[derive(Default)]
pub struct Lifecycle {
    hooks: Vec<(&'static str, StopHook)>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` to release the resource called `name`.
    pub fn register<F, Fut, E>(&mut self, name: &'static str, hook: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        let hook: StopHook =
            Box::new(move || hook().map(|r| r.map_err(Into::<BoxError>::into)).boxed());
        self.hooks.push((name, hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs every registered hook in reverse order.
    ///
    /// A failing hook does not stop the remaining ones. Hooks run at most
    /// once; calling `stop` again is a no-op.
    pub async fn stop(&mut self) -> Result<(), LifecycleError> {
        let mut first_error = None;

        while let Some((name, hook)) = self.hooks.pop() {
            info!(resource = name, "Stopping");
            match hook().await {
                Ok(()) => info!(resource = name, "Stopped"),
                Err(source) => {
                    error!(resource = name, error = %source, "Failed to stop");
                    first_error.get_or_insert(LifecycleError { name, source });
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.hooks.iter().map(|(name, _)| *name).collect();
        f.debug_struct("Lifecycle").field("hooks", &names).finish()
    }
}
