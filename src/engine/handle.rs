//! Lazy, exactly-once engine lifecycle management

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::engine::traits::DiffusionEngine;
use crate::error::{AppError, Result};

/// Constructs the engine. Runs on the blocking pool: loading a
/// multi-hundred-MB model artifact is blocking disk I/O.
type Loader = dyn Fn() -> Result<Arc<dyn DiffusionEngine>> + Send + Sync;

/// Outcome of the single construction attempt. Errors are kept as the
/// stringified reason so every later caller sees the same failure.
type Slot = std::result::Result<Arc<dyn DiffusionEngine>, String>;

/// Owns the lifecycle of the single engine instance.
///
/// `acquire` is safe to call from any number of tasks: the first caller runs
/// the loader, callers arriving during initialization await the same attempt,
/// and everyone observes the same outcome. Construction happens at most once
/// per process; a failed construction is sticky until restart.
pub struct EngineHandle {
    loader: Arc<Loader>,
    slot: OnceCell<Slot>,
}

impl EngineHandle {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn DiffusionEngine>> + Send + Sync + 'static,
    {
        Self {
            loader: Arc::new(loader),
            slot: OnceCell::new(),
        }
    }

    /// Get the engine, constructing it on first use.
    ///
    /// Once the slot holds a value this is a pure lookup.
    pub async fn acquire(&self) -> Result<Arc<dyn DiffusionEngine>> {
        let slot = self
            .slot
            .get_or_init(|| {
                let loader = self.loader.clone();
                async move {
                    info!("Loading generation engine");
                    match tokio::task::spawn_blocking(move || loader()).await {
                        Ok(Ok(engine)) => {
                            info!("Generation engine ready");
                            Ok(engine)
                        }
                        Ok(Err(e)) => {
                            error!(error = %e, "Engine initialization failed");
                            Err(e.to_string())
                        }
                        Err(e) => {
                            error!(error = %e, "Engine loader task aborted");
                            Err(format!("engine loader task aborted: {}", e))
                        }
                    }
                }
            })
            .await;

        match slot {
            Ok(engine) => Ok(engine.clone()),
            Err(reason) => Err(AppError::EngineInit(reason.clone())),
        }
    }

    /// Whether the engine finished construction successfully.
    pub fn is_ready(&self) -> bool {
        matches!(self.slot.get(), Some(Ok(_)))
    }
}
