//! Shared test fixtures: probe engines and state builders

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sd_turbo_gateway::config::Settings;
use sd_turbo_gateway::engine::{
    DiffusionEngine, EngineHandle, EngineImage, GenerationGate, GenerationJob,
};
use sd_turbo_gateway::error::{AppError, Result};
use sd_turbo_gateway::gateway::GenerationGateway;
use sd_turbo_gateway::AppState;

/// Minimal PNG-signature-bearing payload for probe engines.
pub fn png_stub() -> Vec<u8> {
    vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01, 0x02, 0x03]
}

/// Engine that records call overlap, for checking mutual exclusion.
pub struct ProbeEngine {
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
    pub delay: Duration,
}

impl ProbeEngine {
    pub fn new(delay: Duration) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            delay,
        }
    }
}

#[async_trait]
impl DiffusionEngine for ProbeEngine {
    async fn generate(&self, _job: &GenerationJob) -> Result<Vec<EngineImage>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(vec![EngineImage {
            bytes: png_stub(),
            format: "png",
        }])
    }
}

/// Engine that always fails.
pub struct FailingEngine;

#[async_trait]
impl DiffusionEngine for FailingEngine {
    async fn generate(&self, _job: &GenerationJob) -> Result<Vec<EngineImage>> {
        Err(AppError::Generation("sampler exploded".to_string()))
    }
}

/// Engine that returns zero images.
pub struct EmptyEngine;

#[async_trait]
impl DiffusionEngine for EmptyEngine {
    async fn generate(&self, _job: &GenerationJob) -> Result<Vec<EngineImage>> {
        Ok(vec![])
    }
}

/// Engine that fails on the first call and succeeds afterwards.
pub struct FlakyEngine {
    failed_once: AtomicBool,
}

impl FlakyEngine {
    pub fn new() -> Self {
        Self {
            failed_once: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl DiffusionEngine for FlakyEngine {
    async fn generate(&self, _job: &GenerationJob) -> Result<Vec<EngineImage>> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(AppError::Generation("first call fails".to_string()));
        }
        Ok(vec![EngineImage {
            bytes: png_stub(),
            format: "png",
        }])
    }
}

/// Build a gateway around a ready-made engine.
pub fn test_gateway(engine: Arc<dyn DiffusionEngine>) -> GenerationGateway {
    let handle = Arc::new(EngineHandle::new(move || Ok(engine.clone())));
    let gate = Arc::new(GenerationGate::new());
    GenerationGateway::new(handle, gate, Settings::default().sampling)
}

/// Build full application state around a ready-made engine.
pub fn test_state(engine: Arc<dyn DiffusionEngine>) -> Arc<AppState> {
    let settings = Settings::default();
    let handle = Arc::new(EngineHandle::new(move || Ok(engine.clone())));
    let gate = Arc::new(GenerationGate::new());
    let gateway = Arc::new(GenerationGateway::new(handle, gate, settings.sampling.clone()));

    Arc::new(AppState { settings, gateway })
}

/// Build application state whose engine never constructs.
pub fn broken_state(reason: &str) -> Arc<AppState> {
    let settings = Settings::default();
    let reason = reason.to_string();
    let handle = Arc::new(EngineHandle::new(move || {
        Err(AppError::EngineInit(reason.clone()))
    }));
    let gate = Arc::new(GenerationGate::new());
    let gateway = Arc::new(GenerationGateway::new(handle, gate, settings.sampling.clone()));

    Arc::new(AppState { settings, gateway })
}
