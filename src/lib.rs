//! Single-Engine Image Generation Gateway
//!
//! An OpenAI-compatible HTTP gateway in front of one local diffusion engine.
//! The engine is expensive to construct and not safe for concurrent use, so
//! the crate centers on two pieces: a lazily initialized engine handle
//! (exactly one construction, sticky failure) and a serialization gate
//! (at most one generation in flight at a time).

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod response;

pub use error::{AppError, Result};

use std::sync::Arc;

use gateway::GenerationGateway;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: config::Settings,
    pub gateway: Arc<GenerationGateway>,
}
