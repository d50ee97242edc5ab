//! Common trait and types for diffusion engines

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A fully normalized generation job. Built once by the gateway from the
/// incoming request; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    /// The prompt to generate an image from
    pub prompt: String,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Number of sampling steps (turbo models want 1-4)
    pub steps: u32,

    /// Classifier-free guidance scale
    pub cfg_scale: f32,
}

/// A single generated image
#[derive(Debug, Clone)]
pub struct EngineImage {
    /// Encoded image bytes
    pub bytes: Vec<u8>,

    /// Encoding of `bytes`, e.g. "png"
    pub format: &'static str,
}

/// The opaque generation capability.
///
/// Implementations wrap a loaded model and are NOT required to tolerate
/// concurrent `generate` calls; every call site must hold the
/// [`GenerationGate`](crate::engine::GenerationGate) for the duration of the
/// call. The gateway is the only production call site.
#[async_trait]
pub trait DiffusionEngine: Send + Sync {
    /// Run one generation job to completion.
    ///
    /// May return zero images; the caller decides how to surface that.
    async fn generate(&self, job: &GenerationJob) -> Result<Vec<EngineImage>>;
}
