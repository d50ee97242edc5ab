//! One-request orchestration: normalize, serialize engine access, respond

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::SamplingConfig;
use crate::engine::{EngineHandle, GenerationGate, GenerationJob};
use crate::error::{AppError, Result};
use crate::response;

/// Incoming request body for `POST /v1/images/generations`. Everything is
/// optional; missing or malformed input degrades to defaults rather than
/// failing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImagesRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    /// Accepted for OpenAI compatibility but not honored; generation always
    /// runs at the configured operating resolution.
    #[serde(default)]
    pub size: Option<String>,
}

/// Successful response envelope, OpenAI images API shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub data: Vec<ImagePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePayload {
    pub b64_json: String,
}

const DEFAULT_PROMPT: &str = "fantasy art";

/// Orchestrates one generation request end-to-end. Holds the only production
/// path into the engine, and always routes it through the gate.
pub struct GenerationGateway {
    engine: Arc<EngineHandle>,
    gate: Arc<GenerationGate>,
    sampling: SamplingConfig,
}

impl GenerationGateway {
    pub fn new(
        engine: Arc<EngineHandle>,
        gate: Arc<GenerationGate>,
        sampling: SamplingConfig,
    ) -> Self {
        Self {
            engine,
            gate,
            sampling,
        }
    }

    /// Handle one request: normalize, acquire the engine, generate inside the
    /// gate, encode the first image.
    pub async fn handle(&self, request: ImagesRequest) -> Result<ImagesResponse> {
        let job = self.normalize(&request);

        info!(
            prompt = %prompt_prefix(&job.prompt),
            width = job.width,
            height = job.height,
            "Generating image"
        );

        // Initialization failures surface here without touching the gate.
        let engine = self.engine.acquire().await?;

        let outcome = self
            .gate
            .with_exclusive(async { engine.generate(&job).await })
            .await;

        let images = match outcome {
            Ok(images) => images,
            Err(e) => {
                error!(
                    error = %e,
                    prompt = %prompt_prefix(&job.prompt),
                    width = job.width,
                    height = job.height,
                    "Generation failed"
                );
                // The engine already speaks AppError; re-wrapping here would
                // double the "Generation failed" prefix on the wire.
                return Err(e);
            }
        };

        let first = images.into_iter().next().ok_or(AppError::EmptyResult)?;

        info!("Generated image successfully");

        Ok(ImagesResponse {
            data: vec![ImagePayload {
                b64_json: response::base64::encode(&first.bytes),
            }],
        })
    }

    /// Build the immutable job from the raw request. The prompt falls back to
    /// a default; dimensions, steps and guidance come from the configured
    /// operating point, never from the client.
    pub fn normalize(&self, request: &ImagesRequest) -> GenerationJob {
        let prompt = match &request.prompt {
            Some(p) if !p.trim().is_empty() => p.clone(),
            _ => DEFAULT_PROMPT.to_string(),
        };

        if let Some(size) = &request.size {
            let operating = format!("{}x{}", self.sampling.width, self.sampling.height);
            if !size.eq_ignore_ascii_case(&operating) {
                warn!(
                    requested = %size,
                    operating = %operating,
                    "Requested size ignored; the model runs at a fixed resolution"
                );
            }
        }

        GenerationJob {
            prompt,
            width: self.sampling.width,
            height: self.sampling.height,
            steps: self.sampling.steps,
            cfg_scale: self.sampling.cfg_scale,
        }
    }
}

/// First 50 characters of the prompt, for log lines.
fn prompt_prefix(prompt: &str) -> String {
    prompt.chars().take(50).collect()
}
