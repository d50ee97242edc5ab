//! Placeholder diffusion engine
//!
//! Stands in for a native sampler binding so the gateway runs end-to-end
//! without GPU or model weights: `load` performs the same artifact checks a
//! real loader would, and `generate` emits a fixed, valid PNG. Swapping in a
//! real sampler means implementing [`DiffusionEngine`] and changing the
//! loader wired up in `main.rs`.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::engine::traits::{DiffusionEngine, EngineImage, GenerationJob};
use crate::error::{AppError, Result};

/// GGUF weight quantizations the sampler understands.
const KNOWN_WEIGHT_TYPES: &[&str] = &["q4_0", "q4_1", "q5_0", "q5_1", "q8_0", "f16", "f32"];

/// A minimal valid PNG (1x1 RGBA pixel), returned for every job.
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0xFC,
    0xCF, 0xC0, 0x50, 0x0F, 0x00, 0x04, 0x85, 0x01, 0x80, 0x84, 0xA9, 0x8C, 0x21, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Debug)]
pub struct PlaceholderEngine {
    model_path: String,
}

impl PlaceholderEngine {
    /// "Load" the model: verify the artifact exists and the weight type is a
    /// quantization we could actually map onto it.
    pub fn load(model_path: &str, weight_type: &str) -> Result<Self> {
        if !Path::new(model_path).is_file() {
            return Err(AppError::EngineInit(format!(
                "model artifact not found: {}",
                model_path
            )));
        }

        if !KNOWN_WEIGHT_TYPES.contains(&weight_type) {
            return Err(AppError::EngineInit(format!(
                "unknown weight type '{}', expected one of {}",
                weight_type,
                KNOWN_WEIGHT_TYPES.join(", ")
            )));
        }

        Ok(Self {
            model_path: model_path.to_string(),
        })
    }
}

#[async_trait]
impl DiffusionEngine for PlaceholderEngine {
    async fn generate(&self, job: &GenerationJob) -> Result<Vec<EngineImage>> {
        debug!(
            model = %self.model_path,
            width = job.width,
            height = job.height,
            steps = job.steps,
            "placeholder sampler invoked"
        );

        Ok(vec![EngineImage {
            bytes: PIXEL_PNG.to_vec(),
            format: "png",
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_artifact() {
        let err = PlaceholderEngine::load("/nonexistent/model.gguf", "q4_0").unwrap_err();
        assert!(matches!(err, AppError::EngineInit(_)));
    }

    #[test]
    fn test_load_rejects_unknown_weight_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GGUF").unwrap();

        let path = file.path().to_str().unwrap();
        let err = PlaceholderEngine::load(path, "q3_k_s").unwrap_err();
        assert!(matches!(err, AppError::EngineInit(_)));
    }

    #[tokio::test]
    async fn test_generate_emits_png() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GGUF").unwrap();

        let engine = PlaceholderEngine::load(file.path().to_str().unwrap(), "q4_0").unwrap();
        let job = GenerationJob {
            prompt: "fantasy art".to_string(),
            width: 512,
            height: 512,
            steps: 1,
            cfg_scale: 1.0,
        };

        let images = engine.generate(&job).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].format, "png");
        assert!(crate::response::is_png(&images[0].bytes));
    }
}
