//! Configuration module

pub mod settings;

pub use settings::{LoggingConfig, ModelConfig, SamplingConfig, ServerConfig, Settings};
