//! Gateway module - End-to-end request orchestration

pub mod generation;

pub use generation::{GenerationGateway, ImagePayload, ImagesRequest, ImagesResponse};
