//! Engine module - Trait, lifecycle handle, serialization gate, and the
//! placeholder sampler

pub mod gate;
pub mod handle;
pub mod placeholder;
pub mod traits;

pub use gate::GenerationGate;
pub use handle::EngineHandle;
pub use placeholder::PlaceholderEngine;
pub use traits::{DiffusionEngine, EngineImage, GenerationJob};
