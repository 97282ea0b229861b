/// Frame module - update/render cadence over the uploaded meshes

pub mod frame_orchestrator;

pub use frame_orchestrator::*;
