/*!
# Onkos Engine

Mesh ingestion and per-frame draw sequencing over a stateful, immediate-mode
graphics API.

The crate never talks to a GPU directly. It consumes three capability traits
(`Device`, `DeviceContext`, `SwapChain`) and ships a headless recording
backend implementing them, used by the tests and by the demo.

## Architecture

- **ObjMeshLoader**: OBJ text to deduplicated `MeshData`
- **GpuBuffer**: vertex, index or constant buffer with a fixed binding contract
- **PipelineBinder**: fixed bind sequence run before every draw
- **FrameOrchestrator**: update then render, once per frame
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod resource;
pub mod pipeline;
pub mod frame;

// Main onkos namespace module
pub mod onkos {
    // Error types
    pub use crate::error::{Error, Result, NativeError, NativeResult};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod config {
        pub use crate::config::*;
    }

    // Device capability traits and the headless backend
    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod pipeline {
        pub use crate::pipeline::*;
    }

    pub mod frame {
        pub use crate::frame::*;
    }
}

// Re-export math library at crate root
pub use glam;
