/// Graphics device module - capability traits consumed by the engine core

// Module declarations
pub mod types;
pub mod resources;
pub mod device;
pub mod device_context;
pub mod swapchain;
pub mod headless;

// Re-export everything
pub use types::*;
pub use resources::*;
pub use device::*;
pub use device_context::*;
pub use swapchain::*;
pub use headless::{HeadlessBackend, HeadlessDevice, HeadlessDeviceContext, HeadlessSwapChain, RecordedCommand};
