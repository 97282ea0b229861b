/// Opaque native resource handles
///
/// Each handle trait is implemented by a backend object that releases its
/// native memory when dropped. Shaders, views, layouts and samplers are shared
/// as `Arc<dyn ...>`; a `NativeBuffer` is owned as `Box<dyn NativeBuffer>` by
/// exactly one `GpuBuffer`.

use std::fmt;
use crate::graphics_device::{BufferDesc, ShaderStage, TextureDesc};

/// Backend-assigned identity of a native object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// GPU memory allocation
pub trait NativeBuffer: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
    /// Descriptor the buffer was allocated with
    fn desc(&self) -> &BufferDesc;
}

/// 2D texture (back buffer, depth buffer, sampled image)
pub trait NativeTexture: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
    fn desc(&self) -> &TextureDesc;
}

/// Compiled shader object
pub trait Shader: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
    fn stage(&self) -> ShaderStage;
}

/// Vertex input layout matched against a vertex shader signature
pub trait InputLayout: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
    /// Byte stride of one vertex described by the layout
    fn stride(&self) -> u32;
}

/// Texture view readable by the pixel stage
pub trait ShaderResourceView: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
}

pub trait SamplerState: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
}

pub trait RenderTargetView: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
}

pub trait DepthStencilView: Send + Sync + fmt::Debug {
    fn id(&self) -> ResourceId;
}
