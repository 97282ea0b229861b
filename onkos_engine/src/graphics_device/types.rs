/// Descriptors and enums shared by the device capability traits

use bitflags::bitflags;

/// Memory usage class of a GPU resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// GPU read/write, CPU updates through `update_subresource`
    Default,
    /// GPU read-only, contents fixed at creation
    Immutable,
    /// GPU read-only, CPU writes every frame
    Dynamic,
    /// CPU readback
    Staging,
}

bitflags! {
    /// Pipeline stages a buffer or texture may be bound to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER   = 1 << 0;
        const INDEX_BUFFER    = 1 << 1;
        const CONSTANT_BUFFER = 1 << 2;
        const SHADER_RESOURCE = 1 << 3;
        const RENDER_TARGET   = 1 << 5;
        const DEPTH_STENCIL   = 1 << 6;
    }
}

bitflags! {
    /// CPU access granted on a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuAccessFlags: u32 {
        const WRITE = 1 << 16;
        const READ  = 1 << 17;
    }
}

bitflags! {
    /// Which planes of a depth-stencil view to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const DEPTH   = 1 << 0;
        const STENCIL = 1 << 1;
    }
}

/// Descriptor for allocating a GPU buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub byte_width: u32,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access: CpuAccessFlags,
}

/// Region of a buffer targeted by an update (byte range on the X axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferRegion {
    pub left: u32,
    pub right: u32,
}

impl BufferRegion {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }
}

/// Element format for vertex attributes, index data and textures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Format {
    R32G32B32A32_FLOAT,
    R32G32B32_FLOAT,
    R32G32_FLOAT,
    R32_UINT,
    R16_UINT,
    R8G8B8A8_UNORM,
    D24_UNORM_S8_UINT,
}

impl Format {
    /// Size in bytes of one element
    pub fn size_bytes(&self) -> u32 {
        match self {
            Format::R32G32B32A32_FLOAT => 16,
            Format::R32G32B32_FLOAT => 12,
            Format::R32G32_FLOAT => 8,
            Format::R32_UINT => 4,
            Format::R16_UINT => 2,
            Format::R8G8B8A8_UNORM => 4,
            Format::D24_UNORM_S8_UINT => 4,
        }
    }
}

/// Index element type for index buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

/// How the input assembler groups vertices into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

/// Programmable shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

/// Rasterizer viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-target viewport with the standard 0..1 depth range
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            top_left_x: 0.0,
            top_left_y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// One attribute of an input layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElementDesc {
    pub semantic_name: &'static str,
    pub semantic_index: u32,
    pub format: Format,
    pub input_slot: u32,
    pub aligned_byte_offset: u32,
}

/// Compiled shader bytecode produced by the external shader compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBytecode {
    pub entry_point: String,
    pub bytes: Vec<u8>,
}

impl ShaderBytecode {
    pub fn new(entry_point: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { entry_point: entry_point.into(), bytes }
    }
}

/// Descriptor for creating a 2D texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub usage: Usage,
    pub bind_flags: BindFlags,
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    MinMagMipPoint,
    MinMagMipLinear,
    Anisotropic,
}

/// Texture addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Wrap,
    Mirror,
    Clamp,
}

/// Descriptor for creating a sampler state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    pub filter: Filter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    pub min_lod: f32,
    pub max_lod: f32,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            filter: Filter::MinMagMipLinear,
            address_u: AddressMode::Wrap,
            address_v: AddressMode::Wrap,
            address_w: AddressMode::Wrap,
            min_lod: 0.0,
            max_lod: f32::MAX,
        }
    }
}
