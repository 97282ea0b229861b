/// GPU buffer wrapper (vertex, index or constant data)
///
/// Architecture:
/// - BufferKind: the binding contract, chosen at creation and never changed
/// - The native allocation is owned by exactly one `GpuBuffer` and released
///   when the buffer is destroyed or dropped
/// - A default-constructed buffer holds nothing; binding or updating it fails
///   with `PreconditionError` without touching the device context

use std::fmt;
use bytemuck::Pod;
use crate::error::{Error, NativeError, Result};
use crate::graphics_device::{
    BindFlags, BufferDesc, BufferRegion, CpuAccessFlags, Device, DeviceContext,
    IndexFormat, NativeBuffer, ResourceId, ShaderStage, Usage,
};
use crate::resource::mesh::{MeshData, Vertex};
use crate::{engine_bail, engine_debug, engine_error};

const LOG_SOURCE: &str = "onkos::GpuBuffer";

// ===== ROLE / KIND =====

/// Binding purpose requested at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRole {
    Vertex,
    Index,
    Constant,
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferRole::Vertex => write!(f, "vertex"),
            BufferRole::Index => write!(f, "index"),
            BufferRole::Constant => write!(f, "constant"),
        }
    }
}

/// Per-role binding contract of a created buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Bound to the input assembler with its own stride
    Vertex { stride: u32, offset: u32 },
    /// Bound to the input assembler as the index buffer
    Index { offset: u32 },
    /// Bound to a vertex- or pixel-stage constant buffer slot
    Constant,
}

impl BufferKind {
    pub fn role(&self) -> BufferRole {
        match self {
            BufferKind::Vertex { .. } => BufferRole::Vertex,
            BufferKind::Index { .. } => BufferRole::Index,
            BufferKind::Constant => BufferRole::Constant,
        }
    }
}

// ===== BIND PARAMS =====

/// Where and how `GpuBuffer::bind` attaches the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindParams {
    /// First slot (vertex input slot or constant buffer register)
    pub start_slot: u32,
    /// Target stage for constant buffers
    pub stage: ShaderStage,
    /// Element type for index buffers
    pub index_format: IndexFormat,
}

impl Default for BindParams {
    fn default() -> Self {
        Self { start_slot: 0, stage: ShaderStage::Vertex, index_format: IndexFormat::U32 }
    }
}

impl BindParams {
    pub fn slot(start_slot: u32) -> Self {
        Self { start_slot, ..Self::default() }
    }

    pub fn stage(mut self, stage: ShaderStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn index_format(mut self, index_format: IndexFormat) -> Self {
        self.index_format = index_format;
        self
    }
}

// ===== GPU BUFFER =====

#[derive(Debug, Default)]
pub struct GpuBuffer {
    name: String,
    kind: Option<BufferKind>,
    native: Option<Box<dyn NativeBuffer>>,
}

impl GpuBuffer {
    /// Create a vertex or index buffer from mesh data
    ///
    /// Vertex buffers hold `mesh.vertices()` with a stride of `size_of::<Vertex>()`,
    /// index buffers hold `mesh.indices()` as 32-bit unsigned integers.
    ///
    /// # Errors
    ///
    /// - `PreconditionError` for `BufferRole::Constant` (use `create_dynamic`)
    /// - `CreationError` if the device is not ready or the allocation fails
    pub fn create_from_mesh(device: &mut dyn Device, mesh: &MeshData, role: BufferRole) -> Result<Self> {
        let (kind, bind_flags, data, stride) = match role {
            BufferRole::Vertex => (
                BufferKind::Vertex { stride: Vertex::STRIDE, offset: 0 },
                BindFlags::VERTEX_BUFFER,
                mesh.vertex_bytes(),
                Vertex::STRIDE,
            ),
            BufferRole::Index => (
                BufferKind::Index { offset: 0 },
                BindFlags::INDEX_BUFFER,
                mesh.index_bytes(),
                IndexFormat::U32.size_bytes(),
            ),
            BufferRole::Constant => {
                engine_bail!(LOG_SOURCE, "create_from_mesh: mesh '{}' cannot back a constant buffer",
                    mesh.name);
            }
        };

        let element_count = match role {
            BufferRole::Vertex => mesh.vertex_count(),
            _ => mesh.index_count(),
        };
        let desc = BufferDesc {
            byte_width: stride * element_count,
            usage: Usage::Default,
            bind_flags,
            cpu_access: CpuAccessFlags::empty(),
        };
        let name = format!("{}.{}", mesh.name, role);
        Self::allocate(device, name, kind, &desc, Some(data))
    }

    /// Create an updatable constant buffer of exactly `byte_width` bytes
    ///
    /// The buffer starts zeroed and is meant to be rewritten every frame.
    pub fn create_dynamic(device: &mut dyn Device, byte_width: u32) -> Result<Self> {
        let desc = BufferDesc {
            byte_width,
            usage: Usage::Dynamic,
            bind_flags: BindFlags::CONSTANT_BUFFER,
            cpu_access: CpuAccessFlags::WRITE,
        };
        Self::allocate(device, format!("constant[{}]", byte_width), BufferKind::Constant, &desc, None)
    }

    /// Create a constant buffer sized for `T`
    pub fn create_constant<T: Pod>(device: &mut dyn Device) -> Result<Self> {
        Self::create_dynamic(device, std::mem::size_of::<T>() as u32)
    }

    fn allocate(
        device: &mut dyn Device,
        name: String,
        kind: BufferKind,
        desc: &BufferDesc,
        data: Option<&[u8]>,
    ) -> Result<Self> {
        if !device.is_ready() {
            let err = Error::creation(name, NativeError::new(NativeError::E_FAIL, "device is not ready"));
            engine_error!(LOG_SOURCE, "allocate: {}", err);
            return Err(err);
        }

        let native = device.allocate_buffer(desc, data).map_err(|native| {
            let err = Error::creation(name.clone(), native);
            engine_error!(LOG_SOURCE, "allocate: {}", err);
            err
        })?;

        engine_debug!(LOG_SOURCE, "Created {} buffer '{}' ({} bytes, {})",
            kind.role(), name, desc.byte_width, native.id());

        Ok(Self { name, kind: Some(kind), native: Some(native) })
    }

    /// Rename the buffer (used in log messages only)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Copy `src` into the buffer
    ///
    /// # Arguments
    ///
    /// * `dst_subresource` - Destination subresource (0 for buffers)
    /// * `dst_region` - Byte range to overwrite, `None` for the whole buffer
    /// * `src` - Source bytes, must not be empty
    /// * `src_row_pitch` / `src_depth_pitch` - Source pitches forwarded to the context
    pub fn update(
        &self,
        context: &mut dyn DeviceContext,
        dst_subresource: u32,
        dst_region: Option<&BufferRegion>,
        src: &[u8],
        src_row_pitch: u32,
        src_depth_pitch: u32,
    ) -> Result<()> {
        let native = self.live("update")?;
        if src.is_empty() {
            engine_bail!(LOG_SOURCE, "update: no source data for buffer '{}'", self.name);
        }
        if native.desc().usage == Usage::Immutable {
            engine_bail!(LOG_SOURCE, "update: buffer '{}' is immutable", self.name);
        }

        context
            .update_subresource(native, dst_subresource, dst_region, src, src_row_pitch, src_depth_pitch)
            .map_err(|native_err| {
                engine_error!(LOG_SOURCE, "update of '{}' failed: {}", self.name, native_err);
                Error::from(native_err)
            })
    }

    /// Write one `Pod` value at the start of the buffer
    pub fn write<T: Pod>(&self, context: &mut dyn DeviceContext, value: &T) -> Result<()> {
        let bytes = bytemuck::bytes_of(value);
        let region = BufferRegion { left: 0, right: bytes.len() as u32 };
        self.update(context, 0, Some(&region), bytes, 0, 0)
    }

    /// Bind the buffer according to the kind chosen at creation
    ///
    /// - Vertex: input assembler slot `params.start_slot`, own stride, offset 0
    /// - Index: input assembler index buffer with `params.index_format`, offset 0
    /// - Constant: constant slot `params.start_slot` of `params.stage`
    pub fn bind(&self, context: &mut dyn DeviceContext, params: BindParams) -> Result<()> {
        let native = self.live("bind")?;
        let Some(kind) = self.kind else {
            engine_bail!(LOG_SOURCE, "bind: buffer '{}' has no kind", self.name);
        };

        let result = match kind {
            BufferKind::Vertex { stride, offset } => {
                context.ia_set_vertex_buffers(params.start_slot, &[native], &[stride], &[offset])
            }
            BufferKind::Index { offset } => {
                context.ia_set_index_buffer(native, params.index_format, offset)
            }
            BufferKind::Constant => match params.stage {
                ShaderStage::Vertex => context.vs_set_constant_buffers(params.start_slot, &[native]),
                ShaderStage::Pixel => context.ps_set_constant_buffers(params.start_slot, &[native]),
            },
        };

        result.map_err(|native_err| {
            engine_error!(LOG_SOURCE, "bind of '{}' failed: {}", self.name, native_err);
            Error::from(native_err)
        })
    }

    /// Release the native allocation; calling it again is a no-op
    pub fn destroy(&mut self) {
        if let Some(native) = self.native.take() {
            engine_debug!(LOG_SOURCE, "Destroyed buffer '{}' ({})", self.name, native.id());
        }
    }

    fn live(&self, operation: &str) -> Result<&dyn NativeBuffer> {
        match (&self.native, self.kind) {
            (Some(native), Some(_)) => Ok(native.as_ref()),
            (None, Some(_)) => Err(crate::engine_precondition!(LOG_SOURCE,
                "{}: buffer '{}' was destroyed", operation, self.name)),
            _ => Err(crate::engine_precondition!(LOG_SOURCE,
                "{}: buffer '{}' was never created", operation, self.name)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binding contract, `None` before creation
    pub fn kind(&self) -> Option<BufferKind> {
        self.kind
    }

    pub fn role(&self) -> Option<BufferRole> {
        self.kind.map(|k| k.role())
    }

    /// Element stride (vertex buffers only)
    pub fn stride(&self) -> Option<u32> {
        match self.kind {
            Some(BufferKind::Vertex { stride, .. }) => Some(stride),
            _ => None,
        }
    }

    /// Allocation size, `None` once destroyed
    pub fn byte_width(&self) -> Option<u32> {
        self.native.as_ref().map(|n| n.desc().byte_width)
    }

    pub fn native_id(&self) -> Option<ResourceId> {
        self.native.as_ref().map(|n| n.id())
    }

    /// True between a successful create and destroy
    pub fn is_alive(&self) -> bool {
        self.native.is_some()
    }
}

#[cfg(test)]
#[path = "gpu_buffer_tests.rs"]
mod tests;
