//! Vertex + index buffer pair created from one mesh.

use crate::error::Result;
use crate::graphics_device::{Device, IndexFormat};
use crate::resource::gpu_buffer::{BufferRole, GpuBuffer};
use crate::resource::mesh::MeshData;
use crate::engine_info;

/// GPU-resident mesh ready to be drawn
#[derive(Debug)]
pub struct MeshBuffers {
    name: String,
    vertex_buffer: GpuBuffer,
    index_buffer: GpuBuffer,
    vertex_count: u32,
    index_count: u32,
}

impl MeshBuffers {
    /// Upload a mesh, taking ownership of its CPU data
    ///
    /// The mesh is validated first so every uploaded index addresses an
    /// uploaded vertex.
    pub fn create(device: &mut dyn Device, mesh: MeshData) -> Result<Self> {
        mesh.validate()?;
        let vertex_buffer = GpuBuffer::create_from_mesh(device, &mesh, BufferRole::Vertex)?;
        let index_buffer = GpuBuffer::create_from_mesh(device, &mesh, BufferRole::Index)?;

        engine_info!("onkos::MeshBuffers", "Uploaded mesh '{}' ({} vertices, {} indices)",
            mesh.name, mesh.vertex_count(), mesh.index_count());

        Ok(Self {
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            name: mesh.name,
            vertex_buffer,
            index_buffer,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffer(&self) -> &GpuBuffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &GpuBuffer {
        &self.index_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of indices passed to `draw_indexed`
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::U32
    }

    pub fn destroy(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}
