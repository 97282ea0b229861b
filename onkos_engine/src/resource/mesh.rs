//! CPU-side mesh data.
//!
//! `MeshData` is filled once by the OBJ loader and then moved into buffer
//! creation. After that it is only read, or emptied with `clear()`.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use crate::error::Result;
use crate::graphics_device::{Format, InputElementDesc};
use crate::engine_bail;

// ============================================================================
// VERTEX
// ============================================================================

/// GPU vertex: position followed by texture coordinates (20 bytes, tightly packed)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub texcoord: Vec2,
}

impl Vertex {
    /// Byte stride of one vertex in a vertex buffer
    pub const STRIDE: u32 = std::mem::size_of::<Vertex>() as u32;

    pub fn new(position: Vec3, texcoord: Vec2) -> Self {
        Self { position, texcoord }
    }

    /// Input layout matching the vertex shader signature (POSITION, TEXCOORD)
    pub fn input_layout() -> Vec<InputElementDesc> {
        vec![
            InputElementDesc {
                semantic_name: "POSITION",
                semantic_index: 0,
                format: Format::R32G32B32_FLOAT,
                input_slot: 0,
                aligned_byte_offset: 0,
            },
            InputElementDesc {
                semantic_name: "TEXCOORD",
                semantic_index: 0,
                format: Format::R32G32_FLOAT,
                input_slot: 0,
                aligned_byte_offset: 12,
            },
        ]
    }
}

// ============================================================================
// MESH DATA
// ============================================================================

/// Deduplicated vertex list and triangle index list of one mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Identifier (file stem for meshes loaded from disk)
    pub name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshData {
    /// Create an empty mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), vertices: Vec::new(), indices: Vec::new() }
    }

    /// Build a mesh from prepared geometry, checking the index invariant
    pub fn from_parts(name: impl Into<String>, vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        let mesh = Self { name: name.into(), vertices, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Append a vertex, returning its index
    pub(crate) fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    /// Raw bytes of the vertex list
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the index list
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Check that only whole triangles are stored and every index is in range
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            engine_bail!("onkos::MeshData", "Mesh '{}' has {} indices, not a multiple of 3",
                self.name, self.indices.len());
        }
        let vertex_count = self.vertices.len() as u64;
        if let Some(bad) = self.indices.iter().find(|&&i| i as u64 >= vertex_count) {
            engine_bail!("onkos::MeshData", "Mesh '{}' references vertex {} but has {} vertices",
                self.name, bad, vertex_count);
        }
        Ok(())
    }

    /// Empty both sequences (the name is kept)
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
