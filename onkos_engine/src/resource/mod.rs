/// Resource module - CPU mesh data, OBJ ingestion and GPU buffers

pub mod mesh;
pub mod obj_loader;
pub mod gpu_buffer;
pub mod mesh_buffers;
pub mod constants;

pub use mesh::*;
pub use obj_loader::*;
pub use gpu_buffer::*;
pub use mesh_buffers::*;
pub use constants::*;
