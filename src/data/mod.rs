//! Per-vertex attribute storage and layout.

pub mod vertex_buffer;
pub mod vertex_format;

pub use vertex_buffer::{DEFAULT_VERTEX_CAPACITY, VertexBuffer};
pub use vertex_format::{VertexAttribute, VertexFormat};
