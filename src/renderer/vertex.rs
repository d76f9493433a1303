//! Vertex record stored in the mesh blob

use bytemuck::{Pod, Zeroable};

/// Position, normal and RGBA color, tightly packed (28 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [u8; 4],
}

impl MeshVertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [u8; 4]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

const _: () = assert!(std::mem::size_of::<MeshVertex>() == 28);

