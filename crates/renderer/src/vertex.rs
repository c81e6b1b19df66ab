//! GPU vertex layout shared by every uploaded mesh.

use asset::EmittedVertex;
use bytemuck::{Pod, Zeroable};

/// Vertex: position + color, 6 tightly packed floats.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

/// One float attribute inside [`Vertex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub location: u32,
    pub offset: usize,
    pub components: u32,
}

impl Vertex {
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            name: "v_position",
            location: 0,
            offset: std::mem::offset_of!(Vertex, pos),
            components: 3,
        },
        VertexAttribute {
            name: "v_color",
            location: 1,
            offset: std::mem::offset_of!(Vertex, color),
            components: 3,
        },
    ];
}

impl From<&EmittedVertex> for Vertex {
    fn from(v: &EmittedVertex) -> Self {
        Self {
            pos: v.position,
            color: v.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_six_packed_floats() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::ATTRIBUTES[0].offset, 0);
        assert_eq!(Vertex::ATTRIBUTES[1].offset, 12);
    }

    #[test]
    fn bytes_follow_field_order() {
        let v = Vertex::from(&EmittedVertex::new([1.0, 2.0, 3.0], [0.25, 0.5, 0.75]));
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.5, 0.75]);
    }
}
