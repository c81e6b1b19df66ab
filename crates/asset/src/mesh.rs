//! CPU-side mesh representation produced by the OBJ loader.

/// One triangle corner: object-space position plus a decorative color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EmittedVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl EmittedVertex {
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Flat triangle list: every 3 consecutive vertices form one triangle.
/// No index buffer; shared positions are emitted once per corner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjMesh {
    pub vertices: Vec<EmittedVertex>,
}

impl ObjMesh {
    pub fn new(vertices: Vec<EmittedVertex>) -> Self {
        debug_assert_eq!(vertices.len() % 3, 0, "triangle list length must be a multiple of 3");
        Self { vertices }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate triangles in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = &[EmittedVertex]> {
        self.vertices.chunks_exact(3)
    }

    /// Axis-aligned bounds of all emitted positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = self.vertices.first()?.position;
        let bounds = self.vertices.iter().fold((first, first), |(mut lo, mut hi), v| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(v.position[axis]);
                hi[axis] = hi[axis].max(v.position[axis]);
            }
            (lo, hi)
        });
        Some(bounds)
    }
}
