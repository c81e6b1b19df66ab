//! Renderer front end: static mesh upload and per-frame draw command building.
//!
//! Produces everything a GPU backend needs (vertex bytes, vertex counts, MVP
//! uniforms, clear color) without owning a device. Meshes are uploaded once and
//! drawn as unindexed triangle lists.

pub mod shader;
pub mod vertex;

use asset::ObjMesh;
use bytemuck::{Pod, Zeroable};
use corelib::{Mat4, camera::Camera, ecs::MeshId, ecs::World};
use thiserror::Error;

pub use shader::ShaderSources;
pub use vertex::Vertex;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.2, 1.0];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Shader does not declare '{0}'")]
    MissingBinding(&'static str),
    #[error("The {0} shader is empty")]
    EmptyShader(&'static str),
    #[error("Mesh has {0} vertices, more than a single draw can address")]
    TooManyVertices(usize),
    #[error("Cannot register mesh #{0}: id space exhausted")]
    TooManyMeshes(usize),
    #[error("Unknown mesh id {0:?}")]
    UnknownMesh(MeshId),
}

/// Camera UBO (16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub mvp: [[f32; 4]; 4],
}

/// Immutable vertex storage, built once from a loaded mesh.
#[derive(Clone, Debug)]
pub struct StaticMesh {
    vertices: Vec<Vertex>,
    vertex_count: u32,
}

impl StaticMesh {
    pub fn upload(mesh: &ObjMesh) -> Result<Self, RenderError> {
        let vertex_count = u32::try_from(mesh.vertex_count())
            .map_err(|_| RenderError::TooManyVertices(mesh.vertex_count()))?;
        let vertices: Vec<Vertex> = mesh.vertices.iter().map(Vertex::from).collect();
        log::info!(
            "Uploaded static mesh: {} vertices ({} bytes)",
            vertex_count,
            vertices.len() * Vertex::STRIDE
        );
        Ok(Self {
            vertices,
            vertex_count,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// One unindexed triangle-list draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub uniform: CameraUniform,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// Everything needed to render one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameCommands {
    pub clear_color: [f32; 4],
    pub draws: Vec<DrawCall>,
}

impl FrameCommands {
    pub fn total_vertices(&self) -> u64 {
        self.draws.iter().map(|d| d.vertex_count as u64).sum()
    }
}

pub struct Renderer {
    meshes: Vec<StaticMesh>,
    shaders: ShaderSources,
    camera: Camera,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Validates shader bindings up front; a bad program is fatal for the renderer.
    pub fn new(shaders: ShaderSources, width: u32, height: u32) -> Result<Self, RenderError> {
        shaders.check_bindings()?;
        let width = width.max(1);
        let height = height.max(1);
        Ok(Self {
            meshes: Vec::new(),
            shaders,
            camera: Camera::scene_default(Camera::aspect_for(width, height)),
            width,
            height,
        })
    }

    /// Upload a mesh once; the returned id is what renderables reference.
    pub fn add_mesh(&mut self, mesh: &ObjMesh) -> Result<MeshId, RenderError> {
        let id = u32::try_from(self.meshes.len())
            .map(MeshId)
            .map_err(|_| RenderError::TooManyMeshes(self.meshes.len()))?;
        self.meshes.push(StaticMesh::upload(mesh)?);
        Ok(id)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&StaticMesh> {
        self.meshes.get(id.0 as usize)
    }

    pub fn shaders(&self) -> &ShaderSources {
        &self.shaders
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Resize: update the projection aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width.max(1), height.max(1)) == (self.width, self.height) {
            return;
        }
        self.width = width.max(1);
        self.height = height.max(1);
        self.camera = self
            .camera
            .with_aspect(Camera::aspect_for(self.width, self.height));
        log::debug!("Renderer resized: {}x{}", self.width, self.height);
    }

    /// Build the draw list for every renderable in `world`.
    pub fn frame(&self, world: &World) -> Result<FrameCommands, RenderError> {
        let proj_view = self.camera.proj_view();
        let draws = world
            .iter_renderables()
            .map(|(transform, renderable)| -> Result<DrawCall, RenderError> {
                let mesh = self
                    .mesh(renderable.mesh)
                    .ok_or(RenderError::UnknownMesh(renderable.mesh))?;
                Ok(DrawCall {
                    mesh: renderable.mesh,
                    uniform: mvp_uniform(proj_view, transform.matrix()),
                    first_vertex: 0,
                    vertex_count: mesh.vertex_count(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FrameCommands {
            clear_color: CLEAR_COLOR,
            draws,
        })
    }
}

fn mvp_uniform(proj_view: Mat4, model: Mat4) -> CameraUniform {
    CameraUniform {
        mvp: (proj_view * model).to_cols_array_2d(),
    }
}
