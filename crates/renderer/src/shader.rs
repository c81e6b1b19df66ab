//! Shader sources and the names the renderer binds against.

use std::path::Path;

use crate::{RenderError, vertex::Vertex};

/// Uniform holding the premultiplied model-view-projection matrix.
pub const MVP_UNIFORM: &str = "mvpMatrix";

/// Owned vertex + fragment sources.
#[derive(Clone, Debug)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Load both stages from files.
    pub fn load(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self {
            vertex: asset::shader::load_shader_source(vertex)?,
            fragment: asset::shader::load_shader_source(fragment)?,
        })
    }

    /// The vertex stage must declare every vertex attribute and the MVP uniform.
    pub fn check_bindings(&self) -> Result<(), RenderError> {
        let names = Vertex::ATTRIBUTES
            .iter()
            .map(|a| a.name)
            .chain(std::iter::once(MVP_UNIFORM));
        for name in names {
            if !declares(&self.vertex, name) {
                return Err(RenderError::MissingBinding(name));
            }
        }
        if self.fragment.trim().is_empty() {
            return Err(RenderError::EmptyShader("fragment"));
        }
        Ok(())
    }
}

fn declares(source: &str, name: &str) -> bool {
    source
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|word| word == name)
}
