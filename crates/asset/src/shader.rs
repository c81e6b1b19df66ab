//! Shader source loading.

use std::{fs, path::Path};

use anyhow::Context;

/// Read a whole shader file into an owned string.
pub fn load_shader_source<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Could not open shader file: {}", path.display()))?;
    log::info!("Loaded shader {:?} ({} bytes)", path, source.len());
    Ok(source)
}
