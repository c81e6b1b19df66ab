//! Asset loading: OBJ meshes into flat, non-indexed triangle lists with
//! per-corner colors, and shader sources into owned strings.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod shader;

pub use error::{ObjError, ObjResult};
pub use mesh::{EmittedVertex, ObjMesh};
