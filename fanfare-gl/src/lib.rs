//! OpenGL backends for fanfare.
//!
//! Currently a single backend is provided: [`GL33`], targeting OpenGL 3.3 core.

pub mod gl33;

pub use gl33::GL33;
