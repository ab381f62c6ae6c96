//! Vertex geometry backend interface.

use crate::geometry::{GeometryError, Mode, VertexLayout};

/// Vertex buffer support.
///
/// # Safety
///
/// Implementations must upload the vertex data before returning; the slice is not kept around.
pub unsafe trait Geometry {
  /// Backend representation of a GPU-resident vertex buffer.
  type GeometryRepr;

  /// Create a new vertex buffer and upload `vertices` into it.
  ///
  /// The data has already been validated against `layout` by the caller; backends may rely on its
  /// length being a whole number of vertices.
  unsafe fn new_geometry(
    &mut self,
    vertices: &[f32],
    layout: &VertexLayout,
    mode: Mode,
  ) -> Result<Self::GeometryRepr, GeometryError>;

  /// Release a vertex buffer.
  unsafe fn destroy_geometry(geometry: &mut Self::GeometryRepr);
}
