//! Vertex geometry.
//!
//! A [`Geometry`] is a GPU-resident vertex buffer together with everything needed to draw it: its
//! byte layout, its primitive assembly mode and its vertex count. The layout travels with the
//! buffer so the attribute bindings declared at draw time are, by construction, the layout the
//! data was uploaded with; a mismatch between the two is not detectable at draw time by any
//! graphics API, it just renders garbage, which is why this API does not let you state the layout
//! twice.
//!
//! Buffers hold segmented (block-wise) attribute data: all position components first, then all
//! color components, etc. Block offsets are derived from the vertex count when binding.

use std::fmt;

use crate::backend::geometry::Geometry as GeometryBackend;
use crate::context::GraphicsContext;

/// Primitive assembly mode: how consumed vertices are grouped into drawable shapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
  /// Every three vertices form an isolated triangle.
  Triangle,
  /// Each vertex after the second forms a triangle with its two predecessors.
  TriangleStrip,
  /// Each vertex after the second forms a triangle with its predecessor and the first vertex,
  /// which acts as the pivot of the fan.
  TriangleFan,
}

impl Mode {
  /// Number of primitives assembled from `vert_nb` consumed vertices.
  pub fn primitive_count(self, vert_nb: usize) -> usize {
    match self {
      Mode::Triangle => vert_nb / 3,
      Mode::TriangleStrip | Mode::TriangleFan => vert_nb.saturating_sub(2),
    }
  }
}

/// One vertex attribute: a shader input location fed with `dim` floating-point components per
/// vertex.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VertexAttrib {
  /// Shader input location index.
  pub location: u32,
  /// Components per vertex (e.g. 4 for a `vec4`).
  pub dim: usize,
}

impl VertexAttrib {
  /// Create a new attribute descriptor.
  pub const fn new(location: u32, dim: usize) -> Self {
    VertexAttrib { location, dim }
  }
}

/// Byte layout of a segmented vertex buffer: one contiguous block per attribute, in order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VertexLayout {
  attribs: Vec<VertexAttrib>,
}

impl VertexLayout {
  /// Create a layout from an ordered list of attributes.
  pub fn new(attribs: Vec<VertexAttrib>) -> Self {
    VertexLayout { attribs }
  }

  /// The usual position-only layout: a `vec4` position at location 0.
  pub fn positions() -> Self {
    VertexLayout::new(vec![VertexAttrib::new(0, 4)])
  }

  /// Positions at location 0 plus a `vec4` color at location 1, each in its own block.
  pub fn positions_colors() -> Self {
    VertexLayout::new(vec![VertexAttrib::new(0, 4), VertexAttrib::new(1, 4)])
  }

  /// Ordered attributes of this layout.
  pub fn attribs(&self) -> &[VertexAttrib] {
    &self.attribs
  }

  /// Total number of float components a single vertex contributes across all blocks.
  pub fn vertex_len(&self) -> usize {
    self.attribs.iter().map(|a| a.dim).sum()
  }
}

/// Errors that can occur while creating a [`Geometry`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeometryError {
  /// The layout declares no attribute.
  NoAttrib,
  /// No vertex data was supplied.
  Empty,
  /// The data length is not a whole number of vertices for the declared layout.
  LengthMismatch {
    /// Number of floats supplied.
    len: usize,
    /// Floats per vertex required by the layout.
    vertex_len: usize,
  },
}

impl fmt::Display for GeometryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GeometryError::NoAttrib => f.write_str("geometry layout has no attribute"),
      GeometryError::Empty => f.write_str("geometry has no vertex data"),
      GeometryError::LengthMismatch { len, vertex_len } => write!(
        f,
        "geometry data length {} is not a multiple of the vertex length {}",
        len, vertex_len
      ),
    }
  }
}

impl std::error::Error for GeometryError {}

/// GPU-resident vertex data, ready to draw.
///
/// Dropping a geometry releases the underlying GPU buffer.
pub struct Geometry<B>
where
  B: ?Sized + GeometryBackend,
{
  pub(crate) repr: B::GeometryRepr,
  layout: VertexLayout,
  mode: Mode,
  vert_nb: usize,
}

impl<B> Geometry<B>
where
  B: ?Sized + GeometryBackend,
{
  /// Upload `vertices` into a new GPU buffer.
  ///
  /// The vertex count is derived from the data length, which must be a non-zero whole number of
  /// vertices for `layout`; draw calls then always consume exactly the vertices present in the
  /// buffer.
  pub fn new<C>(
    ctx: &mut C,
    vertices: &[f32],
    layout: VertexLayout,
    mode: Mode,
  ) -> Result<Self, GeometryError>
  where
    C: GraphicsContext<Backend = B>,
  {
    if layout.attribs().is_empty() {
      return Err(GeometryError::NoAttrib);
    }

    if vertices.is_empty() {
      return Err(GeometryError::Empty);
    }

    let vertex_len = layout.vertex_len();

    if vertices.len() % vertex_len != 0 {
      return Err(GeometryError::LengthMismatch {
        len: vertices.len(),
        vertex_len,
      });
    }

    let vert_nb = vertices.len() / vertex_len;
    let repr = unsafe { ctx.backend().new_geometry(vertices, &layout, mode)? };

    Ok(Geometry {
      repr,
      layout,
      mode,
      vert_nb,
    })
  }

  /// Number of vertices in the buffer.
  pub fn vert_nb(&self) -> usize {
    self.vert_nb
  }

  /// Primitive assembly mode this geometry is drawn with.
  pub fn mode(&self) -> Mode {
    self.mode
  }

  /// Byte layout of the buffer.
  pub fn layout(&self) -> &VertexLayout {
    &self.layout
  }
}

impl<B> Drop for Geometry<B>
where
  B: ?Sized + GeometryBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_geometry(&mut self.repr) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::backend::mock::MockContext;

  #[test]
  fn vertex_count_is_derived_from_the_data() {
    let mut ctx = MockContext::new();

    let vertices = [0.; 20]; // five vec4 positions
    let geometry =
      Geometry::new(&mut ctx, &vertices, VertexLayout::positions(), Mode::TriangleFan).unwrap();

    assert_eq!(geometry.vert_nb(), 5);
    assert_eq!(geometry.mode(), Mode::TriangleFan);
  }

  #[test]
  fn partial_vertices_are_rejected() {
    let mut ctx = MockContext::new();

    let vertices = [0.; 7];
    let geometry = Geometry::new(&mut ctx, &vertices, VertexLayout::positions(), Mode::Triangle);

    assert_eq!(
      geometry.err(),
      Some(GeometryError::LengthMismatch { len: 7, vertex_len: 4 })
    );
  }

  #[test]
  fn empty_data_is_rejected() {
    let mut ctx = MockContext::new();

    let geometry = Geometry::new(&mut ctx, &[], VertexLayout::positions(), Mode::Triangle);
    assert_eq!(geometry.err(), Some(GeometryError::Empty));
  }

  #[test]
  fn attribute_less_layout_is_rejected() {
    let mut ctx = MockContext::new();

    let vertices = [0.; 4];
    let geometry = Geometry::new(&mut ctx, &vertices, VertexLayout::new(Vec::new()), Mode::Triangle);

    assert_eq!(geometry.err(), Some(GeometryError::NoAttrib));
  }

  #[test]
  fn dropping_a_geometry_releases_it() {
    let mut ctx = MockContext::new();

    let vertices = [0.; 12];
    let geometry =
      Geometry::new(&mut ctx, &vertices, VertexLayout::positions(), Mode::Triangle).unwrap();
    drop(geometry);

    assert_eq!(ctx.state().borrow().live_geometries, 0);
  }

  #[test]
  fn primitive_counts_per_mode() {
    assert_eq!(Mode::Triangle.primitive_count(6), 2);
    assert_eq!(Mode::TriangleStrip.primitive_count(5), 3);
    assert_eq!(Mode::TriangleFan.primitive_count(5), 3);
    assert_eq!(Mode::TriangleFan.primitive_count(1), 0);
  }
}
