//! Frame rendering.
//!
//! [`render`] runs one frame: clear the color target, activate the shader program, bind the
//! geometry and its vertex attributes, issue the draw call and restore every binding it touched.
//! A frame leaves the context exactly as it found it, so frames compose with any other code that
//! assumes a clean binding state.

use std::mem;

use crate::backend::frame::Frame;
use crate::context::GraphicsContext;
use crate::geometry::Geometry;
use crate::shader::Program;

/// Region of the framebuffer a frame renders to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Viewport {
  /// Render to the whole framebuffer, whatever its current size.
  Whole,
  /// Render to a specific rectangle, in pixels, origin at the lower-left corner.
  Specific {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
  },
}

/// Per-frame pipeline state.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineState {
  /// Color the frame is cleared to, as RGBA in `[0, 1]`.
  pub clear_color: [f32; 4],
  /// Framebuffer region to render to.
  pub viewport: Viewport,
}

impl Default for PipelineState {
  /// Clear to transparent black and render to the whole framebuffer.
  fn default() -> Self {
    PipelineState {
      clear_color: [0., 0., 0., 0.],
      viewport: Viewport::Whole,
    }
  }
}

impl PipelineState {
  /// Change the clear color.
  pub fn set_clear_color(self, clear_color: [f32; 4]) -> Self {
    PipelineState {
      clear_color,
      ..self
    }
  }

  /// Change the viewport.
  pub fn set_viewport(self, viewport: Viewport) -> Self {
    PipelineState { viewport, ..self }
  }
}

/// Render one frame: draw `geometry` with `program` after clearing the frame according to
/// `state`.
///
/// The vertex count and assembly mode come from the geometry itself, so a draw can never read
/// past the uploaded data. Attribute blocks are bound back to back in layout order, offset by the
/// size of the preceding blocks.
///
/// All context bindings changed by the frame (active program, bound geometry, enabled attribute
/// arrays) are restored before returning.
pub fn render<C>(
  ctx: &mut C,
  state: &PipelineState,
  program: &Program<C::Backend>,
  geometry: &Geometry<C::Backend>,
) where
  C: GraphicsContext,
  C::Backend: Frame,
{
  let backend = ctx.backend();
  let attribs = geometry.layout().attribs();
  let vert_nb = geometry.vert_nb();

  unsafe {
    backend.clear_frame(state);
    backend.activate_program(&program.repr);
    backend.bind_geometry(&geometry.repr);

    let mut offset = 0;
    for attrib in attribs {
      backend.enable_attrib(attrib, offset);
      offset += vert_nb * attrib.dim * mem::size_of::<f32>();
    }

    backend.draw(geometry.mode(), vert_nb);

    for attrib in attribs {
      backend.disable_attrib(attrib.location);
    }

    backend.unbind_geometry(&geometry.repr);
    backend.deactivate_program();
  }
}
