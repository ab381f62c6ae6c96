//! Per-frame draw backend interface.

use super::{geometry::Geometry, shader::Shader};
use crate::geometry::{Mode, VertexAttrib};
use crate::pipeline::PipelineState;

/// Per-frame state transitions: clear, program activation, attribute binding and draw
/// submission.
///
/// These operations mutate the context-global bindings (active program, bound buffer, enabled
/// attribute arrays). The core renderer guarantees it restores every binding it touched before a
/// frame ends; backends only execute the transitions.
///
/// # Safety
///
/// Calls happen in the strict order driven by [`crate::pipeline::render`]; implementations may
/// rely on a geometry being bound when attributes are enabled and draws are issued.
pub unsafe trait Frame: Shader + Geometry {
  /// Apply the pipeline state and clear the color target.
  unsafe fn clear_frame(&mut self, state: &PipelineState);

  /// Make `program` the active program for subsequent draws.
  unsafe fn activate_program(&mut self, program: &Self::ProgramRepr);

  /// Deactivate the active program, leaving none active.
  unsafe fn deactivate_program(&mut self);

  /// Bind `geometry` as the source of vertex attribute data.
  unsafe fn bind_geometry(&mut self, geometry: &Self::GeometryRepr);

  /// Enable `attrib` and point it at the bound geometry's block starting at `offset` bytes.
  unsafe fn enable_attrib(&mut self, attrib: &VertexAttrib, offset: usize);

  /// Disable the attribute at `location`.
  unsafe fn disable_attrib(&mut self, location: u32);

  /// Issue a draw call consuming `vert_nb` vertices from the bound attribute arrays.
  unsafe fn draw(&mut self, mode: Mode, vert_nb: usize);

  /// Unbind `geometry`.
  unsafe fn unbind_geometry(&mut self, geometry: &Self::GeometryRepr);
}
