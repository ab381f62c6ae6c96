use crate::gl33::state::Bind;
use crate::gl33::GL33;
use fanfare::backend::frame::Frame;
use fanfare::geometry::{Mode, VertexAttrib};
use fanfare::pipeline::{PipelineState, Viewport};
use gl::{self, types::*};
use std::os::raw::c_void;
use std::ptr::null;

unsafe impl Frame for GL33 {
  unsafe fn clear_frame(&mut self, state: &PipelineState) {
    let mut gfx_st = self.state.borrow_mut();

    // `Viewport::Whole` keeps whatever viewport the surface last set; the surface is the only
    // place that knows the framebuffer size
    if let Viewport::Specific {
      x,
      y,
      width,
      height,
    } = state.viewport
    {
      gfx_st.set_viewport([x as GLint, y as GLint, width as GLint, height as GLint]);
    }

    gfx_st.set_clear_color(state.clear_color);

    gl::Clear(gl::COLOR_BUFFER_BIT);
  }

  unsafe fn activate_program(&mut self, program: &Self::ProgramRepr) {
    self.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn deactivate_program(&mut self) {
    self.state.borrow_mut().use_program(0);
  }

  unsafe fn bind_geometry(&mut self, geometry: &Self::GeometryRepr) {
    let mut gfx_st = self.state.borrow_mut();

    gfx_st.bind_vertex_array(geometry.vao, Bind::Cached);

    // attribute pointers are respecified every frame, so the buffer must be on the ARRAY_BUFFER
    // binding, which is not VAO state
    gfx_st.bind_array_buffer(geometry.vbo, Bind::Cached);
  }

  unsafe fn enable_attrib(&mut self, attrib: &VertexAttrib, offset: usize) {
    gl::VertexAttribPointer(
      attrib.location,
      attrib.dim as GLint,
      gl::FLOAT,
      gl::FALSE,
      0, // tightly packed within the block
      null::<c_void>().add(offset),
    );
    gl::EnableVertexAttribArray(attrib.location);
  }

  unsafe fn disable_attrib(&mut self, location: u32) {
    gl::DisableVertexAttribArray(location);
  }

  unsafe fn draw(&mut self, mode: Mode, vert_nb: usize) {
    gl::DrawArrays(opengl_mode(mode), 0, vert_nb as GLsizei);
  }

  unsafe fn unbind_geometry(&mut self, geometry: &Self::GeometryRepr) {
    let mut gfx_st = self.state.borrow_mut();

    gfx_st.unbind_buffer(geometry.vbo);

    if gfx_st.bound_vertex_array() == geometry.vao {
      gfx_st.unbind_vertex_array();
    }
  }
}

fn opengl_mode(mode: Mode) -> GLenum {
  match mode {
    Mode::Triangle => gl::TRIANGLES,
    Mode::TriangleStrip => gl::TRIANGLE_STRIP,
    Mode::TriangleFan => gl::TRIANGLE_FAN,
  }
}
