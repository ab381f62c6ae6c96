use crate::gl33::state::{Bind, GLState};
use crate::gl33::GL33;
use fanfare::backend::geometry::Geometry as GeometryBackend;
use fanfare::geometry::{GeometryError, Mode, VertexLayout};
use gl::{self, types::*};
use std::cell::RefCell;
use std::mem;
use std::os::raw::c_void;
use std::rc::Rc;

/// A vertex array object with its single backing array buffer.
///
/// Attribute blocks live back to back in the buffer; their pointers are set up at draw time from
/// the layout.
#[derive(Debug)]
pub struct Geometry {
  pub(crate) vao: GLuint,
  pub(crate) vbo: GLuint,
  state: Rc<RefCell<GLState>>,
}

unsafe impl GeometryBackend for GL33 {
  type GeometryRepr = Geometry;

  unsafe fn new_geometry(
    &mut self,
    vertices: &[f32],
    _layout: &VertexLayout,
    _mode: Mode,
  ) -> Result<Self::GeometryRepr, GeometryError> {
    let mut vao: GLuint = 0;
    let mut vbo: GLuint = 0;

    gl::GenVertexArrays(1, &mut vao);

    let mut gfx_st = self.state.borrow_mut();

    // forced; the VAO is fresh and the cache cannot know about it
    gfx_st.bind_vertex_array(vao, Bind::Forced);

    gl::GenBuffers(1, &mut vbo);
    gfx_st.bind_array_buffer(vbo, Bind::Forced);
    gl::BufferData(
      gl::ARRAY_BUFFER,
      (vertices.len() * mem::size_of::<f32>()) as isize,
      vertices.as_ptr() as *const c_void,
      gl::STATIC_DRAW,
    );

    gfx_st.unbind_vertex_array();

    drop(gfx_st);

    Ok(Geometry {
      vao,
      vbo,
      state: self.state.clone(),
    })
  }

  unsafe fn destroy_geometry(geometry: &mut Self::GeometryRepr) {
    let mut gfx_st = geometry.state.borrow_mut();

    if gfx_st.bound_vertex_array() == geometry.vao {
      gfx_st.unbind_vertex_array();
    }

    gfx_st.unbind_buffer(geometry.vbo);

    gl::DeleteBuffers(1, &geometry.vbo);
    gl::DeleteVertexArrays(1, &geometry.vao);
  }
}
