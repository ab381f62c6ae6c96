//! [GLFW](https://crates.io/crates/glfw) windowing surface for fanfare.
//!
//! [`GlfwSurface::new`] opens a window through a caller-supplied closure, loads the OpenGL
//! symbols from it and acquires the GL 3.3 graphics state, handing back an event queue plus a
//! [`GL33Context`] ready for rendering.

#![deny(missing_docs)]

use fanfare::context::GraphicsContext;
pub use fanfare_gl::gl33::StateQueryError;
use fanfare_gl::GL33;
use glfw::{self, Glfw, InitError, Window, WindowEvent};
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Everything that can go wrong while opening a surface.
///
/// All of these are startup failures; there is nothing to retry.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// GLFW itself failed to initialize.
  InitError(InitError),

  /// GLFW declined to open the window.
  WindowCreationFailed,

  /// The graphics state could not be acquired.
  ///
  /// Typically: a second surface was created on a thread that already holds one.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("cannot create the GLFW window"),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// A GLFW-backed rendering surface.
///
/// Owns the two halves a demo needs: the event queue to poll input from and the context to draw
/// with.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Queue of window events, paired with their timestamps.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Context to render through.
  pub context: GL33Context,
}

impl GlfwSurface {
  /// Open a surface.
  ///
  /// GLFW is initialized with OpenGL 3.3 core profile hints, then `create_window` is called with
  /// the GLFW handle to open the actual window; returning `None` from it maps to
  /// [`GlfwSurfaceError::WindowCreationFailed`]. The closure is also the place to opt into event
  /// polling (key, close, framebuffer size) and must make the window's context current.
  pub fn new(
    create_window: impl FnOnce(&mut Glfw) -> Option<(Window, Receiver<(f64, WindowEvent)>)>,
  ) -> Result<Self, GlfwSurfaceError> {
    let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;

    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let (mut window, events_rx) =
      create_window(&mut glfw).ok_or(GlfwSurfaceError::WindowCreationFailed)?;

    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL33::new().map_err(GlfwSurfaceError::GraphicsStateError)?;

    Ok(GlfwSurface {
      events_rx,
      context: GL33Context { window, gl },
    })
  }
}

/// An OpenGL 3.3 context bound to a GLFW window.
#[derive(Debug)]
pub struct GL33Context {
  /// The underlying window, exposed for event polling and buffer swapping.
  pub window: Window,

  /// OpenGL 3.3 backend state.
  gl: GL33,
}

unsafe impl GraphicsContext for GL33Context {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn surface_errors_are_self_describing() {
    let e = GlfwSurfaceError::WindowCreationFailed;
    assert_eq!(e.to_string(), "cannot create the GLFW window");
    assert!(error::Error::source(&e).is_none());

    let e = GlfwSurfaceError::GraphicsStateError(StateQueryError::UnavailableGLState);
    assert_eq!(
      e.to_string(),
      "failed to get graphics state: unavailable graphics state"
    );
    assert!(error::Error::source(&e).is_some());
  }
}
