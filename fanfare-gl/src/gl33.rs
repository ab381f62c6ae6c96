//! OpenGL 3.3 backend.
//!
//! This module implements the fanfare backend traits on top of OpenGL 3.3 core. The backend type
//! is [`GL33`].

mod frame;
mod geometry;
mod shader;
mod state;

pub use self::state::GLState;
pub use self::state::StateQueryError;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// Resource representations clone the shared [`GLState`] handle so that they can fix up cached
/// bindings when they are destroyed, without borrowing the backend.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// The calling thread must hold a current OpenGL context; only one backend may exist per
  /// thread.
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Internal access to the backend state.
  ///
  /// # Unsafety
  ///
  /// This method is **highly unsafe** as it exposes the internals of the backend. Playing with it
  /// should be done with extreme caution.
  pub unsafe fn state(&self) -> &Rc<RefCell<GLState>> {
    &self.state
  }
}
