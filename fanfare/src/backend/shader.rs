//! Shader backend interface.

use crate::shader::{ProgramError, StageError, StageType};

/// Shader stage and program support.
///
/// The program lifecycle is deliberately split into creation, attach, link and detach operations
/// instead of a single do-everything constructor: the ordering policy (attach every stage, link,
/// then detach every stage whatever the link outcome) lives in the core where it is written once
/// and tested, not re-implemented per backend.
///
/// # Safety
///
/// Implementations must only be called from the thread owning the graphics context, and must not
/// keep references to the passed source strings after returning.
pub unsafe trait Shader {
  /// Backend representation of a compiled shader stage.
  type StageRepr;

  /// Backend representation of a shader program.
  type ProgramRepr;

  /// Create and compile a new shader stage from its source code.
  ///
  /// On failure the backend must clean up the underlying shader object itself and surface the
  /// driver diagnostic log through [`StageError::CompilationFailed`].
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Release a shader stage.
  unsafe fn destroy_stage(stage: &mut Self::StageRepr);

  /// Create a new, empty shader program.
  unsafe fn new_program(&mut self) -> Result<Self::ProgramRepr, ProgramError>;

  /// Attach a stage to a program.
  unsafe fn attach_stage(&mut self, program: &mut Self::ProgramRepr, stage: &Self::StageRepr);

  /// Detach a stage from a program.
  ///
  /// Detaching never invalidates a successful link; the linked binary has already been fixed into
  /// the program.
  unsafe fn detach_stage(&mut self, program: &mut Self::ProgramRepr, stage: &Self::StageRepr);

  /// Link the attached stages into an executable program.
  unsafe fn link_program(&mut self, program: &mut Self::ProgramRepr) -> Result<(), ProgramError>;

  /// Release a shader program.
  unsafe fn destroy_program(program: &mut Self::ProgramRepr);
}
