//! Shader stages and programs.
//!
//! A shader pipeline is built bottom-up: sources are compiled into [`Stage`]s, stages are linked
//! into a [`Program`]. The [`ProgramBuilder`] is the orchestration entry point tying both steps
//! together; [`Stage::compile`] and [`Program::link`] remain available as building blocks.
//!
//! Stage objects only matter until the link step. Once a program is linked, the stages have been
//! copied into it and can be released immediately, which [`ProgramBuilder::build`] does for you,
//! link success or not.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::backend::shader::Shader as ShaderBackend;
use crate::context::GraphicsContext;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  Vertex,
  /// Geometry shader.
  Geometry,
  /// Fragment shader.
  Fragment,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::Vertex => f.write_str("vertex shader"),
      StageType::Geometry => f.write_str("geometry shader"),
      StageType::Fragment => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
///
/// The stage type is carried alongside the driver log because the log text alone does not say
/// which stage failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// The driver refused to allocate a shader object of that type.
  CreationFailed(StageType),
  /// The stage failed to compile; the `String` is the driver diagnostic log.
  CompilationFailed(StageType, String),
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CreationFailed(ty) => write!(f, "cannot create {}", ty),
      StageError::CompilationFailed(ref ty, ref log) => {
        write!(f, "{} compilation error: {}", ty, log)
      }
    }
  }
}

impl std::error::Error for StageError {}

/// Errors that can occur while building a [`Program`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// The driver refused to allocate a program object.
  CreationFailed,
  /// No stage was supplied; linking an empty program is rejected before reaching the driver.
  NoStage,
  /// The program failed to link; the `String` is the driver diagnostic log.
  LinkFailed(String),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::CreationFailed => f.write_str("cannot create shader program"),
      ProgramError::NoStage => f.write_str("shader program has no stage"),
      ProgramError::LinkFailed(ref log) => write!(f, "shader program failed to link: {}", log),
    }
  }
}

impl std::error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// A compiled shader stage.
///
/// Dropping a stage releases the underlying GPU shader object.
pub struct Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  pub(crate) repr: B::StageRepr,
}

impl<B> Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  /// Compile a new stage of type `ty` from `src`.
  ///
  /// Compilation failure is not transient: it signals a shader-source bug and should be treated
  /// as fatal to program startup.
  pub fn compile<C, R>(ctx: &mut C, ty: StageType, src: R) -> Result<Self, StageError>
  where
    C: GraphicsContext<Backend = B>,
    R: AsRef<str>,
  {
    unsafe {
      ctx
        .backend()
        .new_stage(ty, src.as_ref())
        .map(|repr| Stage { repr })
    }
  }
}

impl<B> Drop for Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_stage(&mut self.repr) }
  }
}

/// A linked, GPU-executable shader program.
///
/// Dropping a program releases the underlying GPU program object.
pub struct Program<B>
where
  B: ?Sized + ShaderBackend,
{
  pub(crate) repr: B::ProgramRepr,
}

impl<B> Program<B>
where
  B: ?Sized + ShaderBackend,
{
  /// Link an ordered, non-empty set of stages into a program.
  ///
  /// Every stage is attached before linking and detached afterwards whatever the link outcome, so
  /// the caller may destroy its stage objects as soon as this function returns. On link failure
  /// the program handle is destroyed and [`ProgramError::LinkFailed`] carries the driver log; no
  /// invalid handle ever escapes.
  pub fn link<'a, C, S>(ctx: &mut C, stages: S) -> Result<Self, ProgramError>
  where
    B: 'a,
    C: GraphicsContext<Backend = B>,
    S: IntoIterator<Item = &'a Stage<B>>,
  {
    let stages: Vec<_> = stages.into_iter().collect();

    if stages.is_empty() {
      return Err(ProgramError::NoStage);
    }

    let backend = ctx.backend();

    unsafe {
      let repr = backend.new_program()?;
      let mut program = Program { repr };

      for stage in &stages {
        backend.attach_stage(&mut program.repr, &stage.repr);
      }

      let linked = backend.link_program(&mut program.repr);

      // the linked binary does not reference the stage objects anymore; failed links have
      // nothing to reference either
      for stage in &stages {
        backend.detach_stage(&mut program.repr, &stage.repr);
      }

      linked.map(move |_| program)
    }
  }

  /// Build a program for the common vertex(+geometry)+fragment pipeline.
  pub fn from_sources<C>(
    ctx: &mut C,
    vertex_src: &str,
    geometry_src: Option<&str>,
    fragment_src: &str,
  ) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let mut builder = ProgramBuilder::new().stage(StageType::Vertex, vertex_src);

    if let Some(src) = geometry_src {
      builder = builder.stage(StageType::Geometry, src);
    }

    builder.stage(StageType::Fragment, fragment_src).build(ctx)
  }
}

impl<B> Drop for Program<B>
where
  B: ?Sized + ShaderBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_program(&mut self.repr) }
  }
}

/// Ordered collection of stage sources, built into a [`Program`] in one go.
///
/// This is the composite operation external callers should reach for: it compiles every source,
/// links the full set and releases every compiled stage object afterwards, success or failure.
#[derive(Clone, Debug, Default)]
pub struct ProgramBuilder {
  stages: Vec<(StageType, String)>,
}

impl ProgramBuilder {
  /// Create an empty builder.
  pub fn new() -> Self {
    ProgramBuilder { stages: Vec::new() }
  }

  /// Append a stage source. Order is preserved through attachment.
  pub fn stage<S>(mut self, ty: StageType, src: S) -> Self
  where
    S: Into<String>,
  {
    self.stages.push((ty, src.into()));
    self
  }

  /// Compile and link everything.
  ///
  /// An empty builder is rejected with [`ProgramError::NoStage`] without touching the backend;
  /// driver behavior for stage-less programs is undefined and we do not rely on it.
  pub fn build<B, C>(self, ctx: &mut C) -> Result<Program<B>, ProgramError>
  where
    B: ?Sized + ShaderBackend,
    C: GraphicsContext<Backend = B>,
  {
    if self.stages.is_empty() {
      return Err(ProgramError::NoStage);
    }

    let mut compiled = Vec::with_capacity(self.stages.len());

    for (ty, src) in &self.stages {
      compiled.push(Stage::compile(ctx, *ty, src)?);
    }

    // compiled stages drop, and release their GPU objects, as soon as this returns; the program
    // retains the linked code
    Program::link(ctx, &compiled)
  }
}

/// Read a shader source from a file.
///
/// When the file cannot be read, a warning is logged and an empty string is returned; the empty
/// source then degrades into an ordinary compile failure instead of crashing the loader.
pub fn read_stage_source<P>(path: P) -> String
where
  P: AsRef<Path>,
{
  let path = path.as_ref();

  match fs::read_to_string(path) {
    Ok(src) => src,

    Err(e) => {
      log::warn!("cannot read shader source {}: {}", path.display(), e);
      String::new()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::backend::mock::MockContext;

  const VS: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.); }";
  const FS: &str = "#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.); }";

  #[test]
  fn build_valid_pipeline() {
    let mut ctx = MockContext::new();

    let program = ProgramBuilder::new()
      .stage(StageType::Vertex, VS)
      .stage(StageType::Fragment, FS)
      .build(&mut ctx);

    assert!(program.is_ok());

    let state = ctx.state();
    let state = state.borrow();
    // stage objects are released right after the link, the program survives
    assert_eq!(state.live_stages, 0);
    assert_eq!(state.live_programs, 1);
    assert_eq!(state.attached_total, state.detached_total);
  }

  #[test]
  fn from_sources_builds_vertex_fragment() {
    let mut ctx = MockContext::new();

    let program = Program::from_sources(&mut ctx, VS, None, FS);
    assert!(program.is_ok());
  }

  #[test]
  fn compile_failure_reports_stage_and_log() {
    let mut ctx = MockContext::new();

    let program = ProgramBuilder::new()
      .stage(StageType::Vertex, VS)
      .stage(StageType::Fragment, "#version 330 core\n#error boom")
      .build(&mut ctx);

    match program {
      Err(ProgramError::StageError(StageError::CompilationFailed(ty, log))) => {
        assert_eq!(ty, StageType::Fragment);
        assert!(!log.is_empty());
      }

      other => panic!("expected a fragment compilation failure, got {:?}", other.err()),
    }

    let state = ctx.state();
    let state = state.borrow();
    // the vertex stage that did compile was released on the early return
    assert_eq!(state.live_stages, 0);
    assert_eq!(state.live_programs, 0);
  }

  #[test]
  fn link_failure_still_detaches_every_stage() {
    let mut ctx = MockContext::new();

    // a vertex-only program fails to link (the mock driver wants a fragment stage too)
    let program = ProgramBuilder::new().stage(StageType::Vertex, VS).build(&mut ctx);

    match program {
      Err(ProgramError::LinkFailed(log)) => assert!(!log.is_empty()),
      other => panic!("expected a link failure, got {:?}", other.err()),
    }

    let state = ctx.state();
    let state = state.borrow();
    assert_eq!(state.attached_total, state.detached_total);
    // no program was destroyed while still holding attachments
    assert_eq!(state.dangling_attachments, 0);
    assert_eq!(state.live_programs, 0);
    assert_eq!(state.live_stages, 0);
  }

  #[test]
  fn empty_builder_is_rejected_before_the_backend() {
    let mut ctx = MockContext::new();

    let program = ProgramBuilder::new().build(&mut ctx);
    assert_eq!(program.err(), Some(ProgramError::NoStage));

    let state = ctx.state();
    let state = state.borrow();
    assert_eq!(state.live_stages, 0);
    assert_eq!(state.live_programs, 0);
    assert!(state.ops.is_empty());
  }

  #[test]
  fn dropping_a_program_releases_it() {
    let mut ctx = MockContext::new();

    let program = Program::from_sources(&mut ctx, VS, None, FS).unwrap();
    drop(program);

    assert_eq!(ctx.state().borrow().live_programs, 0);
  }

  #[test]
  fn link_rejects_an_empty_stage_set() {
    let mut ctx = MockContext::new();

    let stages: Vec<Stage<_>> = Vec::new();
    let program = Program::link(&mut ctx, &stages);
    assert_eq!(program.err(), Some(ProgramError::NoStage));
  }

  #[test]
  fn missing_source_file_degrades_to_empty_string() {
    let src = read_stage_source("/definitely/not/a/shader.glsl");
    assert!(src.is_empty());
  }

  #[test]
  fn source_file_is_read_back() {
    let path = std::env::temp_dir().join("fanfare-test-stage.glsl");
    std::fs::write(&path, "void main() {}").unwrap();

    assert_eq!(read_stage_source(&path), "void main() {}");

    let _ = std::fs::remove_file(&path);
  }
}
