//! A recording backend for tests.
//!
//! The mock hands out plain integer handles, counts live resources and logs every frame
//! operation, so tests can assert on resource lifetimes and call ordering without a GPU. It
//! imitates two driver behaviors worth testing against: sources containing `#error` fail to
//! compile, and programs missing either a vertex or a fragment stage fail to link.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::frame::Frame;
use crate::backend::geometry::Geometry;
use crate::backend::shader::Shader;
use crate::context::GraphicsContext;
use crate::geometry::{GeometryError, Mode, VertexAttrib, VertexLayout};
use crate::pipeline::PipelineState;
use crate::shader::{ProgramError, StageError, StageType};

/// One recorded frame operation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
  Clear([f32; 4]),
  ActivateProgram(u32),
  DeactivateProgram,
  BindGeometry(u32),
  EnableAttrib {
    location: u32,
    dim: usize,
    offset: usize,
  },
  Draw {
    mode: Mode,
    vert_nb: usize,
  },
  DisableAttrib(u32),
  UnbindGeometry(u32),
}

/// Shared ledger of everything the mock backend has seen.
#[derive(Debug, Default)]
pub(crate) struct MockState {
  next_handle: u32,
  pub(crate) live_stages: usize,
  pub(crate) live_programs: usize,
  pub(crate) live_geometries: usize,
  pub(crate) attached_total: usize,
  pub(crate) detached_total: usize,
  /// Attachments still present on a program at the time it was destroyed.
  pub(crate) dangling_attachments: usize,
  pub(crate) current_program: Option<u32>,
  pub(crate) bound_geometry: Option<u32>,
  pub(crate) enabled_attribs: Vec<u32>,
  pub(crate) ops: Vec<Op>,
}

impl MockState {
  fn gen_handle(&mut self) -> u32 {
    self.next_handle += 1;
    self.next_handle
  }
}

#[derive(Debug)]
pub(crate) struct MockStage {
  id: u32,
  ty: StageType,
  state: Rc<RefCell<MockState>>,
}

#[derive(Debug)]
pub(crate) struct MockProgram {
  id: u32,
  attached: Vec<(u32, StageType)>,
  state: Rc<RefCell<MockState>>,
}

#[derive(Debug)]
pub(crate) struct MockGeometry {
  id: u32,
  state: Rc<RefCell<MockState>>,
}

/// The recording backend itself.
#[derive(Debug)]
pub(crate) struct Mock {
  state: Rc<RefCell<MockState>>,
}

impl Mock {
  fn new() -> Self {
    Mock {
      state: Rc::new(RefCell::new(MockState::default())),
    }
  }
}

unsafe impl Shader for Mock {
  type StageRepr = MockStage;
  type ProgramRepr = MockProgram;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    if src.contains("#error") {
      return Err(StageError::CompilationFailed(
        ty,
        format!("0:1: preprocessor error in {}", ty),
      ));
    }

    let mut state = self.state.borrow_mut();
    let id = state.gen_handle();
    state.live_stages += 1;

    Ok(MockStage {
      id,
      ty,
      state: self.state.clone(),
    })
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    stage.state.borrow_mut().live_stages -= 1;
  }

  unsafe fn new_program(&mut self) -> Result<Self::ProgramRepr, ProgramError> {
    let mut state = self.state.borrow_mut();
    let id = state.gen_handle();
    state.live_programs += 1;

    Ok(MockProgram {
      id,
      attached: Vec::new(),
      state: self.state.clone(),
    })
  }

  unsafe fn attach_stage(&mut self, program: &mut Self::ProgramRepr, stage: &Self::StageRepr) {
    program.attached.push((stage.id, stage.ty));
    self.state.borrow_mut().attached_total += 1;
  }

  unsafe fn detach_stage(&mut self, program: &mut Self::ProgramRepr, stage: &Self::StageRepr) {
    program.attached.retain(|&(id, _)| id != stage.id);
    self.state.borrow_mut().detached_total += 1;
  }

  unsafe fn link_program(&mut self, program: &mut Self::ProgramRepr) -> Result<(), ProgramError> {
    let has = |wanted| program.attached.iter().any(|&(_, ty)| ty == wanted);

    if has(StageType::Vertex) && has(StageType::Fragment) {
      Ok(())
    } else {
      Err(ProgramError::LinkFailed(
        "link error: program lacks a vertex or fragment stage".to_owned(),
      ))
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    let mut state = program.state.borrow_mut();
    state.dangling_attachments += program.attached.len();
    state.live_programs -= 1;
  }
}

unsafe impl Geometry for Mock {
  type GeometryRepr = MockGeometry;

  unsafe fn new_geometry(
    &mut self,
    _vertices: &[f32],
    _layout: &VertexLayout,
    _mode: Mode,
  ) -> Result<Self::GeometryRepr, GeometryError> {
    let mut state = self.state.borrow_mut();
    let id = state.gen_handle();
    state.live_geometries += 1;

    Ok(MockGeometry {
      id,
      state: self.state.clone(),
    })
  }

  unsafe fn destroy_geometry(geometry: &mut Self::GeometryRepr) {
    geometry.state.borrow_mut().live_geometries -= 1;
  }
}

unsafe impl Frame for Mock {
  unsafe fn clear_frame(&mut self, pipeline_state: &PipelineState) {
    self
      .state
      .borrow_mut()
      .ops
      .push(Op::Clear(pipeline_state.clear_color));
  }

  unsafe fn activate_program(&mut self, program: &Self::ProgramRepr) {
    let mut state = self.state.borrow_mut();
    state.current_program = Some(program.id);
    state.ops.push(Op::ActivateProgram(program.id));
  }

  unsafe fn deactivate_program(&mut self) {
    let mut state = self.state.borrow_mut();
    state.current_program = None;
    state.ops.push(Op::DeactivateProgram);
  }

  unsafe fn bind_geometry(&mut self, geometry: &Self::GeometryRepr) {
    let mut state = self.state.borrow_mut();
    state.bound_geometry = Some(geometry.id);
    state.ops.push(Op::BindGeometry(geometry.id));
  }

  unsafe fn enable_attrib(&mut self, attrib: &VertexAttrib, offset: usize) {
    let mut state = self.state.borrow_mut();
    state.enabled_attribs.push(attrib.location);
    state.ops.push(Op::EnableAttrib {
      location: attrib.location,
      dim: attrib.dim,
      offset,
    });
  }

  unsafe fn disable_attrib(&mut self, location: u32) {
    let mut state = self.state.borrow_mut();
    state.enabled_attribs.retain(|&l| l != location);
    state.ops.push(Op::DisableAttrib(location));
  }

  unsafe fn draw(&mut self, mode: Mode, vert_nb: usize) {
    self.state.borrow_mut().ops.push(Op::Draw { mode, vert_nb });
  }

  unsafe fn unbind_geometry(&mut self, geometry: &Self::GeometryRepr) {
    let mut state = self.state.borrow_mut();
    state.bound_geometry = None;
    state.ops.push(Op::UnbindGeometry(geometry.id));
  }
}

/// A context owning a [`Mock`] backend.
#[derive(Debug)]
pub(crate) struct MockContext {
  backend: Mock,
}

impl MockContext {
  pub(crate) fn new() -> Self {
    MockContext {
      backend: Mock::new(),
    }
  }

  /// Shared handle on the recording ledger.
  pub(crate) fn state(&self) -> Rc<RefCell<MockState>> {
    self.backend.state.clone()
  }
}

unsafe impl GraphicsContext for MockContext {
  type Backend = Mock;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}
