use crate::gl33::GL33;
use fanfare::backend::shader::Shader;
use fanfare::shader::{ProgramError, StageError, StageType};
use gl::{self, types::*};
use std::cell::RefCell;
use std::ffi::CString;
use std::ptr::{null, null_mut};
use std::rc::Rc;

use crate::gl33::state::GLState;

#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
}

#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::CreationFailed(ty));
    }

    let c_src = CString::new(src.as_bytes()).unwrap();
    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
      gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

      gl::DeleteShader(handle);

      log.set_len(log_len as usize);

      Err(StageError::CompilationFailed(
        ty,
        String::from_utf8_lossy(&log).into_owned(),
      ))
    }
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    gl::DeleteShader(stage.handle);
  }

  unsafe fn new_program(&mut self) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    if handle == 0 {
      return Err(ProgramError::CreationFailed);
    }

    Ok(Program {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn attach_stage(&mut self, program: &mut Self::ProgramRepr, stage: &Self::StageRepr) {
    gl::AttachShader(program.handle, stage.handle);
  }

  unsafe fn detach_stage(&mut self, program: &mut Self::ProgramRepr, stage: &Self::StageRepr) {
    gl::DetachShader(program.handle, stage.handle);
  }

  unsafe fn link_program(&mut self, program: &mut Self::ProgramRepr) -> Result<(), ProgramError> {
    let handle = program.handle;

    gl::LinkProgram(handle);

    let mut linked: GLint = gl::FALSE.into();
    gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

    if linked == gl::TRUE.into() {
      Ok(())
    } else {
      let mut log_len: GLint = 0;
      gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
      gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

      log.set_len(log_len as usize);

      Err(ProgramError::LinkFailed(
        String::from_utf8_lossy(&log).into_owned(),
      ))
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    let mut state = program.state.borrow_mut();

    if state.current_program() == program.handle {
      state.use_program(0);
    }

    gl::DeleteProgram(program.handle);
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::Vertex => gl::VERTEX_SHADER,
    StageType::Geometry => gl::GEOMETRY_SHADER,
    StageType::Fragment => gl::FRAGMENT_SHADER,
  }
}
