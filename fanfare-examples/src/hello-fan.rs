//! This program renders a blue fan of triangles and is the hello world of fanfare.
//!
//! The shader program and the geometry are both built once, before the main loop. Pass a
//! directory as first argument to load the shader sources from `fan-vs.glsl` and `fan-fs.glsl` in
//! that directory instead of the compiled-in ones; an unreadable file degrades into an ordinary
//! compile error.
//!
//! Press <escape> to quit or close the window.

use fanfare::geometry::{Geometry, Mode, VertexLayout};
use fanfare::pipeline::{self, PipelineState, Viewport};
use fanfare::shader::{read_stage_source, Program};
use fanfare_glfw::GlfwSurface;
use glfw::{Action, Context as _, Key, WindowEvent};
use std::error::Error;
use std::path::Path;
use std::process;

const VS: &str = include_str!("fan-vs.glsl");
const FS: &str = include_str!("fan-fs.glsl");

// The fan, as vec4 positions around its (0, 0) pivot.
#[rustfmt::skip]
const FAN_POSITIONS: [f32; 20] = [
   0.0,  0.5, 0., 1.,
   0.0,  0.0, 0., 1.,
   0.5,  0.0, 0., 1.,
   0.0, -0.5, 0., 1.,
  -0.5,  0.0, 0., 1.,
];

fn main() {
  env_logger::init();

  if let Err(e) = run() {
    eprintln!("{}", e);
    process::exit(1);
  }
}

fn run() -> Result<(), Box<dyn Error>> {
  let surface = GlfwSurface::new(|glfw| {
    let (mut window, events_rx) =
      glfw.create_window(960, 540, "Hello, fan!", glfw::WindowMode::Windowed)?;

    window.make_current();
    window.set_key_polling(true);
    window.set_close_polling(true);
    window.set_framebuffer_size_polling(true);

    Some((window, events_rx))
  })?;

  let mut ctx = surface.context;
  let events_rx = surface.events_rx;

  let (vs, fs) = match std::env::args().nth(1) {
    Some(dir) => {
      let dir = Path::new(&dir).to_owned();
      log::info!("loading shader sources from {}", dir.display());
      (
        read_stage_source(dir.join("fan-vs.glsl")),
        read_stage_source(dir.join("fan-fs.glsl")),
      )
    }

    None => (VS.to_owned(), FS.to_owned()),
  };

  let program = Program::from_sources(&mut ctx, &vs, None, &fs)?;
  let fan = Geometry::new(
    &mut ctx,
    &FAN_POSITIONS,
    VertexLayout::positions(),
    Mode::TriangleFan,
  )?;

  log::info!("rendering a {}-vertex fan", fan.vert_nb());

  let mut state = PipelineState::default();

  'app: loop {
    ctx.window.glfw.poll_events();

    for (_, event) in events_rx.try_iter() {
      match event {
        WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => break 'app,

        WindowEvent::FramebufferSize(width, height) => {
          log::info!("framebuffer resized to {}x{}", width, height);

          state = state.set_viewport(Viewport::Specific {
            x: 0,
            y: 0,
            width: width as u32,
            height: height as u32,
          });
        }

        _ => (),
      }
    }

    pipeline::render(&mut ctx, &state, &program, &fan);

    ctx.window.swap_buffers();
  }

  Ok(())
}
