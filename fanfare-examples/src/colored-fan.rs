//! A fan with per-vertex colors, stored block-wise: all positions first, then all colors.
//!
//! The color attribute rides in the same buffer as the positions; the layout places its block
//! right after the position block and the renderer derives the offsets.
//!
//! Press <escape> to quit or close the window.

use fanfare::geometry::{Geometry, Mode, VertexLayout};
use fanfare::pipeline::{self, PipelineState, Viewport};
use fanfare::shader::Program;
use fanfare_glfw::GlfwSurface;
use glfw::{Action, Context as _, Key, WindowEvent};
use std::error::Error;
use std::process;

const VS: &str = include_str!("colored-fan-vs.glsl");
const FS: &str = include_str!("colored-fan-fs.glsl");

// Position block, then color block: a warm pivot fading to cool rim vertices.
#[rustfmt::skip]
const FAN_VERTICES: [f32; 40] = [
  // positions
   0.0,  0.5, 0., 1.,
   0.0,  0.0, 0., 1.,
   0.5,  0.0, 0., 1.,
   0.0, -0.5, 0., 1.,
  -0.5,  0.0, 0., 1.,
  // colors
  0., 0., 1., 1.,
  1., 1., 1., 1.,
  0., 1., 0., 1.,
  0., 0., 1., 1.,
  0., 1., 0., 1.,
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
      glfw.create_window(960, 540, "Colored fan", glfw::WindowMode::Windowed)?;

    window.make_current();
    window.set_key_polling(true);
    window.set_close_polling(true);
    window.set_framebuffer_size_polling(true);

    Some((window, events_rx))
  })?;

  let mut ctx = surface.context;
  let events_rx = surface.events_rx;

  let program = Program::from_sources(&mut ctx, VS, None, FS)?;
  let fan = Geometry::new(
    &mut ctx,
    &FAN_VERTICES,
    VertexLayout::positions_colors(),
    Mode::TriangleFan,
  )?;

  log::info!(
    "rendering a colored fan with {} attributes per vertex",
    fan.layout().attribs().len()
  );

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
