//! # fanfare
//!
//! fanfare is a small, type-safe take on the classic graphics-pipeline setup sequence: compile
//! shader stages into stage objects, link them into an executable program, upload vertex data into
//! a GPU buffer and redraw a simple shape every frame.
//!
//! The crate is split in two layers:
//!
//! - A public, safe API: [`shader::Stage`], [`shader::Program`], [`geometry::Geometry`] and
//!   [`pipeline::render`]. Every GPU resource is a scoped-ownership wrapper that releases its
//!   backend resource on drop, including on early-return failure paths, so a failed build cannot
//!   leak handles nor hand you a half-valid program.
//! - A backend abstraction: the unsafe traits in [`backend`], implemented for a real graphics API
//!   by a backend crate (such as `fanfare-gl` for OpenGL 3.3).
//!
//! Operations never act on hidden global state. They all take a [`context::GraphicsContext`],
//! which owns the backend; this is what allows running the whole shader and frame logic against a
//! recording backend in tests, without a GPU.
//!
//! Failure is signalled with `Result`s carrying the failing stage type and the driver diagnostic
//! log, never with a status flag a caller could forget to check. Compile and link failures are
//! permanent conditions: callers are expected to abort startup rather than render with a partially
//! valid pipeline.

pub mod backend;
pub mod context;
pub mod geometry;
pub mod pipeline;
pub mod shader;
