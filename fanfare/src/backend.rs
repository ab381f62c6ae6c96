//! Backend interfacing.
//!
//! A backend implements the unsafe traits found in the submodules with its own representation
//! types. The API crates (`fanfare-gl`, etc.) provide the real implementations; the core never
//! touches a graphics API directly.
//!
//! Resource destructors are associated functions that do not take the backend: representation
//! types are expected to carry whatever shared state they need to clean up after themselves, so
//! that the safe wrappers can release resources from `Drop` without borrowing the context.

pub mod frame;
pub mod geometry;
pub mod shader;

#[cfg(test)]
pub(crate) mod mock;
