//! Graphics context.
//!
//! A graphics context is an object that owns a backend and hands out access to it. It is the
//! explicit stand-in for what graphics APIs usually keep as an implicit, thread-bound singleton:
//! by making the context a value that every operation takes, several backends (a real one, a
//! recording one for tests) can coexist without hidden global mutation.
//!
//! A context must not be moved across threads. Backends enforce this by being `!Send` and
//! `!Sync`; a single thread owns all the calls made through a given context.

/// Class of graphics contexts.
///
/// # Safety
///
/// Implementations must guarantee that the backend returned by [`GraphicsContext::backend`] is
/// only ever used from the thread the context was created on.
pub unsafe trait GraphicsContext {
  /// Backend owned by this context.
  type Backend: ?Sized;

  /// Access the underlying backend.
  fn backend(&mut self) -> &mut Self::Backend;
}
