//! Effect handlers for the runtimes.
//!
//! Handlers are pure async functions returning a `TaskResult`. They perform
//! I/O through `ApiClient` and never touch state; the runtime wraps their
//! result in a `TaskCompleted` event.

pub mod repos;
pub mod session;

pub use repos::*;
pub use session::*;
