//! Session feature slice.
//!
//! ## Module Structure
//!
//! - `state.rs`: SessionState machine (Loading/Anonymous/Authenticated/Error)
//! - `update.rs`: session check, sign-out, and connect handlers
//! - `render.rs`: header and profile rendering

mod render;
mod state;
mod update;

pub(crate) use render::control_line;
pub use render::{render_profile, render_session_body};
pub use state::{SessionState, SessionStatus};
pub use update::{
    cancel_fetch, handle_connect, handle_fetch_completed, handle_logout, handle_logout_completed,
    start_lifetime,
};
