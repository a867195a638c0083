//! Repository list feature slice.
//!
//! Owns the repository machine, which is only meaningful while the session
//! is authenticated.

mod render;
mod state;
mod update;

pub use render::render_repo_panel;
pub use state::{RepoState, RepoStatus};
pub use update::{apply, handle_load, handle_load_completed, handle_open_selected};
