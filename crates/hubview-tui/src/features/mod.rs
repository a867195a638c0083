//! Feature slices for the TUI (state/update/render per slice).

pub mod repos;
pub mod session;
