/// Per-plugin session state.
pub mod session;
