//! Style inspection of design nodes: CSS extraction, bound tokens and document variables.

/// CSS declarations and HTML/CSS markup for a node.
pub mod extract;
/// Design tokens bound to a node's attributes.
pub mod tokens;
/// Listing of the document's variables.
pub mod variables;
