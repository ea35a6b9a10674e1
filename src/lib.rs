//! Library crate for stylekit: the style inspector and palette generator plugins, their
//! host boundary and the UI channel runtime, exposed for the binaries and tests.

pub mod colors;
pub mod config;
pub mod dto;
pub mod error;
pub mod host;
pub mod runtime;
pub mod services;
pub mod state;
pub mod style;
