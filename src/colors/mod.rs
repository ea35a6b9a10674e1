//! Color math shared by both plugins: color-space conversions and palette ramps.

#![forbid(unsafe_code)]

/// HSL, RGB and hex conversions.
pub mod convert;
/// Shade ramps generated from HSL color entries.
pub mod generator;
