/// Schema document of the UI protocol.
pub mod documentation;
/// Style inspector message handling.
pub mod inspector_service;
/// Palette generator message handling.
pub mod palette_service;
