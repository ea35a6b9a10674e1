/// Messages exchanged with the style inspector UI.
pub mod inspector;
/// Messages exchanged with the palette generator UI.
pub mod palette;
