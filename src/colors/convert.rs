use palette::Srgb;

/// 8-bit sRGB triple, each channel in `0..=255`.
pub type Rgb8 = Srgb<u8>;
/// Normalized sRGB triple as handed out by the host, each channel in `0.0..=1.0`.
pub type UnitRgb = Srgb<f64>;

const BLACK: Rgb8 = Srgb::new(0, 0, 0);

/// Convert HSL (`h` in degrees, `s`/`l` in percent) to 8-bit RGB.
///
/// Inputs are expected in range; anything else yields an out-of-gamut value that
/// is clamped into `0..=255` channel by channel.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb8 {
    let s = s / 100.0;
    let l = l / 100.0;
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let f = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        to_byte(f * 255.0)
    };

    Srgb::new(channel(0.0), channel(8.0), channel(4.0))
}

/// Format an 8-bit color as `#RRGGBB` (uppercase).
#[must_use]
pub fn rgb_to_hex(color: Rgb8) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Parse `#RRGGBB` or `RRGGBB` (any case). Malformed input falls back to black.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Rgb8 {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return BLACK;
    }
    digits.parse::<Rgb8>().unwrap_or(BLACK)
}

/// Format a normalized host color as `#rrggbb` (lowercase).
#[must_use]
pub fn rgba_to_hex(color: UnitRgb) -> String {
    let r = to_byte(color.red * 255.0);
    let g = to_byte(color.green * 255.0);
    let b = to_byte(color.blue * 255.0);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Scale an 8-bit color back to the normalized form the host expects for paints.
#[must_use]
pub fn rgb_to_unit(color: Rgb8) -> UnitRgb {
    color.into_format()
}

#[inline]
fn to_byte(value: f64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let byte = value.round().clamp(0.0, 255.0) as u8;
    byte
}
