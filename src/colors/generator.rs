use uuid::Uuid;

use super::convert::{hsl_to_rgb, rgb_to_hex};

/// Total lightness spread (in percentage points) covered by one shade ramp.
const LIGHTNESS_SPREAD: f64 = 20.0;
/// Upper bound of the cosmetic shade label scale.
const SHADE_LABEL_MAX: f64 = 1000.0;

/// One base color submitted by the user, expanded into a ramp of shades.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorEntry {
    /// Identifier linking generated shades back to this entry.
    pub id: Uuid,
    /// Prefix used for every generated shade name.
    pub name: String,
    /// Hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// Saturation in percent, `[0, 100]`.
    pub saturation: f64,
    /// Base lightness in percent, `[0, 100]`.
    pub lightness: f64,
    /// Number of shades to produce.
    pub shade_count: u32,
}

/// One shade of a generated palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedColor {
    /// `{entry name}-{shade label}`.
    pub name: String,
    /// Uppercase `#RRGGBB`.
    pub hex: String,
    /// Identifier of the [`ColorEntry`] this shade was generated from.
    pub original_entry_id: Uuid,
}

/// Expand every entry into its shade ramp, entries in input order and shades by index.
#[must_use]
pub fn generate_palette(entries: &[ColorEntry]) -> Vec<GeneratedColor> {
    entries.iter().flat_map(generate_shades).collect()
}

/// Expand a single entry into `shade_count` shades spread ±10 lightness around the base.
///
/// A ramp of fewer than two shades has no spread to divide, so it collapses to the
/// base color labelled `-0`.
#[must_use]
pub fn generate_shades(entry: &ColorEntry) -> Vec<GeneratedColor> {
    if entry.shade_count < 2 {
        let base = hsl_to_rgb(entry.hue, entry.saturation, entry.lightness);
        return vec![GeneratedColor {
            name: format!("{}-0", entry.name),
            hex: rgb_to_hex(base),
            original_entry_id: entry.id,
        }];
    }

    let steps = f64::from(entry.shade_count - 1);
    let label_step = SHADE_LABEL_MAX / steps;
    let lightness_step = LIGHTNESS_SPREAD / steps;
    let midpoint = steps / 2.0;

    (0..entry.shade_count)
        .map(|i| {
            let i = f64::from(i);
            let lightness = (i - midpoint)
                .mul_add(lightness_step, entry.lightness)
                .clamp(0.0, 100.0);
            let rgb = hsl_to_rgb(entry.hue, entry.saturation, lightness);
            GeneratedColor {
                name: format!("{}-{}", entry.name, shade_label(i * label_step)),
                hex: rgb_to_hex(rgb),
                original_entry_id: entry.id,
            }
        })
        .collect()
}

#[inline]
fn shade_label(value: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let label = value.round() as u32;
    label
}
