//! Color utilities: named colors, intensity blends, and heatmap ramps.
//!
//! The rendering layer consumes hex strings; everything here produces
//! lowercase `#rrggbb`. Ramps blend linearly from white toward the base
//! color, so higher intensity reads as more saturated.

/// Default color for plain filter matches.
pub const DEFAULT_FILTER_COLOR: &str = "yellow";

/// Color for regions matched by a cross-metric comparison.
pub const COMPARISON_COLOR: &str = "orange";

/// Reserved color for regions claimed by more than one colored condition.
pub const OVERLAP_COLOR: &str = "purple";

/// Lowest gradient intensity assigned to the last rank in a ranking.
pub const MIN_RANK_INTENSITY: f64 = 0.3;

/// RGB for a named color. Unrecognized names fall back to red so that a
/// bad scheme still renders something visible.
#[must_use]
pub fn base_rgb(name: &str) -> (u8, u8, u8) {
    match name {
        "blue" => (33, 102, 172),
        "green" => (27, 120, 55),
        "yellow" => (255, 191, 0),
        "orange" => (230, 126, 34),
        "purple" => (118, 42, 131),
        "pink" => (231, 84, 128),
        "cyan" => (0, 139, 139),
        "magenta" => (199, 21, 133),
        "brown" => (121, 85, 72),
        "gray" | "grey" => (99, 99, 99),
        _ => (178, 24, 43),
    }
}

/// Blends white toward the base color and formats `#rrggbb`.
///
/// `intensity` is clamped to `[0, 1]`: 0 is white, 1 is the full base
/// color.
#[must_use]
pub fn intensity_hex(color: &str, intensity: f64) -> String {
    let (r, g, b) = base_rgb(color);
    let t = intensity.clamp(0.0, 1.0);

    let blend = |channel: u8| -> u8 {
        let blended = f64::from(channel).mul_add(t, 255.0 * (1.0 - t));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = blended.round().clamp(0.0, 255.0) as u8;
        rounded
    };

    format!("#{:02x}{:02x}{:02x}", blend(r), blend(g), blend(b))
}

/// Maps a value's position within `[min, max]` onto the scheme's ramp.
///
/// A degenerate range (max ≤ min) renders at full intensity.
#[must_use]
pub fn heatmap_hex(value: f64, min: f64, max: f64, scheme: &str) -> String {
    let t = if max - min <= f64::EPSILON {
        1.0
    } else {
        (value - min) / (max - min)
    };
    intensity_hex(scheme, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_intensity_is_base_color() {
        assert_eq!(intensity_hex("blue", 1.0), "#2166ac");
        assert_eq!(intensity_hex("red", 1.0), "#b2182b");
    }

    #[test]
    fn zero_intensity_is_white() {
        assert_eq!(intensity_hex("blue", 0.0), "#ffffff");
    }

    #[test]
    fn intensity_is_clamped() {
        assert_eq!(intensity_hex("blue", 2.0), intensity_hex("blue", 1.0));
        assert_eq!(intensity_hex("blue", -0.5), intensity_hex("blue", 0.0));
    }

    #[test]
    fn unknown_scheme_falls_back_to_red() {
        assert_eq!(intensity_hex("mauve", 1.0), intensity_hex("red", 1.0));
    }

    #[test]
    fn heatmap_ramp_endpoints() {
        assert_eq!(heatmap_hex(0.0, 0.0, 10.0, "green"), "#ffffff");
        assert_eq!(heatmap_hex(10.0, 0.0, 10.0, "green"), intensity_hex("green", 1.0));
    }

    #[test]
    fn degenerate_range_is_full_intensity() {
        assert_eq!(heatmap_hex(5.0, 5.0, 5.0, "blue"), intensity_hex("blue", 1.0));
    }

    #[test]
    fn grey_and_gray_are_the_same() {
        assert_eq!(base_rgb("gray"), base_rgb("grey"));
    }
}
