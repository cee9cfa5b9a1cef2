//! Acreage calculation and area labels.

use geo::ChamberlainDuquetteArea;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{AreaMode, FarmGeometryConfig};
use crate::feature::Feature;
use crate::geometry::Geometry;
use crate::set_ops;

/// Square units (square meters for projected input) in one acre.
pub const SQUARE_METERS_PER_ACRE: f64 = 4046.8564224;

static ACRES_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d*)?|\.\d+)\s*acres?\b").expect("acre label pattern is valid")
});

/// Area of a feature in acres, rounded to 2 decimals.
///
/// Uses the planar (shoelace) area in the geometry's native units. Features
/// without a polygonal geometry have zero area.
///
/// ```rust
/// use farm_geometry::{area_in_acres, Feature, Geometry};
///
/// let side = 4046.8564224_f64.sqrt();
/// let field = Feature::new(Geometry::rectangle(0.0, 0.0, side, side));
/// assert_eq!(area_in_acres(&field), 1.0);
/// ```
pub fn area_in_acres(feature: &Feature) -> f64 {
    area_in_acres_with_config(feature, &FarmGeometryConfig::default())
}

/// Area of a feature in acres, using the configured [`AreaMode`].
pub fn area_in_acres_with_config(feature: &Feature, config: &FarmGeometryConfig) -> f64 {
    feature
        .geometry
        .as_ref()
        .map(|geometry| geometry_acres(geometry, config.area_mode()))
        .unwrap_or(0.0)
}

/// Area of a geometry in acres, rounded to 2 decimals.
pub fn geometry_acres(geometry: &Geometry, mode: AreaMode) -> f64 {
    let square_units = match mode {
        AreaMode::Planar => set_ops::planar_area(geometry),
        AreaMode::Spherical => match set_ops::to_geo(geometry) {
            Ok(multi) => multi.chamberlain_duquette_unsigned_area(),
            Err(_) => 0.0,
        },
    };
    round_to_hundredths(square_units / SQUARE_METERS_PER_ACRE)
}

/// Extracts the number from a `"<number> acre(s)"` label.
///
/// Matching is case-insensitive. Returns 0 when the label does not match.
pub fn parse_acres(label: &str) -> f64 {
    ACRES_LABEL
        .captures(label)
        .and_then(|captures| captures.get(1))
        .and_then(|number| number.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Formats an acreage as a label, e.g. `"12.34 acres"`.
pub fn format_acres(acres: f64) -> String {
    format!("{:.2} acres", round_to_hundredths(acres))
}

/// How much a field shrank between two area labels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldReduction {
    pub reduced: bool,
    pub reduction_acres: f64,
    pub reduction_percent: f64,
}

/// Compares two area labels using the default threshold of 0.01 acres.
///
/// ```rust
/// use farm_geometry::field_reduction;
///
/// let result = field_reduction("10 acres", "9.98 acres");
/// assert!(result.reduced);
/// assert_eq!(result.reduction_acres, 0.02);
/// ```
pub fn field_reduction(initial_label: &str, current_label: &str) -> FieldReduction {
    field_reduction_with_config(initial_label, current_label, &FarmGeometryConfig::default())
}

/// Compares two area labels.
///
/// A reduction is only reported when it exceeds the configured threshold,
/// which absorbs floating-point noise. Below the threshold, for growth, and
/// when the initial label does not parse to a positive number, the result is
/// all zeros and `reduced == false`.
pub fn field_reduction_with_config(
    initial_label: &str,
    current_label: &str,
    config: &FarmGeometryConfig,
) -> FieldReduction {
    let initial = parse_acres(initial_label);
    if initial <= 0.0 {
        return FieldReduction::default();
    }

    let reduction = initial - parse_acres(current_label);
    if reduction <= config.reduction_threshold_acres() {
        return FieldReduction::default();
    }

    FieldReduction {
        reduced: true,
        reduction_acres: round_to_hundredths(reduction),
        reduction_percent: round_to_hundredths(reduction / initial * 100.0),
    }
}

/// Rounds half-up to 2 decimals.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
