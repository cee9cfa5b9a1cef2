//! Splitting a farm boundary into field parcels.
//!
//! The farm's bounding box is cut into `n` equal strips, along X when the box
//! is wider than tall and along Y otherwise, and each strip is intersected
//! with the farm. Strips that miss a non-convex farm produce no field, so the
//! result may hold fewer than `n` features. Features come back in strip
//! order and are never merged.
//!
//! `n` is clamped to [`FarmGeometryConfig::max_fields`], and parcel
//! components no larger than the configured sliver area are discarded.

use crate::area::{format_acres, geometry_acres};
use crate::config::FarmGeometryConfig;
use crate::diagnostics::Diagnostics;
use crate::errors::GeometryError;
use crate::feature::{Feature, FeatureCollection, AREA_KEY, FARM_KEY, ID_KEY, NAME_KEY, TYPE_KEY};
use crate::set_ops;

/// `type` property value of generated fields.
pub const FIELD_TYPE: &str = "field";

/// Splits `farm` into at most `n` fields using the default configuration.
///
/// A farm without a Polygon or MultiPolygon geometry yields an empty
/// collection. For `n <= 1` the farm itself is returned unchanged.
///
/// ```rust
/// use farm_geometry::{split_into_fields, Feature, Geometry};
///
/// let farm = Feature::new(Geometry::rectangle(0.0, 0.0, 10.0, 10.0))
///     .with_property("id", "north")
///     .with_property("name", "North Farm");
/// let fields = split_into_fields(&farm, 2);
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields.features[1].id().as_deref(), Some("north_1"));
/// ```
pub fn split_into_fields(farm: &Feature, n: usize) -> FeatureCollection {
    split_into_fields_with_config(farm, n, &FarmGeometryConfig::default())
}

/// Splits `farm` into at most `n` fields.
pub fn split_into_fields_with_config(
    farm: &Feature,
    n: usize,
    config: &FarmGeometryConfig,
) -> FeatureCollection {
    split_into_fields_with_diagnostics(farm, n, config).0
}

/// Splits `farm` into at most `n` fields, reporting skipped strips.
///
/// Strips whose intersection with the farm is empty, or only a sliver, are
/// dropped silently; strips whose intersection fails are dropped and
/// recorded. A clamped `n` is recorded as [`SkipKind::LimitExceeded`].
///
/// [`SkipKind::LimitExceeded`]: crate::diagnostics::SkipKind::LimitExceeded
pub fn split_into_fields_with_diagnostics(
    farm: &Feature,
    n: usize,
    config: &FarmGeometryConfig,
) -> (FeatureCollection, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    let geometry = match &farm.geometry {
        Some(geometry) if geometry.is_polygonal() => geometry,
        Some(geometry) => {
            let error = GeometryError::invalid_geometry(format!(
                "farm must be a Polygon or MultiPolygon, got {}",
                geometry.kind()
            ));
            log::warn!("Cannot split farm: {}", error);
            diagnostics.record(None, &error);
            return (FeatureCollection::new(), diagnostics);
        }
        None => {
            log::warn!("Cannot split farm without geometry");
            diagnostics.record_missing(None);
            return (FeatureCollection::new(), diagnostics);
        }
    };

    if n <= 1 {
        return (FeatureCollection::single(farm.clone()), diagnostics);
    }

    let bbox = match set_ops::bbox(geometry) {
        Some(bbox) => bbox,
        None => {
            diagnostics.record(None, &GeometryError::invalid_geometry("farm has no coordinates"));
            return (FeatureCollection::new(), diagnostics);
        }
    };

    let limit = config.max_fields();
    let n = if n > limit {
        log::warn!("Limiting split of {} fields to {}", n, limit);
        diagnostics.record_limit(n, limit);
        limit
    } else {
        n
    };
    let min_area = config.sliver_area(&bbox);

    let farm_id = farm
        .id()
        .unwrap_or_else(|| config.fallback_farm_id().to_string());
    let farm_name = farm
        .name()
        .unwrap_or_else(|| config.fallback_farm_name().to_string());
    log::debug!(
        "Splitting farm '{}' into {} strips along {:?} of {}",
        farm_id,
        n,
        bbox.slice_axis(),
        bbox
    );

    let mut fields = FeatureCollection::new();
    for (index, strip) in bbox.strips(n).into_iter().enumerate() {
        let parcel = set_ops::intersect(&strip.to_polygon(), geometry)
            .map(|parcel| parcel.and_then(|p| set_ops::drop_slivers(p, min_area)));
        match parcel {
            Ok(Some(parcel)) => {
                let acres = geometry_acres(&parcel, config.area_mode());
                fields.push(
                    Feature::new(parcel)
                        .with_property(ID_KEY, format!("{}_{}", farm_id, index))
                        .with_property(NAME_KEY, format!("Field {}", index + 1))
                        .with_property(TYPE_KEY, FIELD_TYPE)
                        .with_property(FARM_KEY, farm_name.as_str())
                        .with_property(AREA_KEY, format_acres(acres)),
                );
            }
            Ok(None) => log::debug!("Strip {} of farm '{}' is empty", index, farm_id),
            Err(error) => {
                log::warn!("Dropping strip {} of farm '{}': {}", index, farm_id, error);
                diagnostics.record(Some(index), &error);
            }
        }
    }

    (fields, diagnostics)
}
