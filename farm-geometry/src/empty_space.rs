//! Uncovered parts of a farm.
//!
//! The field geometries are unioned one at a time and the union is
//! subtracted from the farm. Whatever remains is returned as "empty space"
//! features, one per disjoint component. Components no larger than the
//! configured sliver area are discarded, so fields that tile the farm
//! exactly leave no empty space.

use crate::area::{format_acres, geometry_acres};
use crate::config::FarmGeometryConfig;
use crate::diagnostics::Diagnostics;
use crate::errors::GeometryResult;
use crate::feature::{Feature, FeatureCollection, AREA_KEY, FARM_KEY, ID_KEY, NAME_KEY, TYPE_KEY};
use crate::geometry::Geometry;
use crate::set_ops;

/// `type` property value of empty-space features.
pub const EMPTY_SPACE_TYPE: &str = "empty-space";

const EMPTY_SPACE_NAME: &str = "Uncategorized Area";

/// Computes the parts of `farm` not covered by any of `fields`.
///
/// With no fields the farm is returned unchanged. Fields whose geometry
/// cannot be used are skipped; see
/// [`compute_empty_spaces_with_diagnostics`] to find out which.
///
/// ```rust
/// use farm_geometry::{compute_empty_spaces, Feature, Geometry};
///
/// let farm = Feature::new(Geometry::rectangle(0.0, 0.0, 10.0, 10.0));
/// let field = Feature::new(Geometry::rectangle(0.0, 0.0, 10.0, 4.0));
/// let empty = compute_empty_spaces(&farm, &[field]);
/// assert_eq!(empty.len(), 1);
/// assert_eq!(empty.features[0].name().as_deref(), Some("Uncategorized Area"));
/// ```
pub fn compute_empty_spaces(farm: &Feature, fields: &[Feature]) -> FeatureCollection {
    compute_empty_spaces_with_config(farm, fields, &FarmGeometryConfig::default())
}

/// Computes the parts of `farm` not covered by any of `fields`.
pub fn compute_empty_spaces_with_config(
    farm: &Feature,
    fields: &[Feature],
    config: &FarmGeometryConfig,
) -> FeatureCollection {
    compute_empty_spaces_with_diagnostics(farm, fields, config).0
}

/// Computes the parts of `farm` not covered by any of `fields`, reporting
/// skipped fields and a failed difference.
pub fn compute_empty_spaces_with_diagnostics(
    farm: &Feature,
    fields: &[Feature],
    config: &FarmGeometryConfig,
) -> (FeatureCollection, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    let farm_geometry = match &farm.geometry {
        Some(geometry) => geometry,
        None => {
            log::warn!("Cannot compute empty space of a farm without geometry");
            diagnostics.record_missing(None);
            return (FeatureCollection::new(), diagnostics);
        }
    };

    if fields.is_empty() {
        return (FeatureCollection::single(farm.clone()), diagnostics);
    }

    let covered = match union_fields(fields, &mut diagnostics) {
        Some(covered) => covered,
        None => {
            log::debug!("None of the {} fields could be used", fields.len());
            return (FeatureCollection::new(), diagnostics);
        }
    };

    let min_area = set_ops::bbox(farm_geometry)
        .map(|bbox| config.sliver_area(&bbox))
        .unwrap_or(0.0);
    let remainder = match set_ops::difference(farm_geometry, &covered) {
        Ok(Some(remainder)) => match set_ops::drop_slivers(remainder, min_area) {
            Some(remainder) => remainder,
            None => {
                log::debug!("Fields cover the farm up to slivers");
                return (FeatureCollection::new(), diagnostics);
            }
        },
        Ok(None) => return (FeatureCollection::new(), diagnostics),
        Err(error) => {
            log::warn!("Cannot subtract fields from farm: {}", error);
            diagnostics.record(None, &error);
            return (FeatureCollection::new(), diagnostics);
        }
    };

    let farm_name = farm
        .name()
        .unwrap_or_else(|| config.fallback_farm_name().to_string());

    let spaces = match remainder {
        Geometry::MultiPolygon(polygons) => polygons
            .into_iter()
            .enumerate()
            .map(|(index, rings)| {
                empty_space(
                    Geometry::Polygon(rings),
                    index,
                    format!("{} {}", EMPTY_SPACE_NAME, index + 1),
                    &farm_name,
                    config,
                )
            })
            .collect(),
        single => FeatureCollection::single(empty_space(
            single,
            0,
            EMPTY_SPACE_NAME.to_string(),
            &farm_name,
            config,
        )),
    };
    log::debug!("Found {} empty spaces in farm '{}'", spaces.len(), farm_name);

    (spaces, diagnostics)
}

/// Unions field geometries left to right, skipping unusable fields.
fn union_fields(fields: &[Feature], diagnostics: &mut Diagnostics) -> Option<Geometry> {
    let mut covered: Option<Geometry> = None;

    for (index, field) in fields.iter().enumerate() {
        let geometry = match &field.geometry {
            Some(geometry) => geometry,
            None => {
                log::warn!("Skipping field {}: no geometry", index);
                diagnostics.record_missing(Some(index));
                continue;
            }
        };

        let step = match &covered {
            None => validate_field(geometry).map(|_| Some(geometry.clone())),
            Some(acc) => set_ops::union(acc, geometry),
        };

        match step {
            // A degenerate field unions to nothing; keep what we have
            Ok(None) => {}
            Ok(merged) => covered = merged,
            Err(error) => {
                log::warn!("Skipping field {}: {}", index, error);
                diagnostics.record(Some(index), &error);
            }
        }
    }

    covered
}

/// Checks that the first contributing field could take part in a union.
fn validate_field(geometry: &Geometry) -> GeometryResult<()> {
    set_ops::to_geo(geometry).map(|_| ())
}

fn empty_space(
    geometry: Geometry,
    index: usize,
    name: String,
    farm_name: &str,
    config: &FarmGeometryConfig,
) -> Feature {
    let acres = geometry_acres(&geometry, config.area_mode());
    Feature::new(geometry)
        .with_property(ID_KEY, format!("empty-space-{}", index))
        .with_property(TYPE_KEY, EMPTY_SPACE_TYPE)
        .with_property(NAME_KEY, name)
        .with_property(FARM_KEY, farm_name)
        .with_property(AREA_KEY, format_acres(acres))
}
