//! Planar set operations over the geometry model.
//!
//! Bounding boxes are computed directly on [`Geometry`]. Intersection, union
//! and difference are delegated to the `geo` crate's `BooleanOps`; this
//! module only converts between the two models and normalizes results:
//! - an empty result is `Ok(None)`
//! - a single component comes back as [`Geometry::Polygon`]
//! - several components come back as [`Geometry::MultiPolygon`], in the
//!   order `geo` produced them
//!
//! Snapping inside the boolean engine can leave slivers along shared edges
//! of inputs that tile exactly; [`drop_slivers`] removes them.
//!
//! Only Polygon and MultiPolygon inputs are accepted. A panic inside the
//! boolean engine, or non-finite input coordinates, surfaces as
//! [`GeometryError::OperationFailed`] instead of unwinding into the caller.

use std::panic::{self, AssertUnwindSafe};

use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon};

use crate::bounding_box::BoundingBox;
use crate::errors::{GeometryError, GeometryResult};
use crate::geometry::{Coordinate, Geometry};

/// Computes the axis-aligned bounding box of any geometry.
pub fn bbox(geometry: &Geometry) -> Option<BoundingBox> {
    BoundingBox::from_coords(geometry.coords())
}

/// Computes the region covered by both `a` and `b`.
pub fn intersect(a: &Geometry, b: &Geometry) -> GeometryResult<Option<Geometry>> {
    let (a, b) = (to_geo(a)?, to_geo(b)?);
    run_boolean_op("intersection", || a.intersection(&b))
}

/// Computes the region covered by `a`, `b` or both.
pub fn union(a: &Geometry, b: &Geometry) -> GeometryResult<Option<Geometry>> {
    let (a, b) = (to_geo(a)?, to_geo(b)?);
    run_boolean_op("union", || a.union(&b))
}

/// Computes the region covered by `a` but not by `b`.
pub fn difference(a: &Geometry, b: &Geometry) -> GeometryResult<Option<Geometry>> {
    let (a, b) = (to_geo(a)?, to_geo(b)?);
    run_boolean_op("difference", || a.difference(&b))
}

/// Planar area in the geometry's native units.
///
/// Non-areal geometries have zero area.
pub fn planar_area(geometry: &Geometry) -> f64 {
    match to_geo(geometry) {
        Ok(multi) => multi.unsigned_area(),
        Err(_) => 0.0,
    }
}

/// Removes polygon components whose planar area is at most `min_area`.
///
/// Returns `None` when no component survives. Non-polygonal geometries are
/// returned unchanged.
pub fn drop_slivers(geometry: Geometry, min_area: f64) -> Option<Geometry> {
    let mut polygons = match geometry {
        Geometry::Polygon(rings) => vec![rings],
        Geometry::MultiPolygon(polygons) => polygons,
        other => return Some(other),
    };

    let before = polygons.len();
    polygons.retain(|rings| polygon_area(rings) > min_area);
    if polygons.len() < before {
        log::debug!(
            "Dropped {} sliver(s) at or below {} square units",
            before - polygons.len(),
            min_area
        );
    }
    collect_polygons(polygons)
}

fn polygon_area(rings: &[Vec<Coordinate>]) -> f64 {
    to_geo_polygon(rings)
        .map(|polygon| polygon.unsigned_area())
        .unwrap_or(0.0)
}

fn run_boolean_op<F>(name: &str, op: F) -> GeometryResult<Option<Geometry>>
where
    F: FnOnce() -> MultiPolygon<f64>,
{
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(result) => Ok(from_geo(result)),
        Err(_) => {
            log::warn!("Planar {} aborted inside the boolean engine", name);
            Err(GeometryError::operation_failed(format!(
                "planar {} could not be computed",
                name
            )))
        }
    }
}

// ============================================================================
// Model conversion
// ============================================================================

/// Converts a polygonal geometry into a `geo` multipolygon.
///
/// # Errors
/// `InvalidGeometry` for non-polygonal kinds, `OperationFailed` for
/// non-finite coordinates.
pub(crate) fn to_geo(geometry: &Geometry) -> GeometryResult<MultiPolygon<f64>> {
    if !geometry.coords().all(Coordinate::is_finite) {
        return Err(GeometryError::operation_failed(
            "geometry contains non-finite coordinates",
        ));
    }

    match geometry {
        Geometry::Polygon(rings) => Ok(MultiPolygon::new(vec![to_geo_polygon(rings)?])),
        Geometry::MultiPolygon(polygons) => Ok(MultiPolygon::new(
            polygons
                .iter()
                .map(|rings| to_geo_polygon(rings))
                .collect::<GeometryResult<Vec<_>>>()?,
        )),
        other => Err(GeometryError::invalid_geometry(format!(
            "expected Polygon or MultiPolygon, got {}",
            other.kind()
        ))),
    }
}

fn to_geo_polygon(rings: &[Vec<Coordinate>]) -> GeometryResult<Polygon<f64>> {
    let (exterior, holes) = rings
        .split_first()
        .ok_or_else(|| GeometryError::invalid_geometry("polygon has no rings"))?;
    Ok(Polygon::new(
        to_geo_ring(exterior),
        holes.iter().map(|ring| to_geo_ring(ring)).collect(),
    ))
}

fn to_geo_ring(ring: &[Coordinate]) -> LineString<f64> {
    LineString::new(ring.iter().map(|c| Coord { x: c.x, y: c.y }).collect())
}

/// Converts a boolean-op result back, dropping collapsed components.
fn from_geo(multi: MultiPolygon<f64>) -> Option<Geometry> {
    let polygons: Vec<Vec<Vec<Coordinate>>> = multi
        .into_iter()
        .filter(|polygon| polygon.exterior().0.len() >= 4 && polygon.unsigned_area() > 0.0)
        .map(|polygon| {
            let (exterior, interiors) = polygon.into_inner();
            std::iter::once(exterior)
                .chain(interiors)
                .map(from_geo_ring)
                .collect()
        })
        .collect();
    collect_polygons(polygons)
}

fn collect_polygons(mut polygons: Vec<Vec<Vec<Coordinate>>>) -> Option<Geometry> {
    match polygons.len() {
        0 => None,
        1 => polygons.pop().map(Geometry::Polygon),
        _ => Some(Geometry::MultiPolygon(polygons)),
    }
}

fn from_geo_ring(ring: LineString<f64>) -> Vec<Coordinate> {
    ring.into_iter().map(|c| Coordinate::new(c.x, c.y)).collect()
}
