//! Geometry model for farm and field boundaries.
//!
//! A [`Geometry`] is one of six kinds, each stored as nested coordinate
//! sequences the same way GeoJSON nests its `coordinates` member:
//! - Point: one coordinate
//! - LineString: two or more coordinates
//! - Polygon: rings, the first being the exterior and the rest holes
//! - MultiPoint / MultiLineString / MultiPolygon: sequences of the above
//!
//! Ring closure (first == last) is a convention and is never enforced here.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display};

use crate::errors::{GeometryError, GeometryResult};

/// A 2D coordinate (x = longitude/easting, y = latitude/northing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true when both ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate::new(x, y)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// GeoJSON positions are plain arrays: [x, y] on the way out, and any extra
// ordinates (elevation) are ignored on the way in.
impl Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.x, self.y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let position = Vec::<f64>::deserialize(deserializer)?;
        if position.len() < 2 {
            return Err(de::Error::invalid_length(
                position.len(),
                &"a position with at least two numbers",
            ));
        }
        Ok(Coordinate::new(position[0], position[1]))
    }
}

/// The six supported geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 6] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
    ];

    /// The uppercase WKT keyword for this kind.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
        }
    }

    /// Matches a WKT keyword case-insensitively.
    pub fn from_wkt_keyword(keyword: &str) -> Option<GeometryKind> {
        GeometryKind::ALL
            .into_iter()
            .find(|kind| kind.wkt_keyword().eq_ignore_ascii_case(keyword))
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
        };
        write!(f, "{}", name)
    }
}

/// Any supported geometry value.
///
/// Serializes to the GeoJSON geometry object shape,
/// `{"type": "Polygon", "coordinates": [[[0, 0], ...]]}`. Deserialization
/// goes through the same checks as the constructors, so an empty
/// coordinate array is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
#[serde(try_from = "RawGeometry")]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(Vec<Vec<Coordinate>>),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Vec<Vec<Coordinate>>>),
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum RawGeometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(Vec<Vec<Coordinate>>),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Vec<Vec<Coordinate>>>),
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        let geometry = match raw {
            RawGeometry::Point(c) => Geometry::Point(c),
            RawGeometry::LineString(c) => Geometry::LineString(c),
            RawGeometry::Polygon(c) => Geometry::Polygon(c),
            RawGeometry::MultiPoint(c) => Geometry::MultiPoint(c),
            RawGeometry::MultiLineString(c) => Geometry::MultiLineString(c),
            RawGeometry::MultiPolygon(c) => Geometry::MultiPolygon(c),
        };
        geometry.validate()?;
        Ok(geometry)
    }
}

impl Geometry {
    /// Creates a point geometry.
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    /// Creates a line string.
    ///
    /// # Errors
    /// Returns an error if fewer than 2 coordinates are provided.
    pub fn line_string(coordinates: Vec<Coordinate>) -> GeometryResult<Self> {
        let geometry = Geometry::LineString(coordinates);
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates a polygon from its exterior ring followed by any holes.
    ///
    /// # Errors
    /// Returns an error if there are no rings or a ring is empty.
    pub fn polygon(rings: Vec<Vec<Coordinate>>) -> GeometryResult<Self> {
        let geometry = Geometry::Polygon(rings);
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates a multi point.
    pub fn multi_point(points: Vec<Coordinate>) -> GeometryResult<Self> {
        let geometry = Geometry::MultiPoint(points);
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates a multi line string.
    pub fn multi_line_string(lines: Vec<Vec<Coordinate>>) -> GeometryResult<Self> {
        let geometry = Geometry::MultiLineString(lines);
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates a multi polygon.
    pub fn multi_polygon(polygons: Vec<Vec<Vec<Coordinate>>>) -> GeometryResult<Self> {
        let geometry = Geometry::MultiPolygon(polygons);
        geometry.validate()?;
        Ok(geometry)
    }

    /// Creates a closed rectangular polygon, wound counter-clockwise.
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Geometry::Polygon(vec![vec![
            Coordinate::new(min_x, min_y),
            Coordinate::new(max_x, min_y),
            Coordinate::new(max_x, max_y),
            Coordinate::new(min_x, max_y),
            Coordinate::new(min_x, min_y),
        ]])
    }

    /// Returns the kind of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Returns true for Polygon and MultiPolygon.
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    /// Iterates over every coordinate, rings and members in order.
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coordinate> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(c) | Geometry::MultiPoint(c) => Box::new(c.iter()),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                Box::new(rings.iter().flatten())
            }
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter().flatten().flatten()),
        }
    }

    /// Returns the number of coordinates in this geometry.
    pub fn num_coords(&self) -> usize {
        self.coords().count()
    }

    /// Checks the structural invariants of this geometry.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` when a coordinate array is empty or a
    /// line string has fewer than 2 coordinates.
    pub fn validate(&self) -> GeometryResult<()> {
        match self {
            Geometry::Point(_) => Ok(()),
            Geometry::LineString(line) => validate_line(line),
            Geometry::Polygon(rings) => validate_rings(rings),
            Geometry::MultiPoint(points) => {
                if points.is_empty() {
                    return Err(GeometryError::invalid_geometry(
                        "MultiPoint requires at least one point",
                    ));
                }
                Ok(())
            }
            Geometry::MultiLineString(lines) => {
                if lines.is_empty() {
                    return Err(GeometryError::invalid_geometry(
                        "MultiLineString requires at least one line",
                    ));
                }
                lines.iter().try_for_each(|line| validate_line(line))
            }
            Geometry::MultiPolygon(polygons) => {
                if polygons.is_empty() {
                    return Err(GeometryError::invalid_geometry(
                        "MultiPolygon requires at least one polygon",
                    ));
                }
                polygons.iter().try_for_each(|rings| validate_rings(rings))
            }
        }
    }
}

fn validate_line(line: &[Coordinate]) -> GeometryResult<()> {
    if line.len() < 2 {
        return Err(GeometryError::invalid_geometry(
            "LineString requires at least 2 coordinates",
        ));
    }
    Ok(())
}

fn validate_rings(rings: &[Vec<Coordinate>]) -> GeometryResult<()> {
    if rings.is_empty() {
        return Err(GeometryError::invalid_geometry(
            "Polygon requires at least one ring",
        ));
    }
    if rings.iter().any(|ring| ring.is_empty()) {
        return Err(GeometryError::invalid_geometry(
            "Polygon rings must not be empty",
        ));
    }
    Ok(())
}
