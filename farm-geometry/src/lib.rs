//! # Farm Geometry - Geometry Services for Farm Boundaries
//!
//! This crate provides the geometry layer of a farm-management application:
//! a WKT codec, GeoJSON-shaped features, partitioning of a farm into field
//! strips, detection of the farm area not covered by any field, and acreage
//! calculations.
//!
//! ## Features
//!
//! - **WKT Codec**: Point, LineString, Polygon and their Multi variants, in both directions
//! - **GeoJSON Features**: serde-backed `Feature` and `FeatureCollection`
//! - **Field Partitioning**: Equal bounding-box strips clipped to the farm boundary
//! - **Empty Space**: Farm area left uncovered by the union of all fields
//! - **Acreage**: Planar or spherical area, `"12.34 acres"` labels, reduction checks
//! - **Best Effort**: Unusable members are skipped and reported through [`Diagnostics`]
//!
//! ## Quick Start
//!
//! ```rust
//! use farm_geometry::{compute_empty_spaces, split_into_fields, wkt_to_geometry, Feature};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let boundary = wkt_to_geometry("POLYGON ((0 0, 100 0, 100 50, 0 50, 0 0))")?;
//! let farm = Feature::new(boundary)
//!     .with_property("id", "home")
//!     .with_property("name", "Home Farm");
//!
//! // Four vertical strips, ids home_0 .. home_3
//! let fields = split_into_fields(&farm, 4);
//! assert_eq!(fields.len(), 4);
//!
//! // Dropping one field leaves one uncovered area
//! let kept: Vec<Feature> = fields.features[1..].to_vec();
//! let empty = compute_empty_spaces(&farm, &kept);
//! assert_eq!(empty.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Acreage
//!
//! ```rust
//! use farm_geometry::{field_reduction, format_acres, parse_acres};
//!
//! assert_eq!(parse_acres("12.5 acres"), 12.5);
//! assert_eq!(format_acres(3.0), "3.00 acres");
//! assert!(!field_reduction("10 acres", "9.995 acres").reduced);
//! ```

// Geometry model
pub mod bounding_box;
pub mod errors;
pub mod feature;
pub mod geometry;
pub mod wkt;

// Operations
pub mod area;
pub mod empty_space;
pub mod partition;
pub mod set_ops;

// Support
pub mod config;
pub mod diagnostics;

// Re-export geometry types
pub use bounding_box::{BoundingBox, SliceAxis};
pub use errors::{GeometryError, GeometryResult};
pub use feature::{Feature, FeatureCollection};
pub use geometry::{Coordinate, Geometry, GeometryKind};

// Re-export WKT codec
pub use wkt::{geometry_to_wkt, wkt_to_geometry};

// Re-export operations
pub use area::{
    area_in_acres, area_in_acres_with_config, field_reduction, field_reduction_with_config,
    format_acres, parse_acres, FieldReduction, SQUARE_METERS_PER_ACRE,
};
pub use empty_space::{
    compute_empty_spaces, compute_empty_spaces_with_config, compute_empty_spaces_with_diagnostics,
};
pub use partition::{
    split_into_fields, split_into_fields_with_config, split_into_fields_with_diagnostics,
};

// Re-export configuration and diagnostics
pub use config::{AreaMode, FarmGeometryConfig, FarmGeometryConfigBuilder};
pub use diagnostics::{Diagnostics, SkipKind, SkippedMember};
