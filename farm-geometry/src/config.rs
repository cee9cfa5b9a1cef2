//! Configuration for partitioning, empty-space and acreage calculations.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;

/// Farm name written to derived features when the farm has none.
pub const DEFAULT_FALLBACK_FARM_NAME: &str = "Unnamed Farm";
/// Farm id used to prefix field ids when the farm has none.
pub const DEFAULT_FALLBACK_FARM_ID: &str = "farm";
/// Smallest reduction, in acres, reported as a real reduction.
pub const DEFAULT_REDUCTION_THRESHOLD_ACRES: f64 = 0.01;
/// Largest component dropped as a boolean-op artifact, relative to the area
/// of the farm's bounding box.
pub const DEFAULT_SLIVER_TOLERANCE: f64 = 1e-6;
/// Upper bound on the number of strips a farm is split into.
pub const DEFAULT_MAX_FIELDS: usize = 10_000;

/// How square units are obtained from a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaMode {
    /// Shoelace area in the geometry's native units.
    #[default]
    Planar,
    /// Spherical-earth approximation for longitude/latitude input, in
    /// square meters.
    Spherical,
}

/// Settings shared by the farm geometry operations.
///
/// # Examples
///
/// ```rust
/// use farm_geometry::{AreaMode, FarmGeometryConfig};
///
/// let config = FarmGeometryConfig::builder()
///     .fallback_farm_name("Home Farm")
///     .area_mode(AreaMode::Spherical)
///     .build();
/// assert_eq!(config.fallback_farm_name(), "Home Farm");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmGeometryConfig {
    fallback_farm_name: String,
    fallback_farm_id: String,
    reduction_threshold_acres: f64,
    area_mode: AreaMode,
    sliver_tolerance: f64,
    max_fields: usize,
}

impl Default for FarmGeometryConfig {
    fn default() -> Self {
        Self {
            fallback_farm_name: DEFAULT_FALLBACK_FARM_NAME.to_string(),
            fallback_farm_id: DEFAULT_FALLBACK_FARM_ID.to_string(),
            reduction_threshold_acres: DEFAULT_REDUCTION_THRESHOLD_ACRES,
            area_mode: AreaMode::default(),
            sliver_tolerance: DEFAULT_SLIVER_TOLERANCE,
            max_fields: DEFAULT_MAX_FIELDS,
        }
    }
}

impl FarmGeometryConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a configuration from the defaults.
    pub fn builder() -> FarmGeometryConfigBuilder {
        FarmGeometryConfigBuilder::new()
    }

    pub fn fallback_farm_name(&self) -> &str {
        &self.fallback_farm_name
    }

    pub fn fallback_farm_id(&self) -> &str {
        &self.fallback_farm_id
    }

    pub fn reduction_threshold_acres(&self) -> f64 {
        self.reduction_threshold_acres
    }

    pub fn area_mode(&self) -> AreaMode {
        self.area_mode
    }

    /// Fraction of the farm's bounding-box area at or below which a
    /// component is treated as a numerical sliver.
    pub fn sliver_tolerance(&self) -> f64 {
        self.sliver_tolerance
    }

    /// Smallest area, in native units, a component of `farm_bbox` must
    /// exceed to be kept.
    pub fn sliver_area(&self, farm_bbox: &BoundingBox) -> f64 {
        self.sliver_tolerance * farm_bbox.area()
    }

    pub fn max_fields(&self) -> usize {
        self.max_fields
    }
}

/// Builder for [`FarmGeometryConfig`].
#[derive(Debug, Clone, Default)]
pub struct FarmGeometryConfigBuilder {
    config: FarmGeometryConfig,
}

impl FarmGeometryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn fallback_farm_name(mut self, name: &str) -> Self {
        self.config.fallback_farm_name = name.to_string();
        self
    }

    #[inline]
    pub fn fallback_farm_id(mut self, id: &str) -> Self {
        self.config.fallback_farm_id = id.to_string();
        self
    }

    /// Negative and non-finite thresholds are ignored.
    #[inline]
    pub fn reduction_threshold_acres(mut self, threshold: f64) -> Self {
        if threshold.is_finite() && threshold >= 0.0 {
            self.config.reduction_threshold_acres = threshold;
        } else {
            log::warn!("Ignoring invalid reduction threshold {}", threshold);
        }
        self
    }

    #[inline]
    pub fn area_mode(mut self, mode: AreaMode) -> Self {
        self.config.area_mode = mode;
        self
    }

    /// Negative and non-finite tolerances are ignored.
    #[inline]
    pub fn sliver_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance.is_finite() && tolerance >= 0.0 {
            self.config.sliver_tolerance = tolerance;
        } else {
            log::warn!("Ignoring invalid sliver tolerance {}", tolerance);
        }
        self
    }

    /// A limit of zero is ignored.
    #[inline]
    pub fn max_fields(mut self, limit: usize) -> Self {
        if limit > 0 {
            self.config.max_fields = limit;
        } else {
            log::warn!("Ignoring field limit of zero");
        }
        self
    }

    #[inline]
    pub fn build(self) -> FarmGeometryConfig {
        self.config
    }
}
