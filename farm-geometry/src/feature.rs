//! GeoJSON-shaped features and feature collections.
//!
//! A [`Feature`] bundles an optional [`Geometry`] with an insertion-ordered
//! map of properties. Only a handful of property keys mean anything to this
//! crate (see the `*_KEY` constants); everything else is carried through
//! untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::GeometryResult;
use crate::geometry::Geometry;

/// Property holding the feature identifier.
pub const ID_KEY: &str = "id";
/// Property holding the human-readable name.
pub const NAME_KEY: &str = "name";
/// Property holding the feature role (`"field"`, `"empty-space"`, ...).
pub const TYPE_KEY: &str = "type";
/// Property holding the owning farm's name.
pub const FARM_KEY: &str = "farm";
/// Property holding the area label, e.g. `"12.34 acres"`.
pub const AREA_KEY: &str = "area";

/// A geometry together with its properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Feature {
    /// Creates a feature with no properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            properties: Map::new(),
        }
    }

    /// Creates a feature whose geometry is absent.
    pub fn without_geometry() -> Self {
        Self::default()
    }

    /// Returns this feature with `key` set to `value`.
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Sets a property, replacing any previous value.
    pub fn set_property(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    /// Gets a raw property value.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Gets a scalar property rendered as a string.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Null, arrays and objects yield `None`.
    pub fn property_string(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The `id` property.
    pub fn id(&self) -> Option<String> {
        self.property_string(ID_KEY)
    }

    /// The `name` property.
    pub fn name(&self) -> Option<String> {
        self.property_string(NAME_KEY)
    }

    /// Parses a single GeoJSON feature.
    pub fn from_geojson_str(json: &str) -> GeometryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes this feature as GeoJSON.
    pub fn to_geojson_string(&self) -> GeometryResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// An ordered collection of features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding exactly one feature.
    pub fn single(feature: Feature) -> Self {
        Self {
            features: vec![feature],
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Parses a GeoJSON feature collection.
    ///
    /// # Errors
    /// Returns `Serialization` for malformed JSON or geometries that break
    /// the model's invariants.
    pub fn from_geojson_str(json: &str) -> GeometryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the collection as compact GeoJSON.
    pub fn to_geojson_string(&self) -> GeometryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the collection as indented GeoJSON.
    pub fn to_geojson_string_pretty(&self) -> GeometryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
