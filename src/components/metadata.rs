use shrinkwraprs::Shrinkwrap;
use std::{collections::BTreeMap, fmt};

use crate::{
    components::bounds::{BandWindow, MapInfo, SpatialExtent},
    errors::{ReflectanceError, Result},
};

/// Keys of the metadata mapping built by the loader.
pub mod keys {
    pub const MAP_INFO: &str = "map info";
    pub const WAVELENGTH: &str = "wavelength";
    pub const DATA_IGNORE_VALUE: &str = "data ignore value";
    pub const SCALE_FACTOR: &str = "reflectance scale factor";
    pub const INTERLEAVE: &str = "interleave";
    pub const SPATIAL_EXTENT: &str = "spatial extent";
    pub const BAD_BAND_WINDOW1: &str = "bad_band_window1";
    pub const BAD_BAND_WINDOW2: &str = "bad_band_window2";
    pub const PROJECTION: &str = "projection";
    pub const EPSG: &str = "epsg";

    pub const ALL: [&str; 10] = [
        MAP_INFO,
        WAVELENGTH,
        DATA_IGNORE_VALUE,
        SCALE_FACTOR,
        INTERLEAVE,
        SPATIAL_EXTENT,
        BAD_BAND_WINDOW1,
        BAD_BAND_WINDOW2,
        PROJECTION,
        EPSG,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    Float(f64),
    Integer(i64),
    Floats(Vec<f64>),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(text) => write!(f, "{text}"),
            MetadataValue::Float(value) => write!(f, "{value}"),
            MetadataValue::Integer(value) => write!(f, "{value}"),
            MetadataValue::Floats(values) => write!(f, "{values:?}"),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_owned())
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<Vec<f64>> for MetadataValue {
    fn from(value: Vec<f64>) -> Self {
        MetadataValue::Floats(value)
    }
}

impl MetadataValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            MetadataValue::Floats(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Metadata mapping of a reflectance dataset.
///
/// Derefs to the underlying ordered map; the typed getters below
/// fail with [ReflectanceError::MetadataKeyNotFound] when a key is absent
/// and with [ReflectanceError::Uncastable] when it holds another variant.
#[derive(Shrinkwrap, Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    description: String,
    #[shrinkwrap(main_field)]
    entries: BTreeMap<String, MetadataValue>,
}

impl Metadata {
    pub fn new(description: String) -> Self {
        Self {
            description,
            entries: BTreeMap::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn insert(&mut self, key: &str, value: impl Into<MetadataValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Result<&MetadataValue> {
        self.entries
            .get(key)
            .ok_or_else(|| ReflectanceError::MetadataKeyNotFound {
                object_desc: self.description.clone(),
                key: key.into(),
            })
    }

    fn typed<'a, V: ?Sized>(
        &'a self,
        key: &str,
        expected: &'static str,
        cast: impl FnOnce(&'a MetadataValue) -> Option<&'a V>,
    ) -> Result<&'a V> {
        cast(self.get(key)?).ok_or_else(|| ReflectanceError::Uncastable {
            key: key.into(),
            expected,
        })
    }

    pub fn float(&self, key: &str) -> Result<f64> {
        let value = self.get(key)?;
        value.as_f64().ok_or_else(|| ReflectanceError::Uncastable {
            key: key.into(),
            expected: "float",
        })
    }

    pub fn integer(&self, key: &str) -> Result<i64> {
        let value = self.get(key)?;
        value.as_i64().ok_or_else(|| ReflectanceError::Uncastable {
            key: key.into(),
            expected: "integer",
        })
    }

    pub fn floats(&self, key: &str) -> Result<&[f64]> {
        self.typed(key, "list of floats", MetadataValue::as_floats)
    }

    pub fn text(&self, key: &str) -> Result<&str> {
        self.typed(key, "text", MetadataValue::as_text)
    }

    /// Like [Metadata::floats] but also checks the number of values.
    pub fn floats_exact(&self, key: &str, expected: usize) -> Result<&[f64]> {
        let values = self.floats(key)?;
        if values.len() != expected {
            return Err(ReflectanceError::InvalidLength {
                key: key.into(),
                expected,
                found: values.len(),
            });
        }
        Ok(values)
    }

    pub fn scale_factor(&self) -> Result<f64> {
        self.float(keys::SCALE_FACTOR)
    }

    pub fn no_data_value(&self) -> Result<f64> {
        self.float(keys::DATA_IGNORE_VALUE)
    }

    pub fn wavelengths(&self) -> Result<&[f64]> {
        self.floats(keys::WAVELENGTH)
    }

    pub fn interleave(&self) -> Result<&str> {
        self.text(keys::INTERLEAVE)
    }

    pub fn projection(&self) -> Result<&str> {
        self.text(keys::PROJECTION)
    }

    pub fn epsg(&self) -> Result<i64> {
        self.integer(keys::EPSG)
    }

    pub fn spatial_extent(&self) -> Result<SpatialExtent> {
        SpatialExtent::try_from(self.floats_exact(keys::SPATIAL_EXTENT, 4)?)
    }

    pub fn bad_band_windows(&self) -> Result<[BandWindow; 2]> {
        Ok([
            BandWindow::try_from(self.floats_exact(keys::BAD_BAND_WINDOW1, 2)?)?,
            BandWindow::try_from(self.floats_exact(keys::BAD_BAND_WINDOW2, 2)?)?,
        ])
    }

    pub fn map_info(&self) -> Result<MapInfo> {
        self.text(keys::MAP_INFO)?.parse()
    }
}
