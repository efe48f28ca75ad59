use geo::{coord, AffineTransform, Rect};
use std::str::FromStr;

use crate::{
    components::metadata::keys,
    errors::{ReflectanceError, Result},
};

/// Tile extent in projected units, stored as `[xMin, xMax, yMin, yMax]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl TryFrom<&[f64]> for SpatialExtent {
    type Error = ReflectanceError;
    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [x_min, x_max, y_min, y_max] => Ok(Self {
                x_min,
                x_max,
                y_min,
                y_max,
            }),
            _ => Err(ReflectanceError::InvalidLength {
                key: keys::SPATIAL_EXTENT.into(),
                expected: 4,
                found: values.len(),
            }),
        }
    }
}

impl From<SpatialExtent> for [f64; 4] {
    fn from(extent: SpatialExtent) -> Self {
        [extent.x_min, extent.x_max, extent.y_min, extent.y_max]
    }
}

impl SpatialExtent {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.x_min, y: self.y_min },
            coord! { x: self.x_max, y: self.y_max },
        )
    }
}

/// Wavelength range, in nanometers, of unreliable bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandWindow {
    pub min: f64,
    pub max: f64,
}

impl TryFrom<&[f64]> for BandWindow {
    type Error = ReflectanceError;
    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [a, b] => Ok(Self {
                min: a.min(b),
                max: a.max(b),
            }),
            _ => Err(ReflectanceError::InvalidLength {
                key: "band window".into(),
                expected: 2,
                found: values.len(),
            }),
        }
    }
}

impl BandWindow {
    /// Inclusive on both ends.
    pub fn contains(&self, wavelength: f64) -> bool {
        (self.min..=self.max).contains(&wavelength)
    }
}

/// ENVI style `map info` record, e.g.
/// `UTM, 1.000, 1.000, 368000.00, 4307000.0, 1.0e+000, 1.0e+000, 18, North, WGS-84, units=Meters, 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapInfo {
    pub projection: String,
    /// 1-based pixel the reference coordinate refers to.
    pub reference_pixel: (f64, f64),
    pub reference_coord: (f64, f64),
    pub pixel_size: (f64, f64),
    pub zone: Option<u8>,
    pub hemisphere: Option<String>,
    pub datum: Option<String>,
    pub units: Option<String>,
}

impl FromStr for MapInfo {
    type Err = ReflectanceError;

    fn from_str(value: &str) -> Result<Self> {
        let uncastable = || ReflectanceError::Uncastable {
            key: keys::MAP_INFO.into(),
            expected: "ENVI map info",
        };
        let fields: Vec<&str> = value
            .trim()
            .trim_start_matches('{')
            .trim_end_matches('}')
            .split(',')
            .map(str::trim)
            .collect();
        if fields.len() < 7 {
            return Err(uncastable());
        }
        let number = |idx: usize| fields[idx].parse::<f64>().map_err(|_| uncastable());
        let text = |idx: usize| {
            fields
                .get(idx)
                .filter(|field| !field.is_empty())
                .map(|field| field.to_string())
        };

        Ok(Self {
            projection: fields[0].to_owned(),
            reference_pixel: (number(1)?, number(2)?),
            reference_coord: (number(3)?, number(4)?),
            pixel_size: (number(5)?, number(6)?),
            zone: fields.get(7).and_then(|zone| zone.parse().ok()),
            hemisphere: text(8),
            datum: text(9),
            units: text(10).map(|units| units.trim_start_matches("units=").to_owned()),
        })
    }
}

impl MapInfo {
    /// Transform from 0-based (column, row) pixel coordinates to map coordinates.
    pub fn transform(&self) -> AffineTransform {
        let (ref_col, ref_row) = self.reference_pixel;
        let (easting, northing) = self.reference_coord;
        let (x_size, y_size) = self.pixel_size;
        AffineTransform::new(
            x_size,
            0.0,
            easting - (ref_col - 1.0) * x_size,
            0.0,
            -y_size,
            northing + (ref_row - 1.0) * y_size,
        )
    }

    /// Extent covered by a `rows` by `cols` grid laid out by this map info.
    pub fn extent(&self, rows: usize, cols: usize) -> SpatialExtent {
        let transform = self.transform();
        let upper_left = transform.apply(coord! { x: 0.0, y: 0.0 });
        let lower_right = transform.apply(coord! { x: cols as f64, y: rows as f64 });
        SpatialExtent {
            x_min: upper_left.x.min(lower_right.x),
            x_max: upper_left.x.max(lower_right.x),
            y_min: upper_left.y.min(lower_right.y),
            y_max: upper_left.y.max(lower_right.y),
        }
    }
}
