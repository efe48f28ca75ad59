//! Synthetic NEON AOP reflectance files for tests.

use hdf5::{
    types::{FixedAscii, VarLenUnicode},
    Group, H5Type, Location,
};
use ndarray::Array3;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::components::{keys, Metadata};

pub const WAVELENGTHS: [f64; 6] = [500.0, 790.0, 1080.0, 1370.0, 1660.0, 1950.0];
pub const MAP_INFO: &str = "UTM,  1.000,  1.000,  368000.00,  4307000.0,  \
    1.0000000e+000,  1.0000000e+000,  18,  North,  WGS-84,  units=Meters, 0";
pub const PROJ4: &str = "+proj=UTM +zone=18 +ellps=WGS84 +datum=WGS84 +units=m +no_defs";
pub const NO_DATA: i16 = -9999;
/// Width of the fixed-length strings written with [Strings::Fixed].
const FIXED_LEN: usize = 256;

/// Metadata matching what [NeonFixture::default] writes.
pub fn metadata() -> Metadata {
    let mut metadata = Metadata::new("/SITE/Reflectance".into());
    metadata.insert(keys::MAP_INFO, MAP_INFO);
    metadata.insert(keys::WAVELENGTH, WAVELENGTHS.to_vec());
    metadata.insert(keys::DATA_IGNORE_VALUE, NO_DATA as f64);
    metadata.insert(keys::SCALE_FACTOR, 10000.0);
    metadata.insert(keys::INTERLEAVE, "BSQ");
    metadata.insert(keys::SPATIAL_EXTENT, vec![368000.0, 368005.0, 4306996.0, 4307000.0]);
    metadata.insert(keys::BAD_BAND_WINDOW1, vec![1340.0, 1445.0]);
    metadata.insert(keys::BAD_BAND_WINDOW2, vec![1790.0, 1955.0]);
    metadata.insert(keys::PROJECTION, PROJ4);
    metadata.insert(keys::EPSG, 32618i64);
    metadata
}

/// Value stored at `(row, col, band)`; the first pixel is no-data.
pub fn cell(row: usize, col: usize, band: usize) -> i16 {
    if (row, col) == (0, 0) {
        NO_DATA
    } else {
        (row * 1000 + col * 100 + band) as i16
    }
}

/// Storage of the string values (map info, proj4, interleave and a text EPSG code).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strings {
    VarLen,
    Fixed,
}

/// Storage of the EPSG code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Epsg {
    Text,
    Integer,
    Float(f64),
}

/// Layout knobs of the generated file.
#[derive(Debug, Clone)]
pub struct NeonFixture {
    pub sites: Vec<&'static str>,
    /// (rows, columns); the band count follows [WAVELENGTHS].
    pub size: (usize, usize),
    pub wavelengths: Vec<f64>,
    /// Store scale factor, ignore value and spatial extent as text.
    pub text_attributes: bool,
    pub strings: Strings,
    pub epsg: Epsg,
    /// Coordinate system and wavelength values as attributes of their group instead of datasets.
    pub group_attributes: bool,
    pub with_reflectance: bool,
}

impl Default for NeonFixture {
    fn default() -> Self {
        Self {
            sites: vec!["SITE"],
            size: (4, 5),
            wavelengths: WAVELENGTHS.to_vec(),
            text_attributes: false,
            strings: Strings::VarLen,
            epsg: Epsg::Text,
            group_attributes: false,
            with_reflectance: true,
        }
    }
}

fn text(value: &str) -> VarLenUnicode {
    value.parse().unwrap()
}

fn fixed(value: &str) -> FixedAscii<FIXED_LEN> {
    FixedAscii::from_ascii(value.as_bytes()).unwrap()
}

fn text_attr(location: &Location, name: &str, value: &str) -> hdf5::Result<()> {
    location
        .new_attr::<VarLenUnicode>()
        .create(name)?
        .write_scalar(&text(value))
}

fn scalar_attr<T: H5Type>(location: &Location, name: &str, value: T) -> hdf5::Result<()> {
    location.new_attr::<T>().create(name)?.write_scalar(&value)
}

fn scalar_dataset<T: H5Type>(group: &Group, name: &str, value: T) -> hdf5::Result<()> {
    group.new_dataset::<T>().create(name)?.write_scalar(&value)
}

fn list_attr(location: &Location, name: &str, values: &[f64]) -> hdf5::Result<()> {
    location
        .new_attr::<f64>()
        .shape(values.len())
        .create(name)?
        .write_raw(values)
}

impl NeonFixture {
    pub fn bands(&self) -> usize {
        WAVELENGTHS.len()
    }

    pub fn cube(&self) -> Array3<i16> {
        Array3::from_shape_fn((self.size.0, self.size.1, self.bands()), |(r, c, b)| {
            cell(r, c, b)
        })
    }

    /// Writes the file into a fresh temporary directory, kept alive by the returned guard.
    pub fn create(&self) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NEON_D02_SITE_DP3_368000_4306000_reflectance.h5");
        self.write(&path).unwrap();
        (dir, path)
    }

    pub fn write(&self, path: &Path) -> hdf5::Result<()> {
        let file = hdf5::File::create(path)?;
        scalar_attr(&file, "Version", 1i32)?;
        for site in &self.sites {
            let site = file.create_group(site)?;
            if self.with_reflectance {
                self.write_reflectance(&site.create_group("Reflectance")?)?;
            } else {
                site.create_group("Radiance")?;
            }
        }
        Ok(())
    }

    fn write_reflectance(&self, group: &Group) -> hdf5::Result<()> {
        let reflectance = group
            .new_dataset_builder()
            .with_data(&self.cube())
            .create("Reflectance")?;
        let (rows, cols) = self.size;
        let extent = [
            368000.0,
            368000.0 + cols as f64,
            4307000.0 - rows as f64,
            4307000.0,
        ];
        if self.text_attributes {
            text_attr(&reflectance, "Scale_Factor", "10000")?;
            text_attr(&reflectance, "Data_Ignore_Value", "-9999.0")?;
            text_attr(&reflectance, "Spatial_Extent_meters", &format!("{extent:?}"))?;
        } else {
            scalar_attr(&reflectance, "Scale_Factor", 10000.0f32)?;
            scalar_attr(&reflectance, "Data_Ignore_Value", NO_DATA)?;
            list_attr(&reflectance, "Spatial_Extent_meters", &extent)?;
        }
        match self.strings {
            Strings::VarLen => text_attr(&reflectance, "Interleave", "BSQ")?,
            Strings::Fixed => scalar_attr(&reflectance, "Interleave", fixed("BSQ"))?,
        }
        list_attr(&reflectance, "Band_Window_1_Nanometers", &[1340.0, 1445.0])?;
        list_attr(&reflectance, "Band_Window_2_Nanometers", &[1790.0, 1955.0])?;

        let metadata = group.create_group("Metadata")?;
        let coordinate_system = metadata.create_group("Coordinate_System")?;
        self.coordinate_text(&coordinate_system, "Map_Info", MAP_INFO)?;
        self.coordinate_text(&coordinate_system, "Proj4", PROJ4)?;
        match self.epsg {
            Epsg::Text => self.coordinate_text(&coordinate_system, "EPSG Code", "32618")?,
            Epsg::Integer => self.coordinate_value(&coordinate_system, "EPSG Code", 32618i32)?,
            Epsg::Float(code) => self.coordinate_value(&coordinate_system, "EPSG Code", code)?,
        }
        let spectral_data = metadata.create_group("Spectral_data")?;
        if self.group_attributes {
            list_attr(&spectral_data, "Wavelength", &self.wavelengths)?;
        } else {
            spectral_data
                .new_dataset_builder()
                .with_data(self.wavelengths.as_slice())
                .create("Wavelength")?;
        }
        Ok(())
    }

    /// Scalar `name` of the coordinate system group, as a dataset or a group attribute.
    fn coordinate_value<T: H5Type>(
        &self,
        group: &Group,
        name: &str,
        value: T,
    ) -> hdf5::Result<()> {
        if self.group_attributes {
            scalar_attr(group, name, value)
        } else {
            scalar_dataset(group, name, value)
        }
    }

    fn coordinate_text(&self, group: &Group, name: &str, value: &str) -> hdf5::Result<()> {
        match self.strings {
            Strings::VarLen => self.coordinate_value(group, name, text(value)),
            Strings::Fixed => self.coordinate_value(group, name, fixed(value)),
        }
    }
}
