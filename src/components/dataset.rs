use log::info;
use ndarray::{Array3, Axis, Zip};
use num_traits::AsPrimitive;
use std::{fmt::Debug, path::Path};

use crate::{
    components::{keys, DataType, File, LoadOptions, Metadata},
    errors::{ReflectanceError, Result},
    Indexes,
};

/// Reflectance cube of one site together with its metadata mapping.
///
/// The cube is laid out as (rows, columns, bands) and the
/// `wavelength` entry of the metadata has one value per band.
#[derive(Clone, PartialEq)]
pub struct ReflectanceDataset<T: DataType = i16> {
    site: String,
    array: Array3<T>,
    metadata: Metadata,
}

impl<T: DataType> Debug for ReflectanceDataset<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflectanceDataset")
            .field("site", &self.site)
            .field("shape", &self.shape())
            .field("metadata", &self.metadata.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: DataType> ReflectanceDataset<T> {
    pub fn new(site: String, array: Array3<T>, metadata: Metadata) -> Result<Self> {
        let wavelengths = metadata.wavelengths()?.len();
        let bands = array.len_of(Axis(2));
        if wavelengths != bands {
            return Err(ReflectanceError::BandMismatch { wavelengths, bands });
        }
        Ok(Self {
            site,
            array,
            metadata,
        })
    }

    /// Reads the dataset at `path` through the `F` backend.
    ///
    /// The file is closed before returning, whether reading succeeded or not.
    pub fn open<F: File>(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let file = F::open(path)?;
        let site = file.site(options.site.as_deref())?;
        let mut metadata = file.metadata(&site)?;
        let array = file.reflectance::<T>(&site, &options.bands)?;
        if !options.bands.is_all() {
            let wavelengths = options.bands.select_from(metadata.wavelengths()?)?;
            metadata.insert(keys::WAVELENGTH, wavelengths);
        }
        let dataset = Self::new(site, array, metadata)?;
        info!("loaded {dataset:?} from {}", file.description());
        Ok(dataset)
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn array(&self) -> &Array3<T> {
        &self.array
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_parts(self) -> (Array3<T>, Metadata) {
        (self.array, self.metadata)
    }

    /// (rows, columns, bands)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.array.dim()
    }

    pub fn band_count(&self) -> usize {
        self.array.len_of(Axis(2))
    }

    /// Physical reflectance: stored values divided by the scale factor,
    /// with no-data pixels set to NaN.
    pub fn scaled(&self) -> Result<Array3<f32>> {
        let scale = self.metadata.scale_factor()? as f32;
        let no_data = self.metadata.no_data_value()? as f32;
        let mut scaled = Array3::<f32>::zeros(self.array.raw_dim());
        Zip::from(&mut scaled)
            .and(&self.array)
            .par_for_each(|out, &value| {
                let value: f32 = value.as_();
                *out = if value == no_data {
                    f32::NAN
                } else {
                    value / scale
                };
            });
        Ok(scaled)
    }

    /// Bands whose wavelength falls outside both bad band windows.
    pub fn good_bands(&self) -> Result<Indexes> {
        let windows = self.metadata.bad_band_windows()?;
        Ok(Indexes::matching(self.metadata.wavelengths()?, |wavelength| {
            !windows.iter().any(|window| window.contains(*wavelength))
        }))
    }

    /// New dataset restricted to `bands`, with `wavelength` following along.
    pub fn select_bands(&self, bands: &Indexes) -> Result<Self> {
        let indexes = bands.indexes_from(self.band_count())?;
        let mut metadata = self.metadata.clone();
        metadata.insert(
            keys::WAVELENGTH,
            bands.select_from(self.metadata.wavelengths()?)?,
        );
        Self::new(
            self.site.clone(),
            self.array.select(Axis(2), &indexes),
            metadata,
        )
    }

    pub fn without_bad_bands(&self) -> Result<Self> {
        self.select_bands(&self.good_bands()?)
    }

    /// (wavelength, value) pairs of the pixel at `row`, `col`.
    pub fn spectrum(&self, row: usize, col: usize) -> Option<Vec<(f64, T)>> {
        let (rows, cols, _) = self.shape();
        if row >= rows || col >= cols {
            return None;
        }
        let wavelengths = self.metadata.wavelengths().ok()?;
        Some(
            wavelengths
                .iter()
                .zip(self.array.slice(ndarray::s![row, col, ..]))
                .map(|(wavelength, value)| (*wavelength, *value))
                .collect(),
        )
    }
}
