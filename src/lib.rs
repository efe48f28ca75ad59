//! Read NEON AOP hyperspectral reflectance HDF5 tiles into [ndarray].
//!
//! ```no_run
//! let dataset = neon_reflectance::load("NEON_D02_SERC_DP3_368000_4306000_reflectance.h5")?;
//! let (rows, cols, bands) = dataset.shape();
//! assert_eq!(bands, dataset.metadata().wavelengths()?.len());
//! let reflectance = dataset.without_bad_bands()?.scaled()?;
//! # Ok::<(), neon_reflectance::ReflectanceError>(())
//! ```

mod components;
mod errors;
mod indexes;

#[cfg(test)]
mod test_utils;

pub use components::{
    keys, BandWindow, DataType, File, Hdf5File, LoadOptions, MapInfo, Metadata, MetadataValue,
    ReflectanceDataset, SpatialExtent,
};
pub use errors::{ReflectanceError, Result};
pub use indexes::Indexes;

use std::path::Path;

/// Loads the reflectance cube of the single site stored in `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ReflectanceDataset> {
    load_with(path, &LoadOptions::default())
}

/// Like [load], converting the stored values to `T`.
pub fn load_as<T: DataType, P: AsRef<Path>>(path: P) -> Result<ReflectanceDataset<T>> {
    load_with(path, &LoadOptions::default())
}

/// Loads with `options` choosing the site group, when the file holds several,
/// and the subset of bands to read.
pub fn load_with<T: DataType, P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
) -> Result<ReflectanceDataset<T>> {
    ReflectanceDataset::open::<Hdf5File>(path, options)
}
