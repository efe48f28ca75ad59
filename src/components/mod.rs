pub mod backends;
pub mod bounds;
pub mod dataset;
pub mod file;
pub mod metadata;
pub mod options;

pub use backends::hdf5_backend::Hdf5File;
pub use bounds::{BandWindow, MapInfo, SpatialExtent};
pub use dataset::ReflectanceDataset;
pub use file::File;
pub use metadata::{keys, Metadata, MetadataValue};
pub use options::LoadOptions;

use hdf5::H5Type;
use num::Num;
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// Element types a reflectance cube can be read as.
pub trait DataType: Num + Copy + Send + Sync + Debug + H5Type + AsPrimitive<f32> {}

impl<T> DataType for T where T: Num + Copy + Send + Sync + Debug + H5Type + AsPrimitive<f32> {}
