use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ReflectanceError>;

#[derive(thiserror::Error, Debug)]
pub enum ReflectanceError {
    #[error("Could not open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: hdf5::Error,
    },
    #[error(transparent)]
    Hdf5Error(#[from] hdf5::Error),
    #[error(transparent)]
    NdarrayError(#[from] ndarray::ShapeError),
    #[error("{object} has no member or attribute named {key:?}")]
    MissingKey { object: String, key: String },
    #[error("Key {key:?} not found in {object_desc}")]
    MetadataKeyNotFound { object_desc: String, key: String },
    #[error("Value of {key:?} could not be cast to {expected}")]
    Uncastable { key: String, expected: &'static str },
    #[error("File has no top-level site group")]
    NoSiteGroup,
    #[error("File has several top-level groups {0:?}, pick a site explicitly")]
    AmbiguousSiteGroup(Vec<String>),
    #[error("{wavelengths} wavelengths for {bands} bands")]
    BandMismatch { wavelengths: usize, bands: usize },
    #[error("{key:?} should hold {expected} values, found {found}")]
    InvalidLength {
        key: String,
        expected: usize,
        found: usize,
    },
    #[error("Band index {index} out of range for {len} bands")]
    IndexOutOfRange { index: usize, len: usize },
}
