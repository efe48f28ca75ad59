use log::{debug, warn};
use ndarray::Array3;
use std::{fmt::Debug, path::Path};

use crate::{
    components::{DataType, Metadata},
    errors::{ReflectanceError, Result},
    Indexes,
};

/// A container holding one NEON reflectance product per top-level site group.
///
/// Dropping the value releases the underlying file.
pub trait File: Debug + Sized {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;
    fn description(&self) -> String;
    /// Names of the top-level groups.
    fn site_names(&self) -> Result<Vec<String>>;
    /// Reflectance cube (rows, columns, bands) of `site`, restricted to `bands`.
    fn reflectance<T: DataType>(&self, site: &str, bands: &Indexes) -> Result<Array3<T>>;
    fn metadata(&self, site: &str) -> Result<Metadata>;

    /// Resolves which site group to read.
    ///
    /// Without a `requested` name the file must hold exactly one top-level group.
    fn site(&self, requested: Option<&str>) -> Result<String> {
        let mut names = self.site_names()?;
        debug!("{} top-level groups {names:?}", self.description());
        match requested {
            Some(site) if names.iter().any(|name| name == site) => {
                if names.len() > 1 {
                    warn!("reading site {site} out of {names:?}");
                }
                Ok(site.to_owned())
            }
            Some(site) => Err(ReflectanceError::MissingKey {
                object: self.description(),
                key: site.to_owned(),
            }),
            None => match names.len() {
                0 => Err(ReflectanceError::NoSiteGroup),
                1 => Ok(names.remove(0)),
                _ => Err(ReflectanceError::AmbiguousSiteGroup(names)),
            },
        }
    }
}
