use crate::Indexes;

/// Knobs for [crate::load_with].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Top-level group to read. When `None` the file must hold exactly one group.
    pub site: Option<String>,
    /// Bands to read; `Indexes::all()` reads the whole cube in one go.
    pub bands: Indexes,
}

impl LoadOptions {
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn bands(mut self, bands: impl Into<Indexes>) -> Self {
        self.bands = bands.into();
        self
    }
}
