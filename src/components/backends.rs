/// Implementations for hdf5
pub mod hdf5_backend {
    use hdf5::{
        types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode},
        Container, Dataset, Group, Location,
    };
    use log::debug;
    use ndarray::{s, stack, Array2, Array3, ArrayView2, Axis, Ix2, Ix3};
    use std::path::{Path, PathBuf};

    use crate::{
        components::{keys, DataType, File, Metadata, MetadataValue},
        errors::{ReflectanceError, Result},
        Indexes,
    };

    const REFLECTANCE: &str = "Reflectance";
    const METADATA: &str = "Metadata";
    const COORDINATE_SYSTEM: &str = "Coordinate_System";
    const SPECTRAL_DATA: &str = "Spectral_data";

    /// Upper bound on fixed-length strings read from the file.
    const FIXED_STR_CAPACITY: usize = 1024;

    fn missing(object: &Location, key: &str) -> ReflectanceError {
        ReflectanceError::MissingKey {
            object: object.name(),
            key: key.to_owned(),
        }
    }

    fn child_group(parent: &Group, name: &str) -> Result<Group> {
        if parent.member_names()?.iter().any(|member| member == name) {
            Ok(parent.group(name)?)
        } else {
            Err(missing(parent, name))
        }
    }

    fn attribute(location: &Location, name: &str) -> Result<Container> {
        if location.attr_names()?.iter().any(|attr| attr == name) {
            Ok((*location.attr(name)?).clone())
        } else {
            Err(missing(location, name))
        }
    }

    /// Dataset `name` inside `group`, or an attribute of `group` with that name.
    fn member_value(group: &Group, name: &str) -> Result<Container> {
        if group.member_names()?.iter().any(|member| member == name) {
            Ok((*group.dataset(name)?).clone())
        } else {
            attribute(group, name)
        }
    }

    fn descriptor(container: &Container) -> Result<TypeDescriptor> {
        Ok(container.dtype()?.to_descriptor()?)
    }

    fn read_texts(container: &Container, key: &str) -> Result<Vec<String>> {
        Ok(match descriptor(container)? {
            TypeDescriptor::FixedAscii(size) | TypeDescriptor::FixedUnicode(size)
                if size > FIXED_STR_CAPACITY =>
            {
                return Err(ReflectanceError::InvalidLength {
                    key: key.into(),
                    expected: FIXED_STR_CAPACITY,
                    found: size,
                })
            }
            TypeDescriptor::VarLenUnicode => container
                .read_raw::<VarLenUnicode>()?
                .iter()
                .map(|value| value.as_str().to_owned())
                .collect(),
            TypeDescriptor::VarLenAscii => container
                .read_raw::<VarLenAscii>()?
                .iter()
                .map(|value| value.as_str().to_owned())
                .collect(),
            TypeDescriptor::FixedAscii(_) => container
                .read_raw::<FixedAscii<FIXED_STR_CAPACITY>>()?
                .iter()
                .map(|value| value.as_str().to_owned())
                .collect(),
            TypeDescriptor::FixedUnicode(_) => container
                .read_raw::<FixedUnicode<FIXED_STR_CAPACITY>>()?
                .iter()
                .map(|value| value.as_str().to_owned())
                .collect(),
            _ => {
                return Err(ReflectanceError::Uncastable {
                    key: key.into(),
                    expected: "text",
                })
            }
        })
    }

    fn single<V>(mut values: Vec<V>, key: &str) -> Result<V> {
        if values.len() != 1 {
            return Err(ReflectanceError::InvalidLength {
                key: key.into(),
                expected: 1,
                found: values.len(),
            });
        }
        Ok(values.remove(0))
    }

    fn is_numeric(descriptor: &TypeDescriptor) -> bool {
        matches!(
            descriptor,
            TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_)
        )
    }

    /// Numbers out of text such as `"[1340, 1445]"` or `"-9999.0"`.
    fn parse_floats(text: &str, key: &str) -> Result<Vec<f64>> {
        text.split(|c: char| c == ',' || c == '[' || c == ']' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|_| ReflectanceError::Uncastable {
                    key: key.into(),
                    expected: "float",
                })
            })
            .collect()
    }

    fn read_text(container: &Container, key: &str) -> Result<String> {
        Ok(single(read_texts(container, key)?, key)?.trim().to_owned())
    }

    fn read_floats(container: &Container, key: &str) -> Result<Vec<f64>> {
        if is_numeric(&descriptor(container)?) {
            return Ok(container.read_raw::<f64>()?);
        }
        read_texts(container, key)?
            .iter()
            .map(|text| parse_floats(text, key))
            .collect::<Result<Vec<_>>>()
            .map(|parsed| parsed.concat())
    }

    fn read_float(container: &Container, key: &str) -> Result<f64> {
        single(read_floats(container, key)?, key)
    }

    fn read_integer(container: &Container, key: &str) -> Result<i64> {
        let uncastable = || ReflectanceError::Uncastable {
            key: key.into(),
            expected: "integer",
        };
        match descriptor(container)? {
            TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => {
                single(container.read_raw::<i64>()?, key)
            }
            TypeDescriptor::Float(_) => {
                let value = single(container.read_raw::<f64>()?, key)?;
                (value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                    .then_some(value as i64)
                    .ok_or_else(uncastable)
            }
            _ => {
                let text = read_text(container, key)?;
                text.parse::<i64>().map_err(|_| uncastable())
            }
        }
    }

    fn record(metadata: &mut Metadata, key: &str, value: impl Into<MetadataValue>) {
        let value = value.into();
        debug!("{} {key}: {value}", metadata.description());
        metadata.insert(key, value);
    }

    #[derive(Debug)]
    pub struct Hdf5File {
        path: PathBuf,
        file: hdf5::File,
    }

    impl Hdf5File {
        fn reflectance_group(&self, site: &str) -> Result<Group> {
            child_group(&child_group(&self.file, site)?, REFLECTANCE)
        }
    }

    impl File for Hdf5File {
        fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            let path = path.as_ref().to_path_buf();
            let file = hdf5::File::open(&path).map_err(|source| ReflectanceError::Open {
                path: path.clone(),
                source,
            })?;
            Ok(Hdf5File { path, file })
        }

        fn description(&self) -> String {
            self.path.display().to_string()
        }

        fn site_names(&self) -> Result<Vec<String>> {
            Ok(self
                .file
                .groups()?
                .iter()
                .map(|group| group.name().trim_start_matches('/').to_owned())
                .collect())
        }

        fn reflectance<T: DataType>(&self, site: &str, bands: &Indexes) -> Result<Array3<T>> {
            let dataset = reflectance_dataset(&self.reflectance_group(site)?)?;
            let shape = dataset.shape();
            if shape.len() != 3 {
                return Err(ReflectanceError::InvalidLength {
                    key: format!("{} dimensions", dataset.name()),
                    expected: 3,
                    found: shape.len(),
                });
            }
            if bands.is_all() {
                return Ok(dataset.read::<T, Ix3>()?);
            }
            let band_planes = bands
                .indexes_from(shape[2])?
                .iter()
                .map(|&band| dataset.read_slice::<T, _, Ix2>(s![.., .., band]))
                .collect::<hdf5::Result<Vec<Array2<T>>>>()?;
            let views: Vec<ArrayView2<T>> = band_planes.iter().map(|plane| plane.view()).collect();
            Ok(stack(Axis(2), &views)?)
        }

        fn metadata(&self, site: &str) -> Result<Metadata> {
            let group = self.reflectance_group(site)?;
            let reflectance = reflectance_dataset(&group)?;
            let metadata_group = child_group(&group, METADATA)?;
            let coordinate_system = child_group(&metadata_group, COORDINATE_SYSTEM)?;
            let spectral_data = child_group(&metadata_group, SPECTRAL_DATA)?;

            let mut metadata = Metadata::new(group.name());
            record(
                &mut metadata,
                keys::MAP_INFO,
                read_text(&member_value(&coordinate_system, "Map_Info")?, keys::MAP_INFO)?,
            );
            record(
                &mut metadata,
                keys::WAVELENGTH,
                read_floats(&member_value(&spectral_data, "Wavelength")?, keys::WAVELENGTH)?,
            );
            record(
                &mut metadata,
                keys::DATA_IGNORE_VALUE,
                read_float(
                    &attribute(&reflectance, "Data_Ignore_Value")?,
                    keys::DATA_IGNORE_VALUE,
                )?,
            );
            record(
                &mut metadata,
                keys::SCALE_FACTOR,
                read_float(&attribute(&reflectance, "Scale_Factor")?, keys::SCALE_FACTOR)?,
            );
            record(
                &mut metadata,
                keys::INTERLEAVE,
                read_text(&attribute(&reflectance, "Interleave")?, keys::INTERLEAVE)?,
            );
            for (key, attr, len) in [
                (keys::SPATIAL_EXTENT, "Spatial_Extent_meters", 4),
                (keys::BAD_BAND_WINDOW1, "Band_Window_1_Nanometers", 2),
                (keys::BAD_BAND_WINDOW2, "Band_Window_2_Nanometers", 2),
            ] {
                let values = read_floats(&attribute(&reflectance, attr)?, key)?;
                if values.len() != len {
                    return Err(ReflectanceError::InvalidLength {
                        key: key.into(),
                        expected: len,
                        found: values.len(),
                    });
                }
                record(&mut metadata, key, values);
            }
            record(
                &mut metadata,
                keys::PROJECTION,
                read_text(&member_value(&coordinate_system, "Proj4")?, keys::PROJECTION)?,
            );
            record(
                &mut metadata,
                keys::EPSG,
                read_integer(&member_value(&coordinate_system, "EPSG Code")?, keys::EPSG)?,
            );
            Ok(metadata)
        }
    }

    /// The `Reflectance` dataset, which also carries the radiometric attributes.
    fn reflectance_dataset(group: &Group) -> Result<Dataset> {
        if group.member_names()?.iter().any(|member| member == REFLECTANCE) {
            Ok(group.dataset(REFLECTANCE)?)
        } else {
            Err(missing(group, REFLECTANCE))
        }
    }

}
