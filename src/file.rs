//! Config file adapters: TOML, JSON, and YAML documents as sparse overlays.
//!
//! Every adapter decodes its document into a [`toml::Table`] interchange tree
//! and hands it to [`merge_into`](crate::merge::merge_into), so a document
//! only touches the fields it mentions. Decoding happens before the object is
//! replaced — malformed input fails with the object untouched.
//!
//! Adapters are constructed from a path (read lazily at load time) or from an
//! already-open reader (slurped eagerly at construction). The JSON and YAML
//! adapters sit behind the `json` and `yaml` Cargo features, both on by
//! default. Neither format's `null` is representable in the interchange tree;
//! leave optional keys out of the document instead.

use std::io::Read;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::Table;
use tracing::debug;

use crate::chain::Loader;
use crate::error::StackfigError;
use crate::merge::merge_into;

/// Where a document comes from: a file path or pre-read stream content.
#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Stream(String),
}

impl Source {
    fn from_reader(mut reader: impl Read) -> Result<Self, StackfigError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|err| StackfigError::Io {
                path: Self::stream_origin(),
                source: err,
            })?;
        Ok(Source::Stream(content))
    }

    fn read(&self) -> Result<(String, PathBuf), StackfigError> {
        match self {
            Source::Path(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|err| StackfigError::Io {
                        path: path.clone(),
                        source: err,
                    })?;
                Ok((content, path.clone()))
            }
            Source::Stream(content) => Ok((content.clone(), Self::stream_origin())),
        }
    }

    /// Placeholder origin for reader-backed sources in diagnostics.
    fn stream_origin() -> PathBuf {
        PathBuf::from("<stream>")
    }
}

macro_rules! adapter_constructors {
    () => {
        /// Read the document from `path` when the loader runs.
        pub fn from_path(path: impl Into<PathBuf>) -> Self {
            Self {
                source: Source::Path(path.into()),
            }
        }

        /// Slurp the document from an already-open reader now; decode it when
        /// the loader runs.
        pub fn from_reader(reader: impl Read) -> Result<Self, StackfigError> {
            Ok(Self {
                source: Source::from_reader(reader)?,
            })
        }
    };
}

/// A [`Loader`] that overlays a TOML document onto the config object.
#[derive(Debug, Clone)]
pub struct TomlLoader {
    source: Source,
}

impl TomlLoader {
    adapter_constructors!();
}

impl<T: Serialize + DeserializeOwned> Loader<T> for TomlLoader {
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        let (content, origin) = self.source.read()?;
        let table: Table = toml::from_str(&content).map_err(|err| StackfigError::Decode {
            path: origin.clone(),
            source: Box::new(err),
        })?;
        debug!(path = %origin.display(), format = "toml", "overlaying config file");
        merge_into(object, table)
    }
}

/// A [`Loader`] that overlays a JSON document onto the config object.
#[cfg(feature = "json")]
#[derive(Debug, Clone)]
pub struct JsonLoader {
    source: Source,
}

#[cfg(feature = "json")]
impl JsonLoader {
    adapter_constructors!();
}

#[cfg(feature = "json")]
impl<T: Serialize + DeserializeOwned> Loader<T> for JsonLoader {
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        let (content, origin) = self.source.read()?;
        let table: Table =
            serde_json::from_str(&content).map_err(|err| StackfigError::Decode {
                path: origin.clone(),
                source: Box::new(err),
            })?;
        debug!(path = %origin.display(), format = "json", "overlaying config file");
        merge_into(object, table)
    }
}

/// A [`Loader`] that overlays a YAML document onto the config object.
#[cfg(feature = "yaml")]
#[derive(Debug, Clone)]
pub struct YamlLoader {
    source: Source,
}

#[cfg(feature = "yaml")]
impl YamlLoader {
    adapter_constructors!();
}

#[cfg(feature = "yaml")]
impl<T: Serialize + DeserializeOwned> Loader<T> for YamlLoader {
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        let (content, origin) = self.source.read()?;
        let table: Table =
            serde_yaml::from_str(&content).map_err(|err| StackfigError::Decode {
                path: origin.clone(),
                source: Box::new(err),
            })?;
        debug!(path = %origin.display(), format = "yaml", "overlaying config file");
        merge_into(object, table)
    }
}

/// A [`Loader`] that picks the format adapter from the file extension:
/// `.toml`, `.json`, `.yaml`/`.yml`. Anything else (including a format whose
/// Cargo feature is disabled) is [`UnsupportedFormat`](StackfigError::UnsupportedFormat).
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<T: Serialize + DeserializeOwned> Loader<T> for FileLoader {
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => TomlLoader::from_path(&self.path).load(object),
            #[cfg(feature = "json")]
            Some("json") => JsonLoader::from_path(&self.path).load(object),
            #[cfg(feature = "yaml")]
            Some("yaml") | Some("yml") => YamlLoader::from_path(&self.path).load(object),
            _ => Err(StackfigError::UnsupportedFormat {
                path: self.path.clone(),
            }),
        }
    }
}
