//! Loads the optional `permaflat.yaml` project file. Every field has a
//! default, so a missing file simply means the default [`Config`].

use crate::collate::DEFAULT_LOCALE;
use crate::permalink::{Flattener, Site, DEFAULT_SEPARATOR};
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by [`Config::from_directory`].
pub const CONFIG_FILE_NAME: &str = "permaflat.yaml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The BCP-47 locale whose collation orders the posts.
    pub locale: String,

    /// Replaces every `/` in a permalink.
    pub separator: char,

    /// Replaces the leading separator of a flattened permalink. See
    /// [`Flattener::root`].
    pub root: String,

    /// Reject permalinks without a leading `/` instead of passing them
    /// through.
    pub strict: bool,

    /// The site's origin, e.g. `https://example.org`.
    pub site_url: String,

    /// The path under `site_url` where the blog is served.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            locale: DEFAULT_LOCALE.to_owned(),
            separator: DEFAULT_SEPARATOR,
            root: String::new(),
            strict: false,
            site_url: "https://electrovir.com".to_owned(),
            base_url: "/".to_owned(),
        }
    }
}

impl Config {
    /// Searches `dir` and then each of its ancestors for a
    /// [`CONFIG_FILE_NAME`] file and loads the first one found. Returns the
    /// default [`Config`] if there is none.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Config::from_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => {
                    debug!("No `{}` found; using defaults", CONFIG_FILE_NAME);
                    Ok(Config::default())
                }
            }
        }
    }

    /// Loads a [`Config`] from the YAML file at `path`. Omitted fields take
    /// their default values; unknown fields are an error.
    pub fn from_file(path: &Path) -> Result<Config> {
        debug!("Loading configuration from `{}`", path.display());
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        serde_yaml::from_reader(file).map_err(|err| Error::DeserializeYaml {
            path: path.to_owned(),
            err,
        })
    }

    /// Returns the [`Flattener`] described by `separator` and `root`.
    pub fn flattener(&self) -> Flattener {
        Flattener::new(self.separator, &self.root)
    }

    /// Returns the [`Site`] described by `site_url` and `base_url`.
    pub fn site(&self) -> Result<Site> {
        Ok(Site::new(&Url::parse(&self.site_url)?, &self.base_url)?)
    }
}

/// Represents the result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening the project file.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid YAML or contains unknown
    /// or ill-typed fields.
    DeserializeYaml { path: PathBuf, err: serde_yaml::Error },

    /// Returned when `site_url` or `base_url` doesn't form a valid URL.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening config file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml { path, err } => {
                write!(f, "Loading config file '{}': {}", path.display(), err)
            }
            Error::UrlParse(err) => write!(f, "Invalid site URL: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml { path: _, err } => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL parsing and joining functions.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
