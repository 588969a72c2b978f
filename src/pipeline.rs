//! Exports the [`run`] function which stitches together the steps the site
//! generator's hook needs: reading posts ([`crate::post`]), optionally
//! validating them, normalizing them ([`crate::normalize`]), and writing the
//! result back out.

use crate::config::{Config, Error as ConfigError};
use crate::normalize::{Error as NormalizeError, Normalizer};
use crate::post::{BlogPost, Error as PostError};
use std::fmt;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// The serialization format for normalized posts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Format {
    Yaml,
    Json,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format> {
        match s {
            "yaml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(Error::UnknownFormat(s.to_owned())),
        }
    }
}

/// Bundled options for a [`run`].
pub struct Options {
    pub config: Config,
    pub format: Format,

    /// Write one absolute post URL per line instead of the posts.
    pub urls: bool,
}

/// Reads posts from `input`, normalizes them, and writes them to `output` as
/// described by `options`. In strict mode, nothing is written if any
/// permalink is malformed.
pub fn run<R: Read, W: Write>(options: &Options, input: R, mut output: W) -> Result<()> {
    let posts = BlogPost::read_seq(input)?;
    let normalizer = Normalizer::new(&options.config)?;
    if options.config.strict {
        normalizer.validate(&posts)?;
    }
    let normalized = normalizer.normalize(&posts);

    if options.urls {
        let site = options.config.site()?;
        for post in &normalized {
            writeln!(output, "{}", site.resolve(&post.permalink)?)?;
        }
        return Ok(());
    }

    match options.format {
        Format::Yaml => serde_yaml::to_writer(&mut output, &normalized)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut output, &normalized)?;
            writeln!(output)?;
        }
    }
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for a [`run`]. Errors can occur while loading
/// configuration, reading posts, normalizing, or writing output.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the configuration.
    Config(ConfigError),

    /// Returned for errors reading posts.
    Post(PostError),

    /// Returned for errors constructing the normalizer or validating posts.
    Normalize(NormalizeError),

    /// Returned when an output format name isn't recognized.
    UnknownFormat(String),

    /// Returned for I/O problems while opening the input file.
    OpenInput { path: PathBuf, err: std::io::Error },

    /// Returned when a permalink can't be resolved against the site URL.
    UrlParse(url::ParseError),

    /// Returned for errors writing YAML output.
    SerializeYaml(serde_yaml::Error),

    /// Returned for errors writing JSON output.
    SerializeJson(serde_json::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Post(err) => err.fmt(f),
            Error::Normalize(err) => err.fmt(f),
            Error::UnknownFormat(format) => {
                write!(f, "Unknown output format `{}`", format)
            }
            Error::OpenInput { path, err } => {
                write!(f, "Opening input file '{}': {}", path.display(), err)
            }
            Error::UrlParse(err) => write!(f, "Resolving post URL: {}", err),
            Error::SerializeYaml(err) => write!(f, "Writing YAML: {}", err),
            Error::SerializeJson(err) => write!(f, "Writing JSON: {}", err),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Post(err) => Some(err),
            Error::Normalize(err) => Some(err),
            Error::UnknownFormat(_) => None,
            Error::OpenInput { path: _, err } => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::SerializeYaml(err) => Some(err),
            Error::SerializeJson(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    /// Converts [`ConfigError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl From<PostError> for Error {
    /// Converts [`PostError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PostError) -> Error {
        Error::Post(err)
    }
}

impl From<NormalizeError> for Error {
    /// Converts [`NormalizeError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: NormalizeError) -> Error {
        Error::Normalize(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts [`url::ParseError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts [`serde_yaml::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: serde_yaml::Error) -> Error {
        Error::SerializeYaml(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts [`serde_json::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: serde_json::Error) -> Error {
        Error::SerializeJson(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
