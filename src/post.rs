//! Defines the [`BlogPost`] record and the logic for reading a list of them
//! from YAML (or JSON, which is a subset of YAML) input.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

/// The opaque bag of fields that travel with a post (title, date, tags,
/// etc.). The normalizer never looks inside it.
pub type Metadata = BTreeMap<String, Value>;

/// Represents one published post as handed to us by the site generator.
/// The serialized form is a single flat map: `permalink` sits alongside the
/// metadata fields.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BlogPost {
    /// The path addressing the post within the site. Before normalization
    /// this is hierarchical (e.g., `/2023/01/title`); afterwards it is flat
    /// (e.g., `2023-01-title`).
    pub permalink: String,

    /// Every other field of the post, preserved as-is.
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl BlogPost {
    /// Constructs a post with the provided permalink and no metadata.
    pub fn new(permalink: &str) -> BlogPost {
        BlogPost {
            permalink: permalink.to_owned(),
            metadata: Metadata::new(),
        }
    }

    /// Adds a metadata field, consuming and returning the post.
    pub fn with_field(mut self, key: &str, value: Value) -> BlogPost {
        self.metadata.insert(key.to_owned(), value);
        self
    }

    /// Returns a new post carrying `permalink` and a copy of this post's
    /// metadata. The receiver is left untouched.
    pub fn with_permalink(&self, permalink: String) -> BlogPost {
        BlogPost {
            permalink,
            metadata: self.metadata.clone(),
        }
    }

    /// Parses a sequence of posts from a string. Blank input parses as an
    /// empty sequence rather than an error, since that's what an empty blog
    /// looks like on the wire.
    pub fn parse_seq(input: &str) -> Result<Vec<BlogPost>> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    /// Reads `reader` to the end and parses the contents with
    /// [`BlogPost::parse_seq`].
    pub fn read_seq<R: Read>(mut reader: R) -> Result<Vec<BlogPost>> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        BlogPost::parse_seq(&contents)
    }
}

/// Represents the result of reading [`BlogPost`]s.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading [`BlogPost`]s.
#[derive(Debug)]
pub enum Error {
    /// Returned when the input isn't a sequence of post records.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for I/O errors while reading the input.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DeserializeYaml(err) => write!(f, "Parsing posts: {}", err),
            Error::Io(err) => write!(f, "Reading posts: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
