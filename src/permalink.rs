//! Defines the rule for flattening hierarchical permalinks ([`Flattener`]) and
//! for resolving flattened permalinks into absolute URLs ([`Site`]).

use url::{ParseError, Url};

/// The separator between segments of a hierarchical permalink.
pub const PATH_SEPARATOR: char = '/';

/// The default replacement for [`PATH_SEPARATOR`].
pub const DEFAULT_SEPARATOR: char = '-';

/// Rewrites hierarchical permalinks (`/2023/01/title`) into flat ones
/// (`2023-01-title`).
///
/// Literal separator characters already present in a segment are not
/// escaped, so `/a-b/c` and `/a/b-c` both flatten to `a-b-c`. See
/// [`crate::normalize::collisions`].
#[derive(Clone, Debug, PartialEq)]
pub struct Flattener {
    /// Replaces every [`PATH_SEPARATOR`] in the permalink.
    pub separator: char,

    /// Replaces the single leading `separator` left behind by the permalink's
    /// leading slash. Empty by default, which drops it. The live site sets it
    /// to `/`, which keeps flattened permalinks rooted.
    pub root: String,
}

impl Default for Flattener {
    fn default() -> Self {
        Flattener {
            separator: DEFAULT_SEPARATOR,
            root: String::new(),
        }
    }
}

impl Flattener {
    /// Constructs a new [`Flattener`]. See the fields on [`Flattener`] for
    /// argument descriptions.
    pub fn new(separator: char, root: &str) -> Flattener {
        Flattener {
            separator,
            root: root.to_owned(),
        }
    }

    /// Flattens `permalink`. Only the first leading separator is replaced by
    /// `root`; any further leading separators are kept (`//a` becomes `-a`).
    /// A permalink without a leading slash comes out without the `root`
    /// prefix, but is otherwise flattened the same way.
    pub fn flatten(&self, permalink: &str) -> String {
        let replaced: String = permalink
            .chars()
            .map(|c| if c == PATH_SEPARATOR { self.separator } else { c })
            .collect();
        match replaced.strip_prefix(self.separator) {
            Some(rest) => format!("{}{}", self.root, rest),
            None => replaced,
        }
    }
}

/// Flattens `permalink` with the default [`Flattener`].
pub fn flatten(permalink: &str) -> String {
    Flattener::default().flatten(permalink)
}

/// Returns whether `permalink` has the leading slash that every
/// hierarchical permalink should start with.
pub fn is_rooted(permalink: &str) -> bool {
    permalink.starts_with(PATH_SEPARATOR)
}

/// The published location of the site: its origin plus the base path under
/// which posts are served.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    /// Always ends in a trailing slash. Without it, the last path component
    /// is treated as a file name by [`Url::join`] and dropped.
    base: Url,
}

impl Site {
    /// Constructs a new [`Site`] from the site's origin (e.g.,
    /// `https://example.org`) and base path (e.g., `/` or `/blog/`).
    pub fn new(url: &Url, base_url: &str) -> Result<Site, ParseError> {
        let base_path = base_url.trim_matches(PATH_SEPARATOR);
        let base = match base_path.is_empty() {
            true => url.join("/")?,
            false => url.join(&format!("/{}/", base_path))?,
        };
        Ok(Site { base })
    }

    /// Returns the base URL for posts, including the trailing slash.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves a flattened permalink to an absolute URL. The permalink is
    /// always relative to the base path, even when it has a leading slash.
    pub fn resolve(&self, permalink: &str) -> Result<Url, ParseError> {
        // The `./` keeps a permalink like `c:foo` from parsing as a scheme.
        self.base.join(&format!(
            "./{}",
            permalink.trim_start_matches(PATH_SEPARATOR)
        ))
    }
}
