//! Exports the [`Normalizer`], which flattens the permalinks of a list of
//! [`BlogPost`]s and orders the result by permalink, most recent (i.e., the
//! lexically latest in locale order) first.

use crate::collate::{self, Collator};
use crate::config::Config;
use crate::permalink::{is_rooted, Flattener};
use crate::post::BlogPost;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// Flattens and orders [`BlogPost`]s. Construct one with [`Normalizer::new`]
/// and reuse it; it holds no state between calls.
#[derive(Debug)]
pub struct Normalizer {
    flattener: Flattener,
    collator: Collator,
}

impl Normalizer {
    /// Constructs a [`Normalizer`] from a [`Config`]. Fails only if the
    /// configured locale is unusable.
    pub fn new(config: &Config) -> Result<Normalizer> {
        Ok(Normalizer::with_parts(
            config.flattener(),
            Collator::new(&config.locale)?,
        ))
    }

    /// Constructs a [`Normalizer`] from its parts.
    pub fn with_parts(flattener: Flattener, collator: Collator) -> Normalizer {
        Normalizer {
            flattener,
            collator,
        }
    }

    /// Returns new posts with flattened permalinks, sorted by permalink in
    /// descending locale order. The input is not modified and metadata is
    /// carried over untouched. Posts whose flattened permalinks compare
    /// equal keep their relative input order.
    ///
    /// Permalinks missing their leading slash and flattened permalinks shared
    /// by several posts are logged as warnings but otherwise pass through;
    /// use [`Normalizer::validate`] to reject the former up front.
    pub fn normalize(&self, posts: &[BlogPost]) -> Vec<BlogPost> {
        debug!(
            "Normalizing {} posts (locale `{}`)",
            posts.len(),
            self.collator.locale()
        );

        let mut normalized: Vec<BlogPost> = posts
            .iter()
            .map(|post| {
                if !is_rooted(&post.permalink) {
                    warn!(
                        "Permalink `{}` does not start with `/`; its flattened form will be malformed",
                        post.permalink
                    );
                }
                post.with_permalink(self.flattener.flatten(&post.permalink))
            })
            .collect();

        for permalink in collisions(&normalized) {
            warn!("Permalink `{}` is shared by more than one post", permalink);
        }

        // `sort_by` is stable, which is what resolves ties.
        normalized.sort_by(|a, b| self.collator.compare(&b.permalink, &a.permalink));
        normalized
    }

    /// Checks that every post's permalink starts with `/`, returning an
    /// [`Error::MalformedPermalink`] for the first one that doesn't.
    pub fn validate(&self, posts: &[BlogPost]) -> Result<()> {
        match posts
            .iter()
            .enumerate()
            .find(|(_, post)| !is_rooted(&post.permalink))
        {
            Some((index, post)) => Err(Error::MalformedPermalink {
                index,
                permalink: post.permalink.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Returns the permalinks shared by more than one post, in the order they
/// were first seen. Run it over normalized posts to find the collisions that
/// flattening introduced (e.g., `/a-b/c` and `/a/b-c`).
pub fn collisions(posts: &[BlogPost]) -> Vec<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for post in posts {
        let count = counts.entry(post.permalink.as_str()).or_insert(0);
        if *count == 0 {
            order.push(post.permalink.as_str());
        }
        *count += 1;
    }
    order.into_iter().filter(|permalink| counts[permalink] > 1).collect()
}

/// Represents the result of a [`Normalizer`] operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error constructing a [`Normalizer`] or validating posts.
#[derive(Debug)]
pub enum Error {
    /// Returned by [`Normalizer::validate`] when a post's permalink doesn't
    /// start with `/`. `index` is the post's position in the input.
    MalformedPermalink { index: usize, permalink: String },

    /// Returned when the collator can't be constructed.
    Collate(collate::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedPermalink { index, permalink } => write!(
                f,
                "Post #{} has permalink `{}`, which does not start with `/`",
                index, permalink
            ),
            Error::Collate(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedPermalink { .. } => None,
            Error::Collate(err) => Some(err),
        }
    }
}

impl From<collate::Error> for Error {
    /// Converts a [`collate::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator when constructing a [`Collator`].
    fn from(err: collate::Error) -> Error {
        Error::Collate(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_yaml::Value;
    use std::cmp::Ordering;

    fn normalizer() -> Result<Normalizer> {
        Normalizer::new(&Config::default())
    }

    fn permalinks(posts: &[BlogPost]) -> Vec<&str> {
        posts.iter().map(|p| p.permalink.as_str()).collect()
    }

    fn titled(permalink: &str, title: &str) -> BlogPost {
        BlogPost::new(permalink).with_field("title", Value::String(title.to_owned()))
    }

    #[test]
    fn test_normalize_dated_posts() -> Result<()> {
        let posts = vec![BlogPost::new("/2023/01/foo"), BlogPost::new("/2022/12/bar")];
        assert_eq!(
            vec!["2023-01-foo", "2022-12-bar"],
            permalinks(&normalizer()?.normalize(&posts)),
        );
        Ok(())
    }

    #[test]
    fn test_normalize_sorts_descending() -> Result<()> {
        let posts = vec![
            BlogPost::new("/2021/06/middle"),
            BlogPost::new("/2020/01/oldest"),
            BlogPost::new("/2024/03/newest"),
        ];
        assert_eq!(
            vec!["2024-03-newest", "2021-06-middle", "2020-01-oldest"],
            permalinks(&normalizer()?.normalize(&posts)),
        );
        Ok(())
    }

    #[test]
    fn test_normalize_single_segment() -> Result<()> {
        let posts = vec![BlogPost::new("/title")];
        assert_eq!(vec!["title"], permalinks(&normalizer()?.normalize(&posts)));
        Ok(())
    }

    #[test]
    fn test_normalize_empty() -> Result<()> {
        assert_eq!(Vec::<BlogPost>::new(), normalizer()?.normalize(&[]));
        Ok(())
    }

    #[test]
    fn test_normalize_uses_locale_order() -> Result<()> {
        let posts = vec![
            BlogPost::new("/apple"),
            BlogPost::new("/Zebra"),
            BlogPost::new("/fig"),
            BlogPost::new("/éclair"),
        ];
        assert_eq!(
            vec!["Zebra", "fig", "éclair", "apple"],
            permalinks(&normalizer()?.normalize(&posts)),
        );
        Ok(())
    }

    #[test]
    fn test_normalize_preserves_metadata_and_input() -> Result<()> {
        let posts = vec![
            titled("/2022/12/bar", "Bar"),
            titled("/2023/01/foo", "Foo")
                .with_field("date", Value::String("2023-01-05".to_owned())),
        ];
        let before = posts.clone();

        let normalized = normalizer()?.normalize(&posts);

        assert_eq!(before, posts);
        assert_eq!(posts.len(), normalized.len());
        assert_eq!(posts[1].metadata, normalized[0].metadata);
        assert_eq!(posts[0].metadata, normalized[1].metadata);
        Ok(())
    }

    #[test]
    fn test_normalize_ties_keep_input_order() -> Result<()> {
        let posts = vec![
            titled("/a-b/c", "first"),
            titled("/2020/x", "other"),
            titled("/a/b-c", "second"),
        ];
        let normalized = normalizer()?.normalize(&posts);

        assert_eq!(vec!["a-b-c", "a-b-c", "2020-x"], permalinks(&normalized));
        assert_eq!(posts[0].metadata, normalized[0].metadata);
        assert_eq!(posts[2].metadata, normalized[1].metadata);
        Ok(())
    }

    #[test]
    fn test_normalize_output_properties() -> Result<()> {
        let posts: Vec<BlogPost> = [
            "/2019/05/x",
            "/notes/rust/ownership",
            "/2023/11/a-b",
            "/About",
            "/2023/11/a",
            "/zz",
        ]
        .iter()
        .map(|p| BlogPost::new(p))
        .collect();
        let n = normalizer()?;
        let normalized = n.normalize(&posts);

        assert_eq!(posts.len(), normalized.len());
        assert!(normalized.iter().all(|p| !p.permalink.contains('/')));
        for pair in normalized.windows(2) {
            assert_ne!(
                Ordering::Less,
                n.collator.compare(&pair[0].permalink, &pair[1].permalink),
                "`{}` sorted before `{}`",
                pair[0].permalink,
                pair[1].permalink,
            );
        }
        Ok(())
    }

    #[test]
    fn test_normalize_rooted_variant() -> Result<()> {
        let config = Config {
            root: "/".to_owned(),
            ..Config::default()
        };
        let posts = vec![BlogPost::new("/2022/12/bar"), BlogPost::new("/2023/01/foo")];
        assert_eq!(
            vec!["/2023-01-foo", "/2022-12-bar"],
            permalinks(&Normalizer::new(&config)?.normalize(&posts)),
        );
        Ok(())
    }

    #[test]
    fn test_normalize_passes_malformed_through() -> Result<()> {
        let posts = vec![BlogPost::new("title"), BlogPost::new("/other")];
        assert_eq!(
            vec!["title", "other"],
            permalinks(&normalizer()?.normalize(&posts)),
        );
        Ok(())
    }

    #[test]
    fn test_normalize_twice_is_stable_for_flat_permalinks() -> Result<()> {
        let n = normalizer()?;
        let once = n.normalize(&[BlogPost::new("/2023/01/foo"), BlogPost::new("/b")]);
        assert_eq!(once, n.normalize(&once));
        Ok(())
    }

    #[test]
    fn test_validate() -> Result<()> {
        let n = normalizer()?;
        n.validate(&[BlogPost::new("/a"), BlogPost::new("/b/c")])?;
        match n.validate(&[BlogPost::new("/a"), BlogPost::new("b")]) {
            Err(Error::MalformedPermalink { index, permalink }) => {
                assert_eq!(1, index);
                assert_eq!("b", permalink);
            }
            Err(e) => panic!("wanted MalformedPermalink; found `{}`", e),
            Ok(()) => panic!("wanted MalformedPermalink; found Ok"),
        }
        Ok(())
    }

    #[test]
    fn test_collisions() {
        let posts = vec![
            BlogPost::new("a-b-c"),
            BlogPost::new("x"),
            BlogPost::new("y"),
            BlogPost::new("x"),
            BlogPost::new("a-b-c"),
            BlogPost::new("a-b-c"),
        ];
        assert_eq!(vec!["a-b-c", "x"], collisions(&posts));
        assert_eq!(Vec::<&str>::new(), collisions(&posts[1..3]));
    }

    #[test]
    fn test_invalid_locale() {
        let config = Config {
            locale: "not a locale!".to_owned(),
            ..Config::default()
        };
        assert!(matches!(
            Normalizer::new(&config),
            Err(Error::Collate(collate::Error::InvalidLocale { .. }))
        ));
    }
}
