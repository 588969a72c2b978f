//! Locale-aware string comparison, backed by ICU collation data compiled into
//! the binary.

use icu_collator::{Collator as IcuCollator, CollatorOptions};
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt;

/// The collation locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Compares strings the way a reader of `locale` would order them, e.g.,
/// `apple` before `Zebra` and `éclair` before `fig`, unlike a plain byte
/// comparison. Uses ICU's default options: tertiary strength and
/// non-ignorable punctuation.
pub struct Collator {
    locale: Locale,
    inner: IcuCollator,
}

impl Collator {
    /// Constructs a [`Collator`] for a BCP-47 locale tag such as `en` or
    /// `de-AT`.
    pub fn new(locale: &str) -> Result<Collator> {
        let parsed = locale.parse::<Locale>().map_err(|err| Error::InvalidLocale {
            locale: locale.to_owned(),
            reason: format!("{}", err),
        })?;
        let inner = IcuCollator::try_new(&(&parsed).into(), CollatorOptions::new())
            .map_err(|err| Error::Unsupported {
                locale: locale.to_owned(),
                reason: format!("{}", err),
            })?;
        log::debug!("Loaded collation data for locale `{}`", parsed);
        Ok(Collator {
            locale: parsed,
            inner,
        })
    }

    /// Returns the locale this collator orders by.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Compares `a` and `b` in locale order.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.inner.compare(a, b)
    }
}

impl fmt::Debug for Collator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Collator")
            .field("locale", &self.locale.to_string())
            .finish()
    }
}

/// Represents the result of constructing a [`Collator`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error constructing a [`Collator`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the locale isn't a well-formed BCP-47 tag.
    InvalidLocale { locale: String, reason: String },

    /// Returned when no collation data could be loaded for the locale.
    Unsupported { locale: String, reason: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidLocale { locale, reason } => {
                write!(f, "Invalid locale `{}`: {}", locale, reason)
            }
            Error::Unsupported { locale, reason } => {
                write!(f, "Loading collation for locale `{}`: {}", locale, reason)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`]. The ICU
    /// errors are flattened into the message, so there is no source.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_compare_digits() -> Result<()> {
        let collator = Collator::new(DEFAULT_LOCALE)?;
        assert_eq!(
            Ordering::Greater,
            collator.compare("2023-01-foo", "2022-12-bar"),
        );
        Ok(())
    }

    #[test]
    fn test_compare_ignores_byte_order_of_case() -> Result<()> {
        let collator = Collator::new(DEFAULT_LOCALE)?;
        // In bytes, `Z` (0x5A) sorts before `a` (0x61).
        assert_eq!(Ordering::Less, collator.compare("apple", "Zebra"));
        Ok(())
    }

    #[test]
    fn test_compare_accents() -> Result<()> {
        let collator = Collator::new(DEFAULT_LOCALE)?;
        assert_eq!(Ordering::Less, collator.compare("éclair", "fig"));
        Ok(())
    }

    #[test]
    fn test_compare_equal() -> Result<()> {
        let collator = Collator::new(DEFAULT_LOCALE)?;
        assert_eq!(Ordering::Equal, collator.compare("title", "title"));
        Ok(())
    }

    #[test]
    fn test_locale_is_kept() -> Result<()> {
        let collator = Collator::new("de-AT")?;
        assert_eq!("de-AT", collator.locale().to_string());
        Ok(())
    }

    #[test]
    fn test_invalid_locale() {
        assert!(matches!(
            Collator::new("not a locale!"),
            Err(Error::InvalidLocale { .. })
        ));
    }
}
