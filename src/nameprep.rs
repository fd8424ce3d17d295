//! Label normalization applied on both sides of a lookup.
//!
//! The same preparer must be used to build a tree and to query it, otherwise
//! prepared rule labels and raw query labels will not line up.
//! [`SuffixList`](crate::SuffixList) takes care of that by owning both.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Maps a single domain label to its normalized form.
pub trait NamePreparer: Send + Sync {
    /// Normalize one label (never contains '.')
    fn prepare<'a>(&self, label: &'a str) -> Cow<'a, str>;
}

/// Default preparer: ASCII letters are lowercased, everything else passes
/// through untouched.
///
/// Non-ASCII labels are not converted to punycode. Plug an IDNA-aware
/// preparer in via [`FnPreparer`] when the list and the queries may mix
/// Unicode and `xn--` forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiPreparer;

impl NamePreparer for AsciiPreparer {
    fn prepare<'a>(&self, label: &'a str) -> Cow<'a, str> {
        if label.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(label.to_ascii_lowercase())
        } else {
            Cow::Borrowed(label)
        }
    }
}

/// Preparer that leaves labels exactly as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPreparer;

impl NamePreparer for IdentityPreparer {
    fn prepare<'a>(&self, label: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(label)
    }
}

/// Preparer backed by a closure.
pub struct FnPreparer<F>(F);

impl<F> FnPreparer<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> NamePreparer for FnPreparer<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn prepare<'a>(&self, label: &'a str) -> Cow<'a, str> {
        Cow::Owned((self.0)(label))
    }
}

impl<F> fmt::Debug for FnPreparer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnPreparer")
    }
}

/// Shared preparer handle
pub type SharedPreparer = Arc<dyn NamePreparer>;

pub(crate) fn default_preparer() -> SharedPreparer {
    Arc::new(AsciiPreparer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_preparer_lowercases() {
        assert_eq!(AsciiPreparer.prepare("GitHub"), "github");
        assert_eq!(AsciiPreparer.prepare("XN--UNUP4Y"), "xn--unup4y");
    }

    #[test]
    fn test_ascii_preparer_borrows_when_unchanged() {
        assert!(matches!(AsciiPreparer.prepare("com"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_ascii_preparer_passes_unicode_through() {
        assert_eq!(AsciiPreparer.prepare("游戏"), "游戏");
        assert_eq!(AsciiPreparer.prepare("ÜBER"), "Über");
    }

    #[test]
    fn test_identity_preparer() {
        assert_eq!(IdentityPreparer.prepare("COM"), "COM");
    }

    #[test]
    fn test_fn_preparer() {
        let prep = FnPreparer::new(|label: &str| label.trim_end_matches('-').to_string());
        assert_eq!(prep.prepare("abc--"), "abc");
    }
}
