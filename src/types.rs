use std::borrow::Cow;

/// Kind of a suffix rule, decided by its left-most label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Ordinary rule: "co.uk"
    Plain,
    /// Wildcard rule: "*.ck"
    Wildcard,
    /// Exception rule: "!www.ck"
    Exception,
}

/// Section of the suffix list a rule was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Domains delegated by ICANN (the default before any marker)
    #[default]
    Icann,
    /// Domains submitted by private parties ("github.io")
    Private,
}

/// One rule of the suffix list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule kind
    pub kind: RuleKind,
    /// Labels in left-to-right order, including the `*` / `!x` marker label
    pub labels: Vec<String>,
    /// List section
    pub section: Section,
}

impl Rule {
    /// Build a rule from a single token ("com.au", "*.ck", "!www.ck").
    ///
    /// Returns `None` for tokens that cannot be inserted into a tree: empty
    /// tokens, empty labels ("a..b") and bare exception markers ("!").
    pub fn parse(token: &str, section: Section) -> Option<Self> {
        if token.is_empty() {
            return None;
        }

        let labels: Vec<String> = token.split('.').map(str::to_string).collect();
        if labels.iter().any(|l| l.is_empty() || l == "!") {
            return None;
        }

        let kind = match labels[0].as_str() {
            "*" => RuleKind::Wildcard,
            l if l.starts_with('!') => RuleKind::Exception,
            _ => RuleKind::Plain,
        };

        Some(Self {
            kind,
            labels,
            section,
        })
    }

    /// The rule as it appears in the list
    pub fn as_token(&self) -> String {
        self.labels.join(".")
    }
}

/// Anything that can hand out a host string ("example.com:8080").
///
/// `None` means the value carries no host at all; decomposing it fails with
/// [`TldError::InputType`](crate::TldError::InputType).
pub trait HostSource {
    /// The host part, if any
    fn host(&self) -> Option<&str>;
}

impl HostSource for str {
    fn host(&self) -> Option<&str> {
        Some(self)
    }
}

impl HostSource for String {
    fn host(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl HostSource for Cow<'_, str> {
    fn host(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl<T: HostSource + ?Sized> HostSource for &T {
    fn host(&self) -> Option<&str> {
        (**self).host()
    }
}

impl<T: HostSource + ?Sized> HostSource for Box<T> {
    fn host(&self) -> Option<&str> {
        (**self).host()
    }
}

impl<T: HostSource> HostSource for Option<T> {
    fn host(&self) -> Option<&str> {
        self.as_ref().and_then(HostSource::host)
    }
}
