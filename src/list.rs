//! Suffix list handles.
//!
//! A [`SuffixList`] bundles an immutable [`SuffixTree`] with the name
//! preparer it was built with, so lookups always prepare labels the same way
//! as the rules. [`SharedSuffixList`] publishes a list to many readers and
//! swaps in rebuilt lists atomically.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::error::Result;
use crate::host::{decompose, Host};
use crate::nameprep::{default_preparer, NamePreparer, SharedPreparer};
use crate::parser::{parse_rules, parse_rules_from_file};
use crate::tree::{
    build_tree_from_rules, build_tree_with, match_suffix_length, prepared_labels, suffix_with,
    SuffixTree,
};
use crate::types::{HostSource, Rule, Section};

/// Default LRU cache size for [`SuffixListOptions::with_cache`]
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Snapshot of the public suffix list compiled into the crate
static BUILTIN_LIST: &str = include_str!("../data/public_suffix_list.dat");

static DEFAULT_LIST: Lazy<SharedSuffixList> = Lazy::new(|| {
    SharedSuffixList::new(SuffixList::from_text(
        BUILTIN_LIST,
        SuffixListOptions::default(),
    ))
});

/// Options for building a [`SuffixList`].
#[derive(Clone)]
pub struct SuffixListOptions {
    /// LRU cache size for match lengths, 0 disables the cache
    pub cache_size: usize,
    /// Keep rules from the PRIVATE section of the list
    pub include_private: bool,
    /// Label preparer used for rules and lookups
    pub preparer: SharedPreparer,
}

impl Default for SuffixListOptions {
    fn default() -> Self {
        Self {
            cache_size: 0,
            include_private: true,
            preparer: default_preparer(),
        }
    }
}

impl SuffixListOptions {
    /// Create new options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the lookup cache with [`DEFAULT_CACHE_SIZE`] entries.
    pub fn with_cache(self) -> Self {
        self.with_cache_size(DEFAULT_CACHE_SIZE)
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Keep or drop the PRIVATE section ("github.io", "blogspot.com", ...).
    pub fn with_private_domains(mut self, include: bool) -> Self {
        self.include_private = include;
        self
    }

    /// Set the label preparer.
    pub fn with_preparer<P>(mut self, preparer: P) -> Self
    where
        P: NamePreparer + 'static,
    {
        self.preparer = Arc::new(preparer);
        self
    }
}

impl fmt::Debug for SuffixListOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixListOptions")
            .field("cache_size", &self.cache_size)
            .field("include_private", &self.include_private)
            .finish_non_exhaustive()
    }
}

/// An immutable suffix tree plus the preparer it was built with.
pub struct SuffixList {
    tree: Arc<SuffixTree>,
    preparer: SharedPreparer,
    cache: Option<Mutex<LruCache<String, usize>>>,
}

impl SuffixList {
    /// Wrap a tree built with the default preparer ([`build_tree`](crate::build_tree)).
    pub fn new(tree: SuffixTree) -> Self {
        Self::with_tree(Arc::new(tree), default_preparer(), 0)
    }

    /// Wrap a shared tree. `preparer` must be the one the tree was built with.
    pub fn with_tree(tree: Arc<SuffixTree>, preparer: SharedPreparer, cache_size: usize) -> Self {
        let cache = NonZeroUsize::new(cache_size).map(|size| Mutex::new(LruCache::new(size)));
        Self {
            tree,
            preparer,
            cache,
        }
    }

    /// Build from rule tokens with default options.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let preparer = default_preparer();
        let tree = build_tree_with(tokens, preparer.as_ref());
        Self::with_tree(Arc::new(tree), preparer, 0)
    }

    /// Build from parsed rules.
    pub fn from_rules(rules: &[Rule], options: SuffixListOptions) -> Self {
        let rules = rules
            .iter()
            .filter(|r| options.include_private || r.section != Section::Private);
        let tree = build_tree_from_rules(rules, options.preparer.as_ref());
        Self::with_tree(Arc::new(tree), options.preparer, options.cache_size)
    }

    /// Build from raw suffix list text.
    pub fn from_text(text: &str, options: SuffixListOptions) -> Self {
        Self::from_rules(&parse_rules(text), options)
    }

    /// Build from a suffix list file.
    pub fn from_file(path: impl AsRef<Path>, options: SuffixListOptions) -> Result<Self> {
        let rules = parse_rules_from_file(path)?;
        Ok(Self::from_rules(&rules, options))
    }

    /// The underlying tree
    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    /// The underlying tree, shared
    pub fn shared_tree(&self) -> Arc<SuffixTree> {
        self.tree.clone()
    }

    /// The label preparer
    pub fn preparer(&self) -> &dyn NamePreparer {
        self.preparer.as_ref()
    }

    /// Number of trailing labels of `domain` forming its public suffix,
    /// 0 if none (see [`match_suffix_length`]).
    pub fn match_len(&self, domain: &str) -> usize {
        let Some(cache) = &self.cache else {
            return self.compute_len(domain);
        };

        let mut cache = cache.lock();
        if let Some(&len) = cache.get(domain) {
            return len;
        }
        let len = self.compute_len(domain);
        cache.put(domain.to_string(), len);
        len
    }

    fn compute_len(&self, domain: &str) -> usize {
        let labels = prepared_labels(domain, self.preparer.as_ref());
        match_suffix_length(&labels, self.tree.root())
    }

    /// Public suffix of `domain` with a leading '.'.
    ///
    /// `None` for `None` input or when no rule matches, `""` for single
    /// labels ("localhost").
    pub fn public_suffix(&self, domain: Option<&str>) -> Option<String> {
        suffix_with(domain, |d| self.match_len(d))
    }

    /// Decompose a host string; unknown suffixes leave `pub_suffix` empty.
    pub fn parse_host<S: HostSource + ?Sized>(&self, input: &S) -> Result<Host> {
        decompose(input, self, false)
    }

    /// Decompose a host string; a domain without a known suffix fails with
    /// [`TldError::NoPublicSuffix`](crate::TldError::NoPublicSuffix).
    pub fn parse_host_strict<S: HostSource + ?Sized>(&self, input: &S) -> Result<Host> {
        decompose(input, self, true)
    }

    /// Clear the lookup cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }
}

impl fmt::Debug for SuffixList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixList")
            .field("rules", &self.tree.rule_count())
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

/// A published [`SuffixList`] that can be replaced while readers use it.
///
/// Readers get an `Arc` to the current list and keep using it even if a
/// newer list is published meanwhile.
pub struct SharedSuffixList {
    current: RwLock<Arc<SuffixList>>,
}

impl SharedSuffixList {
    /// Publish `list`
    pub fn new(list: SuffixList) -> Self {
        Self {
            current: RwLock::new(Arc::new(list)),
        }
    }

    /// The current list
    pub fn load(&self) -> Arc<SuffixList> {
        self.current.read().clone()
    }

    /// Publish a new list, returning the previous one
    pub fn replace(&self, list: SuffixList) -> Arc<SuffixList> {
        let rules = list.tree().rule_count();
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(list));
        info!(rules, "published new suffix list");
        previous
    }
}

impl fmt::Debug for SharedSuffixList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSuffixList")
            .field("current", &*self.current.read())
            .finish()
    }
}

/// Process-wide default handle, built from the compiled-in list on first use
pub fn default_shared() -> &'static SharedSuffixList {
    &DEFAULT_LIST
}

/// The current process-wide default list
pub fn default_list() -> Arc<SuffixList> {
    DEFAULT_LIST.load()
}

/// Public suffix of `domain` according to the default list.
///
/// ```
/// assert_eq!(tld_tree::get_public_suffix(Some("www.example.co.uk")).as_deref(), Some(".co.uk"));
/// assert_eq!(tld_tree::get_public_suffix(Some("localhost")).as_deref(), Some(""));
/// assert_eq!(tld_tree::get_public_suffix(None), None);
/// ```
pub fn get_public_suffix(domain: Option<&str>) -> Option<String> {
    default_list().public_suffix(domain)
}

/// Decompose a host string against the default list.
pub fn parse_host<S: HostSource + ?Sized>(input: &S) -> Result<Host> {
    default_list().parse_host(input)
}

/// Decompose a host string against the default list, requiring a known
/// public suffix for domains.
pub fn parse_host_strict<S: HostSource + ?Sized>(input: &S) -> Result<Host> {
    default_list().parse_host_strict(input)
}
