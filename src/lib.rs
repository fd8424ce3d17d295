//! TLD Tree - public suffix lookup and host decomposition for Rust
//!
//! This library answers, for any domain name, which trailing part is a
//! "public suffix" (".com", ".co.uk", ".github.io") under which unrelated
//! parties register names, and splits host strings into their parts:
//! - Suffix list parsing (comments, ICANN / PRIVATE sections)
//! - Suffix tree with wildcard (`*.ck`) and exception (`!www.ck`) rules
//! - Longest public suffix lookup
//! - Host decomposition into sub / name / public suffix, IPv4, IPv6 and port
//! - Pluggable label normalization
//! - Optional LRU caching and atomic list replacement
//!
//! # Example
//!
//! ```rust
//! use tld_tree::{SuffixList, SuffixListOptions};
//!
//! let list_text = "
//! // ===BEGIN ICANN DOMAINS===
//! com
//! uk
//! co.uk
//! *.ck
//! !www.ck
//! // ===BEGIN PRIVATE DOMAINS===
//! github.io
//! ";
//!
//! let list = SuffixList::from_text(list_text, SuffixListOptions::default());
//!
//! assert_eq!(list.public_suffix(Some("www.example.co.uk")).as_deref(), Some(".co.uk"));
//! assert_eq!(list.public_suffix(Some("a.foo.ck")).as_deref(), Some(".foo.ck"));
//! assert_eq!(list.public_suffix(Some("www.ck")).as_deref(), Some(".ck"));
//!
//! let host = list.parse_host("api.user.github.io:8443").unwrap();
//! assert_eq!(host.sub, "api");
//! assert_eq!(host.name, "user");
//! assert_eq!(host.pub_suffix, "github.io");
//! assert_eq!(host.port, "8443");
//! assert_eq!(host.to_string(), "api.user.github.io:8443");
//! ```
//!
//! # Lookup rules
//!
//! | Rule | Example | Effect |
//! |------|---------|--------|
//! | Plain | `co.uk` | `co.uk` is a public suffix |
//! | Wildcard | `*.ck` | any single label below `ck` is part of the suffix |
//! | Exception | `!www.ck` | `www` is excluded from the `*.ck` wildcard |
//!
//! The longest match wins, but at least one label always remains as the
//! registrable name: "com.de" has the suffix ".de" even when "com.de" is a
//! rule of its own.

pub mod error;
pub mod host;
pub mod list;
pub mod loader;
pub mod nameprep;
pub mod parser;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use error::{LoadErrorKind, Result, TldError};
pub use host::Host;
pub use list::{
    default_list, default_shared, get_public_suffix, parse_host, parse_host_strict,
    SharedSuffixList, SuffixList, SuffixListOptions, DEFAULT_CACHE_SIZE,
};
pub use nameprep::{AsciiPreparer, FnPreparer, IdentityPreparer, NamePreparer};
pub use parser::{parse_rules, parse_rules_from_file, tokenize};
pub use tree::{build_tree, build_tree_with, match_suffix_length, SuffixTree, TreeNode};
pub use types::{HostSource, Rule, RuleKind, Section};

// Re-export loader types
pub use loader::{ListLoader, DEFAULT_LIST_URL, DEFAULT_UPDATE_INTERVAL};
