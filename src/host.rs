//! Host decomposition.
//!
//! Splits the host part of a URL ("www.example.co.uk:8080", "[::1]:42",
//! "127.0.0.1") into its parts, and serializes them back.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, TldError};
use crate::list::SuffixList;
use crate::types::HostSource;

/// Strict dotted-decimal IPv4: four octets 0-255, leading zeros allowed.
/// ASCII digits only, `\d` would also accept other Unicode digits.
static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:2(?:[0-4][0-9]|5[0-5])|[01]?[0-9][0-9]?)\.){3}(?:2(?:[0-4][0-9]|5[0-5])|[01]?[0-9][0-9]?)$",
    )
    .expect("IPV4_PATTERN: hardcoded regex is invalid")
});

/// A host split into its parts.
///
/// Exactly one of `ipv6`, `ipv4` and `name` is set for a non-empty host.
/// `sub` and `pub_suffix` are only set together with `name`, and `name`
/// never contains a '.'. All fields are plain strings; an unset field is
/// empty.
///
/// Formatting a `Host` that was produced by parsing and not modified yields
/// exactly the parsed input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Host {
    /// Subdomain labels left of `name` ("a.b" in "a.b.example.com")
    pub sub: String,
    /// Registrable name directly above the public suffix ("example")
    pub name: String,
    /// Public suffix without the leading dot ("com", "co.uk")
    pub pub_suffix: String,
    /// IPv4 literal
    pub ipv4: String,
    /// IPv6 literal without brackets
    pub ipv6: String,
    /// Port number in base 10, as written
    pub port: String,
}

impl Host {
    /// Parse `input` against the process default suffix list.
    pub fn parse<S: HostSource + ?Sized>(input: &S) -> Result<Self> {
        crate::list::default_list().parse_host(input)
    }

    /// Whether the host is an IP literal
    pub fn is_ip(&self) -> bool {
        !self.ipv6.is_empty() || !self.ipv4.is_empty()
    }

    /// Port as a number, if set
    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }

    /// The host without its port
    pub fn domain(&self) -> String {
        let mut host = self.clone();
        host.port.clear();
        host.to_string()
    }

    /// `name.pub_suffix`, the part a cookie may be scoped to
    pub fn registrable_domain(&self) -> Option<String> {
        if self.name.is_empty() || self.pub_suffix.is_empty() {
            return None;
        }
        Some(format!("{}.{}", self.name, self.pub_suffix))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ipv6.is_empty() {
            write!(f, "[{}]", self.ipv6)?;
        } else if !self.ipv4.is_empty() {
            f.write_str(&self.ipv4)?;
        } else {
            if !self.sub.is_empty() {
                write!(f, "{}.", self.sub)?;
            }
            f.write_str(&self.name)?;
            if !self.pub_suffix.is_empty() {
                write!(f, ".{}", self.pub_suffix)?;
            }
        }

        if !self.port.is_empty() {
            write!(f, ":{}", self.port)?;
        }
        Ok(())
    }
}

impl FromStr for Host {
    type Err = TldError;

    fn from_str(s: &str) -> Result<Self> {
        Host::parse(s)
    }
}

/// Split `input` into a [`Host`], matching domains against `list`.
///
/// With `strict` set, a multi-label domain without any matching public
/// suffix is an error instead of a host with an empty `pub_suffix`.
pub(crate) fn decompose<S: HostSource + ?Sized>(
    input: &S,
    list: &SuffixList,
    strict: bool,
) -> Result<Host> {
    let input = input.host().ok_or_else(|| {
        TldError::InputType("expected a string or a value carrying a host".to_string())
    })?;

    let mut host = Host::default();

    let port = if let Some(rest) = input.strip_prefix('[') {
        let to = rest
            .find(']')
            .ok_or_else(|| TldError::HostFormat(input.to_string()))?;
        if to == 0 {
            return Err(TldError::HostFormat(input.to_string()));
        }
        let after = &rest[to + 1..];
        host.ipv6 = rest[..to].to_string();
        if after.is_empty() {
            None
        } else {
            Some(
                after
                    .strip_prefix(':')
                    .ok_or_else(|| TldError::HostFormat(input.to_string()))?,
            )
        }
    } else {
        let (address, port) = match input.split_once(':') {
            Some((_, port)) if port.contains(':') => {
                return Err(TldError::HostFormat(input.to_string()));
            }
            Some((address, port)) => (address, Some(port)),
            None => (input, None),
        };

        if IPV4_PATTERN.is_match(address) {
            host.ipv4 = address.to_string();
        } else {
            split_domain(&mut host, address, list, strict, input)?;
        }
        port
    };

    if let Some(port) = port {
        check_port(port, input)?;
        host.port = port.to_string();
    }

    Ok(host)
}

fn split_domain(
    host: &mut Host,
    address: &str,
    list: &SuffixList,
    strict: bool,
    input: &str,
) -> Result<()> {
    let labels: Vec<&str> = address.split('.').collect();
    let count = list.match_len(address);

    if strict && count == 0 && labels.len() > 1 {
        return Err(TldError::NoPublicSuffix(input.to_string()));
    }

    // count is always below labels.len(), so a name is left over
    let name_idx = labels.len() - count - 1;
    host.pub_suffix = labels[name_idx + 1..].join(".");
    host.name = labels[name_idx].to_string();
    host.sub = labels[..name_idx].join(".");
    Ok(())
}

fn check_port(port: &str, input: &str) -> Result<()> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TldError::PortRange(input.to_string()));
    }
    port.parse::<u16>()
        .map(|_| ())
        .map_err(|_| TldError::PortRange(input.to_string()))
}
