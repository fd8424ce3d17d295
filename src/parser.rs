use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, TldError};
use crate::types::{Rule, Section};

const BEGIN_ICANN: &str = "===BEGIN ICANN DOMAINS===";
const BEGIN_PRIVATE: &str = "===BEGIN PRIVATE DOMAINS===";

/// Extract the rule tokens from raw suffix list text.
///
/// Blank lines and `//` comments are dropped; of every other line only the
/// first whitespace-delimited token is kept.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.lines().filter_map(line_token).collect()
}

fn line_token(line: &str) -> Option<&str> {
    if line.is_empty() || line.starts_with("//") {
        return None;
    }
    line.split_whitespace().next()
}

/// Parse suffix list text into rules, tracking the ICANN / PRIVATE sections.
///
/// Tokens that cannot form a rule are skipped.
pub fn parse_rules(text: &str) -> Vec<Rule> {
    let mut section = Section::Icann;
    let mut rules = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        if let Some(comment) = line.strip_prefix("//") {
            let comment = comment.trim();
            if comment.starts_with(BEGIN_ICANN) {
                section = Section::Icann;
            } else if comment.starts_with(BEGIN_PRIVATE) {
                section = Section::Private;
            }
            continue;
        }

        let Some(token) = line_token(line) else {
            continue;
        };

        match Rule::parse(token, section) {
            Some(rule) => rules.push(rule),
            None => debug!(line = line_num + 1, token, "skipping malformed suffix rule"),
        }
    }

    rules
}

/// Parse a suffix list file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        TldError::ParseError(format!(
            "Failed to read suffix list '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_rules(&text))
}
