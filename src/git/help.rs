/*!
help.rs - parse `git help -a` text into operations.

Sections are opened by a recognised header line and closed by a blank or
non-indented line (unless that line carries a continuation marker). Inside a
section, lines of the form

    <3+ spaces><token><spaces><description>

become operations. Header / marker lists live in `SectionPolicy` so other
help layouts can be handled without touching the parser.
*/

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::catalog::Operation;
use super::{ID_PREFIX, SUBCOMMAND_PREFIX};

/// Subcommands never exposed: GUIs, foreign-VCS bridges, transport / credential
/// helpers and other plumbing that is only meant to be spawned by git itself.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "gui",
    "citool",
    "gitk",
    "instaweb",
    "svn",
    "cvs",
    "p4",
    "archimport",
    "quiltimport",
    "remote-",
    "http-",
    "upload-",
    "receive-pack",
    "shell",
    "daemon",
    "credential",
    "sh-",
    "send-email",
    "imap-send",
    "web--browse",
    "mergetool",
    "difftool",
    "fsmonitor--daemon",
];

static COMMAND_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {3,}([A-Za-z0-9._-]+) +(.+)$").expect("command line pattern is valid")
});

/// Section boundary rules for the help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPolicy {
    /// Lower-cased phrases that open a command section when a non-indented line starts with one.
    pub headers: Vec<String>,
    /// Lower-cased phrases that keep the current section open on an otherwise closing line.
    pub continuation_markers: Vec<String>,
}

impl Default for SectionPolicy {
    fn default() -> Self {
        Self {
            headers: [
                "main porcelain commands",
                "ancillary commands",
                "interacting with others",
                "low-level commands",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            continuation_markers: vec!["see also".to_string()],
        }
    }
}

impl SectionPolicy {
    fn is_header(&self, line: &str) -> bool {
        if line.starts_with(char::is_whitespace) {
            return false;
        }
        let lower = line.trim().to_ascii_lowercase();
        self.headers.iter().any(|h| lower.starts_with(h.as_str()))
    }

    fn is_continuation(&self, line: &str) -> bool {
        let lower = line.to_ascii_lowercase();
        self.continuation_markers
            .iter()
            .any(|m| lower.contains(m.as_str()))
    }
}

/// Whether a bare token falls under the static exclusion list.
pub fn is_excluded(token: &str) -> bool {
    EXCLUDED_PREFIXES.iter().any(|p| token.starts_with(p))
}

/// Parse help text into operations, in the order they appear.
///
/// Duplicate ids keep their first occurrence. Never fails; an empty result is
/// left for the caller to judge.
pub fn parse_help(text: &str, policy: &SectionPolicy) -> Vec<Operation> {
    let mut in_section = false;
    let mut seen: HashSet<String> = HashSet::new();
    let mut ops = Vec::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');

        if policy.is_header(line) {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }

        let closes = line.trim().is_empty() || !line.starts_with(char::is_whitespace);
        if closes {
            if !policy.is_continuation(line) {
                in_section = false;
            }
            continue;
        }

        let Some(caps) = COMMAND_LINE.captures(line) else {
            continue;
        };
        let raw = &caps[1];
        let token = raw.strip_prefix(SUBCOMMAND_PREFIX).unwrap_or(raw);
        if token.is_empty() || is_excluded(token) {
            continue;
        }

        let id = format!("{ID_PREFIX}{token}");
        if !seen.insert(id.clone()) {
            continue;
        }
        ops.push(Operation {
            id,
            token: token.to_string(),
            description: caps[2].trim().to_string(),
        });
    }

    ops
}
