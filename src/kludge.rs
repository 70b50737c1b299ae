//! Kludge line extraction from message bodies
//!
//! Message text carries metadata lines mixed in with the human-readable body:
//!
//! - `AREA:TAG` on the first line of echomail
//! - `SEEN-BY: net/node ...` routing lines near the end
//! - control lines starting with `0x01` (`^AMSGID: ...`, `^APID: ...`)
//!
//! [`extract_kludges`] collects them into a [`KludgeMap`] and
//! [`strip_kludges`] returns the remaining body. Both classify lines through
//! [`classify_line`].

use std::collections::HashMap;

/// Kludge name to value, e.g. `"MSGID"` to `"2:5020/1042 1a2b3c4d"`
pub type KludgeMap = HashMap<String, String>;

/// Control byte starting a kludge line
pub const KLUDGE_MARKER: char = '\u{1}';

const AREA_PREFIX: &str = "AREA:";
const SEEN_BY_PREFIX: &str = "SEEN-BY:";

/// Classification of a single body line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `AREA:` echo tag (first line only)
    Area(&'a str),
    /// `SEEN-BY:` routing line
    SeenBy(&'a str),
    /// `0x01` control line; `None` when it has no name/value pair
    Control(Option<(String, String)>),
    /// Ordinary body text
    Body,
}

impl LineKind<'_> {
    /// Whether the line is metadata rather than body text
    pub fn is_kludge(&self) -> bool {
        !matches!(self, LineKind::Body)
    }
}

/// Classify one line of message text
///
/// `index` is the zero-based line number; `AREA:` only counts on line 0.
pub fn classify_line(index: usize, line: &str) -> LineKind<'_> {
    if index == 0 {
        if let Some(tag) = line.strip_prefix(AREA_PREFIX) {
            return LineKind::Area(tag);
        }
    }

    if let Some(rest) = line.strip_prefix(SEEN_BY_PREFIX) {
        return LineKind::SeenBy(rest);
    }

    if line.starts_with(KLUDGE_MARKER) {
        let collapsed = line.replace("  ", " ");
        let pair = match collapsed.split_once(' ') {
            Some((name, value)) if !name.is_empty() && !value.is_empty() => {
                let name = name.strip_prefix(KLUDGE_MARKER).unwrap_or(name);
                let name = name.strip_suffix(':').unwrap_or(name);
                Some((name.to_string(), value.to_string()))
            }
            _ => None,
        };
        return LineKind::Control(pair);
    }

    LineKind::Body
}

/// Lines of message text; a trailing line feed does not start an extra line
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_terminator('\n').enumerate()
}

/// Extract kludge metadata from message text
///
/// Duplicate names keep the last value seen. Use [`seen_by_lines`] for every
/// `SEEN-BY` line.
///
/// # Example
///
/// ```
/// use fidopkt::extract_kludges;
///
/// let kludges = extract_kludges("AREA:TEST\nSEEN-BY: 1/2\nhello\nworld\n");
/// assert_eq!(kludges["AREA"], "TEST");
/// assert_eq!(kludges["SEEN-BY"], " 1/2");
/// ```
pub fn extract_kludges(text: &str) -> KludgeMap {
    let mut kludges = KludgeMap::new();

    for (index, line) in lines(text) {
        match classify_line(index, line) {
            LineKind::Area(tag) => {
                kludges.insert("AREA".to_string(), tag.to_string());
            }
            LineKind::SeenBy(value) => {
                kludges.insert("SEEN-BY".to_string(), value.to_string());
            }
            LineKind::Control(Some((name, value))) => {
                kludges.insert(name, value);
            }
            LineKind::Control(None) | LineKind::Body => {}
        }
    }

    kludges
}

/// Message text with all kludge lines removed
///
/// Every retained line is followed by a line feed.
///
/// ```
/// use fidopkt::strip_kludges;
///
/// let body = strip_kludges("AREA:TEST\nSEEN-BY: 1/2\nhello\nworld\n");
/// assert_eq!(body, "hello\nworld\n");
/// ```
pub fn strip_kludges(text: &str) -> String {
    let mut body = String::with_capacity(text.len());

    for (index, line) in lines(text) {
        if classify_line(index, line).is_kludge() {
            continue;
        }
        body.push_str(line);
        body.push('\n');
    }

    body
}

/// Every `SEEN-BY` value in order of appearance
pub fn seen_by_lines(text: &str) -> Vec<String> {
    lines(text)
        .filter_map(|(index, line)| match classify_line(index, line) {
            LineKind::SeenBy(value) => Some(value.to_string()),
            _ => None,
        })
        .collect()
}
