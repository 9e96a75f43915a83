use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Everything except the characters that ECMAScript's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Human-readable page describing a Stack Overflow tag.
pub fn tag_link(name: &str) -> String {
    format!(
        "https://stackoverflow.com/tags/{}/info",
        utf8_percent_encode(name, URI_COMPONENT)
    )
}

/// Popularity snapshot of one tag within a query window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,
    /// Number of questions carrying this tag.
    pub count: u64,
    pub link: String,
}

impl TagRecord {
    pub fn new(name: String, count: u64) -> Self {
        let link = tag_link(&name);
        Self { name, count, link }
    }
}
