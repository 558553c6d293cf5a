//! Bio HTML clean-up.
//!
//! This is a light pass for server-rendered pages, not a full HTML
//! sanitizer: it drops script and iframe blocks and the most common inline
//! script vectors, and keeps the rest of the markup.

use std::sync::LazyLock;

use regex::Regex;

/// Longest plain-text description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 160;

const SCRIPT_BLOCK_PATTERN: &str = r"(?is)<script\b.*?</script\s*>";
const IFRAME_BLOCK_PATTERN: &str = r"(?is)<iframe\b.*?</iframe\s*>";
const SCRIPT_TOKEN_PATTERN: &str = r"(?i)javascript:|onerror=|onclick=";
const TAG_PATTERN: &str = r"<[^>]*>";
const WHITESPACE_PATTERN: &str = r"\s+";

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SCRIPT_BLOCK_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static IFRAME_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IFRAME_BLOCK_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static SCRIPT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SCRIPT_TOKEN_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WHITESPACE_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));

/// Removes script/iframe blocks and inline script tokens, then trims.
pub fn sanitize_bio(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK_RE.replace_all(html, "");
    let without_frames = IFRAME_BLOCK_RE.replace_all(&without_scripts, "");
    SCRIPT_TOKEN_RE
        .replace_all(&without_frames, "")
        .trim()
        .to_string()
}

/// Renders HTML to a single line of plain text.
pub fn plain_text(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    let without_nbsp = without_tags.replace("&nbsp;", " ");
    WHITESPACE_RE
        .replace_all(&without_nbsp, " ")
        .trim()
        .to_string()
}

/// Plain text of the bio cut to [`DESCRIPTION_MAX_CHARS`].
pub fn description(html: &str) -> String {
    plain_text(html).chars().take(DESCRIPTION_MAX_CHARS).collect()
}
