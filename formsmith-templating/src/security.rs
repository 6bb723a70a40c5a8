//! Limits applied to view sources before they are parsed
//!
//! Builtin views are trusted. Views read from disk are checked against the
//! stricter limits so a runaway file cannot exhaust the renderer.

use crate::error::{Result, TemplatingError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum view size in bytes for untrusted views
pub const MAX_VIEW_SIZE: usize = 100_000;

/// Maximum nesting depth of Liquid control blocks
pub const MAX_VIEW_NESTING_DEPTH: usize = 10;

static BLOCK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{%-?\s*(end)?(if|unless|for|capture|case|tablerow)\b")
        .expect("block tag pattern is valid")
});

/// Validate a view source.
///
/// Trusted views only get a generous size cap; untrusted views are also
/// checked for excessive block nesting.
pub fn validate_view_security(content: &str, is_trusted: bool) -> Result<()> {
    let max_size = if is_trusted {
        MAX_VIEW_SIZE * 10
    } else {
        MAX_VIEW_SIZE
    };
    if content.len() > max_size {
        return Err(TemplatingError::Security(format!(
            "view too large: {} bytes (max allowed: {max_size})",
            content.len()
        )));
    }

    if is_trusted {
        return Ok(());
    }

    let depth = nesting_depth(content);
    if depth > MAX_VIEW_NESTING_DEPTH {
        return Err(TemplatingError::Security(format!(
            "view nesting too deep: {depth} levels (max allowed: {MAX_VIEW_NESTING_DEPTH})"
        )));
    }

    Ok(())
}

fn nesting_depth(content: &str) -> usize {
    let mut max_depth = 0;
    let mut depth: usize = 0;

    for cap in BLOCK_TAG_RE.captures_iter(content) {
        if cap.get(1).is_some() {
            depth = depth.saturating_sub(1);
        } else {
            depth += 1;
            max_depth = max_depth.max(depth);
        }
    }

    max_depth
}
