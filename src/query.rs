//! Query-string parsing.
//!
//! The rules are deliberately small:
//!
//! - pairs are separated by `&`
//! - each pair is split on its **first** `=`; the value may itself contain `=`
//! - tokens without any `=` are dropped
//! - a key that appears more than once keeps its **last** value
//!
//! Keys and values are taken verbatim. No percent-decoding, no `+` → space.

use std::collections::HashMap;

/// Parses a raw query string (without the leading `?`) into a map.
///
/// ```rust
/// let q = arith::query::parse("n=5&junk&n=7&expr=a=b");
/// assert_eq!(q["n"], "7");
/// assert_eq!(q["expr"], "a=b");
/// assert!(!q.contains_key("junk"));
/// ```
pub fn parse(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter_map(|token| token.split_once('='))
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}
