// crates/engine/src/domain/hostname.rs

//! Hostname matching against a leaf certificate's subject alternative names.
//!
//! This is the single host-matching semantics in the engine: the chain
//! verifier and the policy evaluator both call [`matches`], so the two can
//! never disagree on wildcard or URI handling.

use crate::domain::types::{CertificateChain, SubjectName};

/// Whether the chain's leaf certificate is valid for `hostname`.
///
/// Only DNS and URI subject alternative names participate. A leaf with no
/// such names never matches; skipping host validation entirely is the
/// caller's decision, not this function's.
pub fn matches(chain: &CertificateChain, hostname: &str) -> bool {
    let Some(leaf) = chain.leaf() else {
        return false;
    };
    leaf.subject_names().iter().any(|name| match name {
        SubjectName::Dns(pattern) => dns_name_matches(pattern, hostname),
        // URI names only match verbatim. A hostname is not a URI, so in
        // practice this arm rejects host checks against URI-only leaves.
        SubjectName::Uri(uri) => uri == hostname,
    })
}

/// Case-insensitive DNS name comparison with leftmost-label wildcard support.
///
/// `*.domain.tld` matches exactly one label: `a.domain.tld` yes,
/// `domain.tld` and `a.b.domain.tld` no.
pub fn dns_name_matches(pattern: &str, hostname: &str) -> bool {
    if pattern.eq_ignore_ascii_case(hostname) {
        return true;
    }
    let Some(suffix) = pattern.strip_prefix("*.") else {
        return false;
    };
    if suffix.is_empty() {
        return false;
    }
    match hostname.split_once('.') {
        Some((label, rest)) => !label.is_empty() && rest.eq_ignore_ascii_case(suffix),
        None => false,
    }
}
