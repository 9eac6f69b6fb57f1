//! Canonical username derivation.
//!
//! The service derives each student's login handle from their display name.
//! The same rule is applied here so listings can show the handle and
//! by-username lookups can be pre-filled. The server's rule is the source of
//! truth; this copy must be kept in step with it.

/// Characters stripped explicitly, in order, after whitespace.
const STRIPPED_PUNCTUATION: [char; 5] = ['-', '_', '.', ',', '\''];

/// Derives the canonical username for a display name.
///
/// - Lowercases the name
/// - Removes whitespace, then `-`, `_`, `.`, `,` and `'`
/// - Removes any remaining character outside `[a-z0-9]`
///
/// The result contains only ASCII lowercase letters and digits, so applying
/// the function twice yields the same string.
pub fn derive_username(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();
    for p in STRIPPED_PUNCTUATION {
        out.retain(|c| c != p);
    }
    out.retain(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    out
}
