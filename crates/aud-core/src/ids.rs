//! ID prefix constants and formatting helpers.
//!
//! IDs are minted by the persistence collaborator; the core only formats the
//! ids it derives itself.

pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_GRANT: &str = "grt";

/// Join a prefix and a suffix: `format_id("grt", "a1")` → `"grt-a1"`.
#[must_use]
pub fn format_id(prefix: &str, suffix: &str) -> String {
    format!("{prefix}-{suffix}")
}
