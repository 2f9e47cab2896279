//! Restricted glob matcher for package and file paths.
//!
//! Exception authors only use a handful of shapes, so this is not a general
//! glob engine. The grammar is:
//!
//! - `before**/after` (double-star infix): `path` starts with `before` (when
//!   non-empty) and `after` matches anywhere in `path`. A trailing `/**` or a
//!   leading `*/` on `after` is dropped; a leading `*` on `after` turns it into
//!   a suffix match.
//! - `before*/after` (single-star infix, no `**/`): `path` starts with
//!   `before` (when non-empty) and contains `after` with any trailing `/*`
//!   dropped.
//! - `**/rest` (double-star prefix): suffix match on `rest`, ignoring a
//!   leading `*`.
//! - anything else: exact equality.
//!
//! # Examples
//!
//! ```
//! use cleanup_rules::domain::matches;
//!
//! assert!(matches("*/cmd/*", "github.com/example/project/cmd/server"));
//! assert!(matches("**/function/**", "github.com/example/project/internal/function/handler"));
//! assert!(matches("**/*_test.go", "pkg/handler_test.go"));
//! assert!(!matches("**/*_test.go", "pkg/handler.go"));
//! ```

const DOUBLE_STAR: &str = "**/";
const SINGLE_STAR: &str = "*/";

/// Check whether `path` matches the restricted glob `pattern`.
///
/// Total and side-effect free: every input returns a decision, including
/// patterns longer than the path.
#[must_use]
pub fn matches(pattern: &str, path: &str) -> bool {
    // `**/` must be tried before `*/`: every double-star pattern also
    // contains the single-star separator.
    if let Some((before, after)) = pattern.split_once(DOUBLE_STAR) {
        return match_double_star_infix(before, after, path);
    }

    if let Some((before, after)) = pattern.split_once(SINGLE_STAR) {
        return match_single_star_infix(before, after, path);
    }

    if let Some(rest) = pattern.strip_prefix(DOUBLE_STAR) {
        return match_double_star_prefix(rest, path);
    }

    pattern == path
}

fn match_double_star_infix(before: &str, after: &str, path: &str) -> bool {
    let after = after.strip_suffix("/**").unwrap_or(after);
    let after = after.strip_prefix(SINGLE_STAR).unwrap_or(after);

    if !before.is_empty() && !path.starts_with(before) {
        return false;
    }

    match after.strip_prefix('*') {
        Some(suffix) => path.ends_with(suffix),
        None => after.is_empty() || path.contains(after),
    }
}

fn match_single_star_infix(before: &str, after: &str, path: &str) -> bool {
    let after = after.strip_suffix("/*").unwrap_or(after);

    if before.is_empty() {
        return path.contains(after);
    }

    path.starts_with(before) && path.contains(after)
}

// Shadowed by the infix branch for every pattern `matches` sees today.
fn match_double_star_prefix(rest: &str, path: &str) -> bool {
    let suffix = rest.strip_prefix('*').unwrap_or(rest);
    path.ends_with(suffix)
}
