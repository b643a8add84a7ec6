//! Edit-view detection and lock URL derivation
//!
//! An admin object-edit page is recognized by its path alone: the last
//! non-empty segment is the literal `change`. The lock-refresh endpoint
//! lives directly under that page's path.

use crate::consts::{EDIT_SEGMENT, LOCK_SUFFIX};

/// Split a page path into its non-empty segments.
pub(crate) fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Whether the path points at an object edit view.
pub(crate) fn is_edit_view(path: &str) -> bool {
    split_segments(path).last() == Some(&EDIT_SEGMENT)
}

/// The lock-refresh URL for an edit page: the page path with the
/// endpoint suffix appended verbatim. Callers are expected to pass the
/// path with its trailing slash, as served by the admin.
pub(crate) fn lock_url(path: &str) -> String {
    format!("{path}{LOCK_SUFFIX}")
}
