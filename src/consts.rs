use std::time::Duration;

/// Default period between lock refresh requests
pub(crate) const REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// Terminal path segment that marks an object edit view
pub(crate) const EDIT_SEGMENT: &str = "change";

/// Suffix appended to the edit page path to reach the refresh endpoint
pub(crate) const LOCK_SUFFIX: &str = "update-lock/";

/// Form field carrying the anti-forgery token in the request body
pub(crate) const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Header carrying the same token value
pub(crate) const CSRF_HEADER: &str = "X-CSRFToken";
