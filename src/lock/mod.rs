//! Record edit-lock keep-alive
//!
//! `activate` checks the edit-view precondition, captures the request
//! payload once, and starts the refresh timer. The transport trait
//! separates tick scheduling from request delivery.

pub(crate) mod refresher;
pub(crate) mod request;
pub(crate) mod transport;

pub(crate) use refresher::{PageContext, activate};
pub(crate) use transport::HttpTransport;
