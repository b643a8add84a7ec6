use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::utils::tick_debug_enabled;

use super::request::LockRequest;

const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound side of the refresher. Dispatch is fire-and-forget: the
/// caller never observes the outcome, and slow deliveries must not
/// delay later ticks.
pub(crate) trait LockTransport: Send + Sync {
    fn dispatch(&self, request: &LockRequest);
}

/// Delivers refresh requests over HTTP, joining the relative lock URL
/// to a fixed base. Each dispatch runs on its own thread, so in-flight
/// requests may overlap; they are not deduplicated. Dropping the
/// transport waits for pending deliveries.
pub(crate) struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpTransport {
    /// `base_url` is the scheme and host the page path is joined to,
    /// without a trailing slash (e.g. `http://127.0.0.1:8000`).
    pub(crate) fn new(base_url: String) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(DISPATCH_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            base_url,
            in_flight: Mutex::new(Vec::new()),
        }
    }
}

impl LockTransport for HttpTransport {
    fn dispatch(&self, request: &LockRequest) {
        let agent = self.agent.clone();
        let url = format!("{}{}", self.base_url, request.url);
        let request = request.clone();
        let handle = std::thread::spawn(move || send(&agent, &url, &request));

        let Ok(mut in_flight) = self.in_flight.lock() else {
            return;
        };
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        let Ok(in_flight) = self.in_flight.get_mut() else {
            return;
        };
        for handle in in_flight.drain(..) {
            let _ = handle.join();
        }
    }
}

fn send(agent: &ureq::Agent, url: &str, request: &LockRequest) {
    let (header, value) = request.header();
    let body = request.body();
    match agent.post(url).header(header, value).send(body.as_bytes()) {
        // The response is deliberately not inspected; the server
        // refreshes the lock as a side effect of receiving the POST.
        Ok(_) => {}
        Err(e) => {
            if tick_debug_enabled() {
                eprintln!("lock refresh to {url} failed: {e}");
            }
        }
    }
}
