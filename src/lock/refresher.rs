//! The recurring lock-refresh timer
//!
//! Activation captures the request payload once, then a timer thread
//! dispatches it on a fixed grid measured from activation. The timer
//! only ends through the handle (explicit stop or a tick limit); left
//! alone it runs until the process goes away.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use chrono::Local;

use crate::page;
use crate::utils::tick_debug_enabled;

use super::request::LockRequest;
use super::transport::LockTransport;

/// The two values the refresher needs from the page being edited.
#[derive(Debug, Clone)]
pub(crate) struct PageContext {
    pub(crate) path: String,
    pub(crate) csrf_token: String,
}

/// Handle to a running refresh timer.
pub(crate) struct RefresherHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
    ticks: Arc<AtomicU64>,
}

impl RefresherHandle {
    /// Signal the timer thread and wait for it to exit. Returns the
    /// number of requests dispatched.
    pub(crate) fn stop(self) -> u64 {
        let _ = self.stop_tx.send(());
        let _ = self.thread.join();
        self.ticks.load(Ordering::Relaxed)
    }

    /// Block until the timer exits on its own. Only returns when a
    /// tick limit was set; without one this waits forever.
    pub(crate) fn wait(self) -> u64 {
        let _ = self.thread.join();
        self.ticks.load(Ordering::Relaxed)
    }

    /// Requests dispatched so far.
    pub(crate) fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

/// Start the refresh timer for an edit page.
///
/// Returns `None` when the path is not an edit view; no timer starts
/// and nothing is ever sent. Otherwise the lock URL and token are
/// captured from `page` once, and the first request fires one full
/// `interval` after this call.
pub(crate) fn activate(
    page: &PageContext,
    transport: Arc<dyn LockTransport>,
    interval: Duration,
    max_ticks: Option<u64>,
) -> Option<RefresherHandle> {
    if !page::is_edit_view(&page.path) {
        return None;
    }

    let request = LockRequest::new(page::lock_url(&page.path), page.csrf_token.clone());
    let ticks = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&ticks);
    let (stop_tx, stop_rx) = channel();
    let thread = std::thread::spawn(move || {
        run_timer(request, transport, interval, max_ticks, counter, stop_rx)
    });

    Some(RefresherHandle {
        stop_tx,
        thread,
        ticks,
    })
}

fn run_timer(
    request: LockRequest,
    transport: Arc<dyn LockTransport>,
    interval: Duration,
    max_ticks: Option<u64>,
    ticks: Arc<AtomicU64>,
    stop_rx: Receiver<()>,
) {
    let mut tick: u64 = 0;
    // Deadlines accumulate from activation so dispatch cost never
    // shifts the grid.
    let mut deadline = Instant::now() + interval;

    loop {
        if max_ticks.is_some_and(|limit| tick >= limit) {
            return;
        }

        let wait = deadline.saturating_duration_since(Instant::now());
        match stop_rx.recv_timeout(wait) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            Err(RecvTimeoutError::Timeout) => {}
        }

        transport.dispatch(&request);
        tick += 1;
        ticks.store(tick, Ordering::Relaxed);
        if tick_debug_enabled() {
            eprintln!(
                "[{}] tick {tick}: POST {}",
                Local::now().format("%H:%M:%S"),
                request.url
            );
        }
        deadline += interval;
    }
}
