//! Command handlers wiring CLI input to the refresher.

use std::sync::Arc;

use crate::cli::Cli;
use crate::error::AppError;
use crate::lock::{self, HttpTransport, PageContext};
use crate::page;
use crate::utils::tick_debug_enabled;

/// Activate the refresher and block until it ends.
///
/// A non-edit path is not an error: there is no lock to keep alive, so
/// this prints a notice and exits cleanly without sending anything.
/// The token is only required once the precondition holds.
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let path = cli.path.clone().unwrap_or_default();
    if !page::is_edit_view(&path) {
        println!("Not an edit view: {path:?} (lock refresh not started)");
        return Ok(());
    }

    let token = cli.token.clone().unwrap_or_default();
    if token.is_empty() {
        return Err(AppError::MissingToken);
    }

    let base_url = cli.normalized_base_url()?;
    let interval = cli.interval()?;
    let ctx = PageContext {
        path,
        csrf_token: token,
    };
    let transport = Arc::new(HttpTransport::new(base_url));

    if let Some(handle) = lock::activate(&ctx, transport, interval, cli.max_ticks) {
        eprintln!(
            "Refreshing lock via {} every {}ms{}",
            page::lock_url(&ctx.path),
            interval.as_millis(),
            match cli.max_ticks {
                Some(n) => format!(" for {n} ticks"),
                None => String::new(),
            }
        );
        let ticks = handle.wait();
        if tick_debug_enabled() {
            eprintln!("lock refresh stopped after {ticks} ticks");
        }
    }

    Ok(())
}

/// Report the derived lock state without touching the network.
pub(crate) fn inspect(cli: &Cli) -> Result<(), AppError> {
    let path = cli.path.clone().unwrap_or_default();
    let active = page::is_edit_view(&path);
    let lock_url = active.then(|| page::lock_url(&path));
    let interval = cli.interval()?;
    let token_present = cli.token.as_deref().is_some_and(|t| !t.is_empty());

    if cli.json {
        let json = serde_json::json!({
            "path": path,
            "active": active,
            "lock_url": lock_url,
            "interval_ms": interval.as_millis() as u64,
            "token_present": token_present,
        });
        println!("{json}");
    } else {
        println!("path:          {path}");
        println!("active:        {active}");
        if let Some(url) = lock_url {
            println!("lock url:      {url}");
        }
        println!("interval:      {}ms", interval.as_millis());
        println!("token present: {token_present}");
    }

    Ok(())
}
