//! OpenSubtitles access for the subgrab UI.
//!
//! The UI thread never touches the network. It sends an [`types::ApiRequest`]
//! over a crossbeam channel to one background `std::thread`, which owns the
//! blocking HTTP client for its lifetime and answers with
//! `AppEvent::ApiResult` on the event bus.
pub mod types;
pub mod worker;

#[cfg(test)]
pub mod fake;

use crossbeam_channel::Sender;
use subgrab_core::ApiConfig;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use types::ApiRequest;

/// Spawns the API worker thread and returns the request sender.
///
/// The thread exits when every clone of the returned sender is dropped.
///
/// # Errors
///
/// Returns `Err` if the OS refuses to spawn the thread.
pub fn spawn_api_worker(
    config: ApiConfig,
    event_tx: UnboundedSender<AppEvent>,
) -> std::io::Result<Sender<ApiRequest>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::Builder::new()
        .name("api-worker".to_owned())
        .spawn(move || worker::api_worker_loop(config, rx, event_tx))?;
    Ok(tx)
}
