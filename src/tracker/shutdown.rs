use tokio::select;
use tracing::{info, warn};

use super::control::TrackerHandle;

/// Stops the tracker when the process receives Ctrl-C. Returns as soon as the tracker is stopped
/// by any means.
pub async fn detect_shutdown(handle: TrackerHandle) {
    select! {
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("Received Ctrl-C, stopping"),
                Err(e) => {
                    // Without signal support only shortcuts and the caller can stop tracking.
                    warn!("Failed to listen for Ctrl-C {e:?}");
                    handle.stopped().await;
                    return;
                }
            }
            handle.stop();
        },
        _ = handle.stopped() => (),
    };
}
