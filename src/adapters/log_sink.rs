//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger. A future telemetry or dashboard adapter would implement the same
//! trait.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => info!("EVENT | started in {state:?}"),
            AppEvent::FrameScored { present, window } => {
                // Per-frame; keep it out of the default log level.
                debug!(
                    "FRAME | present={present} window={}",
                    window
                        .iter()
                        .map(|&s| if s { 'T' } else { 'F' })
                        .collect::<String>()
                );
            }
            AppEvent::FireTriggered => info!("FIRE  | sustained detection, deterrent burst"),
            AppEvent::PatternStarted(name) => info!("MOTION| {name} starting"),
            AppEvent::PatternFinished { name, outcome } => {
                info!("MOTION| {name} finished: {outcome:?}");
            }
            AppEvent::PatternRejected(err) => warn!("MOTION| request rejected: {err}"),
            AppEvent::PatternAborted { name, error } => {
                warn!("MOTION| {name} aborted: {error}");
            }
            AppEvent::ShutdownRequested => info!("EVENT | shutdown requested"),
            AppEvent::ShutdownComplete => info!("EVENT | shutdown complete"),
        }
    }
}
