//! Terminal input abstraction.
//!
//! Wraps crossterm events into a smaller enum and runs a background task that
//! forwards them over a channel so the frame loop never blocks on input.
//! Frame pacing is not done here; see [`super::ticker`].

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level input events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a background task that polls the terminal for input and sends it
/// through the returned channel.  The task ends once the receiver is dropped.
pub fn spawn_event_reader(poll_timeout: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            // Poll with a timeout so a dropped receiver is noticed promptly.
            if !event::poll(poll_timeout).unwrap_or(false) {
                continue;
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            let app_event = match ev {
                // Windows reports releases too; only presses drive the carousel.
                CtEvent::Key(k) if k.kind != KeyEventKind::Release => AppEvent::Key(k),
                CtEvent::Mouse(m) => AppEvent::Mouse(m),
                CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break;
            }
        }
        tracing::debug!("input reader stopped");
    });

    rx
}
