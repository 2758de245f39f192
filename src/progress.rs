//! Progress channel — ordered delivery of run events to an observer
//!
//! An unbounded FIFO channel carrying [`Event`]s from the run task to a single
//! consumer (typically a UI log view). Shutdown is signaled by channel close:
//! when the exporter (and with it every [`ProgressSender`] clone) is dropped,
//! the consumer loop observes end-of-stream and terminates. No sentinel value
//! is involved.

use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::types::Event;

/// Create a connected progress channel pair
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx }, ProgressReceiver { rx })
}

/// Producer half of the progress channel
///
/// Cloneable; sends never block. Events sent after the receiver is dropped
/// are discarded, which lets a run finish even when nobody is watching.
#[derive(Clone)]
pub struct ProgressSender {
    tx: mpsc::UnboundedSender<Event>,
}

impl ProgressSender {
    /// Enqueue an event for the observer
    pub fn emit(&self, event: Event) {
        // A closed channel just means no observer is attached
        self.tx.send(event).ok();
    }
}

/// Consumer half of the progress channel
pub struct ProgressReceiver {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl ProgressReceiver {
    /// Receive the next event, or `None` once all senders are dropped
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Convert into a stream of rendered log lines (UTF-8, one per event)
    pub fn into_lines(self) -> impl futures::Stream<Item = String> {
        UnboundedReceiverStream::new(self.rx).map(|event| event.to_string())
    }

    /// Spawn a consumption loop that renders each event as a line
    ///
    /// The loop runs until the channel closes, then returns. This is the
    /// process-lifetime consumer from the embedding application's point of
    /// view: create it once at startup, join it after the exporter is dropped.
    pub fn spawn_consumer<F>(self, mut render: F) -> tokio::task::JoinHandle<()>
    where
        F: FnMut(String) + Send + 'static,
    {
        let mut rx = self.rx;
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                render(event.to_string());
            }
        })
    }
}
