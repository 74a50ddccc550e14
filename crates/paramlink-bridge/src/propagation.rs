//! Change propagation from the engine to the UI thread.
//!
//! ```text
//! engine thread (audio / host / UI)          UI thread
//! ─────────────────────────────────          ─────────────────────────────
//! Parameter::set_*                           ParameterAttachment::dispatch_pending
//!      ↓                                          ↓
//! ChangeForwarder::parameter_changed         PushQueue::drain
//!      ↓ suppressed? → drop                       ↓
//! PushQueue::enqueue ──── bounded channel ──→ uid lookup, JSON, WebView::evaluate
//! ```
//!
//! The listener side only checks the suppression depth and does a
//! non-blocking `try_send` of a `Copy` notification, so it is safe to run on
//! the audio thread. Everything that allocates happens when the UI thread
//! drains the queue.
//!
//! Every notification becomes one push, in order. Nothing is coalesced or
//! cancelled: a later push simply overwrites what an earlier one delivered.
//! If the queue is full the notification is dropped and an overflow flag is
//! raised; the next drain then resynchronizes every parameter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use paramlink_core::{ParameterId, ParameterListener, ParameterValue};

use crate::suppression::EchoSuppressor;

/// A parameter change waiting to be pushed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPush {
    pub id: ParameterId,
    pub value: ParameterValue,
}

/// Bounded single-consumer queue of pending pushes.
#[derive(Debug)]
pub struct PushQueue {
    sender: Sender<PendingPush>,
    receiver: Receiver<PendingPush>,
    overflowed: AtomicBool,
}

impl PushQueue {
    /// Create a queue holding at most `capacity` pending pushes.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(capacity.max(1));
        Self {
            sender,
            receiver,
            overflowed: AtomicBool::new(false),
        }
    }

    /// Queue a push. Never blocks or allocates.
    ///
    /// Returns `false` if the queue was full and the push was dropped.
    pub fn enqueue(&self, id: ParameterId, value: ParameterValue) -> bool {
        match self.sender.try_send(PendingPush { id, value }) {
            Ok(()) => true,
            // The queue owns its receiver, so it cannot be disconnected
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.overflowed.store(true, Ordering::Release);
                false
            }
        }
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<PendingPush> {
        self.receiver.try_iter().collect()
    }

    /// Read and clear the overflow flag.
    pub fn take_overflow(&self) -> bool {
        self.overflowed.swap(false, Ordering::AcqRel)
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

/// The bridge's parameter listener.
///
/// Registered on every attached parameter. Drops notifications while the
/// bridge is suppressing echoes, queues them otherwise.
#[derive(Debug, Clone)]
pub struct ChangeForwarder {
    suppressor: Arc<EchoSuppressor>,
    queue: Arc<PushQueue>,
}

impl ChangeForwarder {
    pub fn new(suppressor: Arc<EchoSuppressor>, queue: Arc<PushQueue>) -> Self {
        Self { suppressor, queue }
    }
}

impl ParameterListener for ChangeForwarder {
    fn parameter_changed(&self, id: ParameterId, value: ParameterValue) {
        if self.suppressor.is_suppressing() {
            return;
        }
        self.queue.enqueue(id, value);
    }
}
