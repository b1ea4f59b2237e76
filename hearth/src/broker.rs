//! In-process publish/subscribe fan-out for the display stream.
//!
//! One coordinating task owns the subscriber registry; registration,
//! deregistration, and publishing all flow through its command channel, so the
//! registry itself needs no lock. Delivery policy: each subscriber has a
//! bounded queue and the coordinator only ever `try_send`s into it — when a
//! queue is full the event is dropped for that subscriber alone (logged), so
//! one stalled consumer never stalls publication to its peers.

use std::collections::HashMap;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

const COMMAND_QUEUE_CAPACITY: usize = 64;

enum Command<T> {
    Register { id: Uuid, tx: mpsc::Sender<T> },
    Deregister { id: Uuid },
    Publish { value: T },
}

/// Handle to a broker. Cloning shares the same coordinating task.
pub struct Broker<T> {
    cmd_tx: mpsc::Sender<Command<T>>,
    queue_capacity: usize,
}

impl<T> Clone for Broker<T> {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            queue_capacity: self.queue_capacity,
        }
    }
}

impl<T: Clone + Send + 'static> Broker<T> {
    /// Spawns the coordinating task. `queue_capacity` bounds each subscriber's
    /// delivery queue. The task exits once every handle and subscription is
    /// gone.
    pub fn spawn(queue_capacity: usize) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        tokio::spawn(run_registry(cmd_rx));
        Self {
            cmd_tx,
            queue_capacity,
        }
    }

    /// Registers a new subscriber and returns its receiving handle.
    ///
    /// Delivery starts once the coordinating task has processed the
    /// registration; a publish racing ahead of it simply misses this
    /// subscriber, which is acceptable for a live stream.
    pub async fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let id = Uuid::new_v4();
        let _ = self.cmd_tx.send(Command::Register { id, tx }).await;
        Subscription {
            id,
            rx,
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    /// Offers `value` to every subscriber registered at the moment the
    /// coordinating task processes this publish. Publishes are processed in
    /// order; each subscriber sees them in that order, minus its own drops.
    pub async fn publish(&self, value: T) {
        let _ = self.cmd_tx.send(Command::Publish { value }).await;
    }
}

async fn run_registry<T: Clone>(mut cmd_rx: mpsc::Receiver<Command<T>>) {
    let mut subscribers: HashMap<Uuid, mpsc::Sender<T>> = HashMap::new();
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            Command::Register { id, tx } => {
                subscribers.insert(id, tx);
            }
            Command::Deregister { id } => {
                // Unknown ids are fine: the handle may never have finished
                // registering, or the entry was already dropped as closed.
                subscribers.remove(&id);
            }
            Command::Publish { value } => {
                let mut closed = Vec::new();
                for (id, tx) in &subscribers {
                    match tx.try_send(value.clone()) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::warn!(subscriber = %id, "delivery queue full, dropping event");
                        }
                        Err(TrySendError::Closed(_)) => closed.push(*id),
                    }
                }
                for id in closed {
                    subscribers.remove(&id);
                }
            }
        }
    }
    // Registry dropped here, which drops every sender and closes the
    // remaining subscriber channels.
}

/// A registered subscriber's receiving half. Implements [`Stream`].
///
/// Dropping it deregisters: the coordinating task removes the registry entry
/// and drops the sending half, closing the channel in the same step.
pub struct Subscription<T> {
    id: Uuid,
    rx: mpsc::Receiver<T>,
    cmd_tx: mpsc::Sender<Command<T>>,
}

impl<T> Subscription<T> {
    /// Receives the next published value; `None` once the broker is gone and
    /// the queue is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        // Best effort: if the command queue is full right now, the closed
        // receiver is noticed and removed on the next publish instead.
        let _ = self.cmd_tx.try_send(Command::Deregister { id: self.id });
    }
}
