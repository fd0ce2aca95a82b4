//! Control channel connection: command/response correlation and events.
//!
//! A `Connection` wraps one WebSocket channel. Commands get a sequential id
//! and a parked oneshot callback; the dispatch task routes each inbound
//! response to the callback with the matching id, so responses arriving out
//! of order are still delivered to their originating command. Unsolicited
//! events flow into a queue consumed via [`Connection::next_event`].
//!
//! # Message Flow
//!
//! 1. Caller invokes `send_command()` with a method and params
//! 2. Connection assigns the next id and registers a oneshot callback
//! 3. The command is serialized and sent as one text frame
//! 4. The reader task pumps inbound frames into the dispatch task
//! 5. Dispatch removes the callback for the response's id and completes it
//! 6. Caller receives the result (or the browser's error payload)

use crate::error::{Error, Result};
use crate::transport::{self, TransportParts};
use cdp_protocol::{Command, Event, Message};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex as TokioMutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Deadline for any single command/response exchange.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Pending command callbacks keyed by request id.
type CallbackMap = Arc<TokioMutex<HashMap<u64, oneshot::Sender<Result<Value>>>>>;

/// One control channel connection to a page target.
///
/// Connections are short-lived: each high-level operation opens its own and
/// closes it when done, so request ids reset naturally per operation.
pub struct Connection {
    next_id: AtomicU64,
    callbacks: CallbackMap,
    sender: TokioMutex<transport::WsSender>,
    event_rx: TokioMutex<mpsc::UnboundedReceiver<Event>>,
    reader: JoinHandle<()>,
    dispatcher: JoinHandle<()>,
}

impl Connection {
    /// Open a channel to the given WebSocket debugger URL and start the
    /// reader and dispatch tasks.
    pub async fn connect(url: &str) -> Result<Self> {
        let TransportParts {
            sender,
            receiver,
            mut message_rx,
        } = transport::connect(url).await?;

        let reader = tokio::spawn(async move {
            if let Err(e) = receiver.run().await {
                tracing::debug!(error = %e, "transport read loop ended");
            }
        });

        let callbacks: CallbackMap = Arc::default();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let dispatch_callbacks = Arc::clone(&callbacks);
        let dispatcher = tokio::spawn(async move {
            while let Some(value) = message_rx.recv().await {
                match serde_json::from_value::<Message>(value) {
                    Ok(message) => dispatch(&dispatch_callbacks, &event_tx, message).await,
                    Err(e) => tracing::warn!(error = %e, "failed to parse inbound message"),
                }
            }
            // Channel gone: fail anything still waiting for a response.
            for (_, callback) in dispatch_callbacks.lock().await.drain() {
                let _ = callback.send(Err(Error::ChannelClosed));
            }
        });

        Ok(Self {
            next_id: AtomicU64::new(1),
            callbacks,
            sender: TokioMutex::new(sender),
            event_rx: TokioMutex::new(event_rx),
            reader,
            dispatcher,
        })
    }

    /// Send a command and await its id-matched response.
    ///
    /// # Errors
    ///
    /// `Error::Remote` if the browser returns an error payload,
    /// `Error::Timeout` if no response arrives within the command deadline,
    /// `Error::ChannelClosed` if the channel dies while waiting.
    pub async fn send_command(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(id, method, "sending command");

        let (tx, rx) = oneshot::channel();
        self.callbacks.lock().await.insert(id, tx);

        let command = Command {
            id,
            method: method.to_string(),
            params,
        };
        let payload = serde_json::to_value(&command)?;

        if let Err(e) = self.sender.lock().await.send(payload).await {
            self.callbacks.lock().await.remove(&id);
            return Err(e);
        }

        match tokio::time::timeout(COMMAND_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::ChannelClosed),
            Err(_) => {
                self.callbacks.lock().await.remove(&id);
                Err(Error::Timeout(format!(
                    "no response to '{}' within {}s",
                    method,
                    COMMAND_TIMEOUT.as_secs()
                )))
            }
        }
    }

    /// Receive the next unsolicited event.
    ///
    /// Events are buffered from connect time, so nothing emitted while a
    /// command exchange was in flight is lost. Callers bound the wait with
    /// their own timeout.
    ///
    /// # Errors
    ///
    /// `Error::ChannelClosed` once the channel is gone and the buffer is
    /// drained.
    pub async fn next_event(&self) -> Result<Event> {
        self.event_rx
            .lock()
            .await
            .recv()
            .await
            .ok_or(Error::ChannelClosed)
    }

    /// Send a close frame. Task teardown happens on drop.
    pub async fn close(&self) {
        if let Err(e) = self.sender.lock().await.close().await {
            tracing::debug!(error = %e, "close frame not delivered");
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.reader.abort();
        self.dispatcher.abort();
    }
}

/// Route one inbound message: responses to their pending callback, events
/// to the event queue.
async fn dispatch(callbacks: &CallbackMap, events: &mpsc::UnboundedSender<Event>, message: Message) {
    match message {
        Message::Response(response) => {
            let Some(callback) = callbacks.lock().await.remove(&response.id) else {
                tracing::warn!(id = response.id, "response without matching request");
                return;
            };
            let result = match response.error {
                Some(error) => Err(Error::Remote {
                    code: error.code,
                    message: error.message,
                }),
                None => Ok(response.result.unwrap_or(Value::Null)),
            };
            let _ = callback.send(result);
        }
        Message::Event(event) => {
            let _ = events.send(event);
        }
        Message::Unknown(value) => {
            tracing::debug!(%value, "unrecognized inbound message (ignored)");
        }
    }
}
