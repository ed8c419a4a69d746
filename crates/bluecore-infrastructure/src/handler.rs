//! Single-threaded execution contexts
//!
//! Every started module owns one handler: a FIFO work queue drained by a
//! dedicated OS thread. Tasks posted to the same handler never overlap, which
//! gives each module single-writer semantics without locks of its own.
//!
//! ```text
//!  Handler (clone) ──post──┐
//!  Handler (clone) ──call──┼──► mpsc queue ──► worker thread ──► task()
//!  HandlerThread ─shutdown─┘                      (one at a time)
//! ```
//!
//! The registry holds the [`HandlerThread`]; modules and facades only get
//! [`Handler`] clones. Once the thread has shut down every clone reports
//! [`Error::HandlerStopped`].

use bluecore_domain::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, trace, warn};

type Task = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Run(Task),
    Shutdown(oneshot::Sender<()>),
}

/// Posting side of a module's execution context
///
/// Cheap to clone. Clones share the queue and the counters.
#[derive(Clone)]
pub struct Handler {
    name: Arc<str>,
    queue: mpsc::UnboundedSender<Message>,
    executed: Arc<AtomicU64>,
}

impl Handler {
    /// Handler name (also the worker thread name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the worker still accepts tasks
    pub fn is_running(&self) -> bool {
        !self.queue.is_closed()
    }

    /// Number of tasks the worker has taken off the queue
    pub fn executed_tasks(&self) -> u64 {
        self.executed.load(Ordering::Acquire)
    }

    /// Queue `task` behind everything already posted
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue
            .send(Message::Run(Box::new(task)))
            .map_err(|_| Error::handler_stopped(self.name()))
    }

    /// Run `task` on the worker and wait for its result
    ///
    /// Must not be awaited from a task running on this same handler: the
    /// worker would wait on itself.
    pub async fn call<F, R>(&self, task: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, result) = oneshot::channel();
        self.post(move || {
            // Receiver gone means the caller stopped waiting
            let _ = reply.send(task());
        })?;
        result.await.map_err(|_| {
            Error::internal(format!(
                "task on handler {} panicked or was dropped",
                self.name
            ))
        })
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .field("executed", &self.executed_tasks())
            .finish()
    }
}

/// Owning side of a handler: the dedicated worker thread
///
/// Dropping a `HandlerThread` without calling [`shutdown`](Self::shutdown)
/// still stops the worker once the queued tasks have run, but nobody waits
/// for it.
pub struct HandlerThread {
    handler: Handler,
    worker: Option<JoinHandle<()>>,
}

impl HandlerThread {
    /// Spawn a named worker thread and its queue
    pub fn spawn<S: Into<String>>(name: S) -> Result<Self> {
        let name: Arc<str> = Arc::from(name.into());
        let (queue, inbox) = mpsc::unbounded_channel();
        let executed = Arc::new(AtomicU64::new(0));

        let worker = std::thread::Builder::new()
            .name(name.to_string())
            .spawn({
                let name = Arc::clone(&name);
                let executed = Arc::clone(&executed);
                move || run_worker(&name, inbox, &executed)
            })
            .map_err(|e| Error::io_with_source(format!("Failed to spawn handler {name}"), e))?;

        debug!(handler = %name, "Handler thread spawned");
        Ok(Self {
            handler: Handler {
                name,
                queue,
                executed,
            },
            worker: Some(worker),
        })
    }

    /// A posting handle bound to this worker
    pub fn handler(&self) -> Handler {
        self.handler.clone()
    }

    /// Run every task queued so far, then stop the worker and join it
    ///
    /// Tasks posted after the shutdown request are discarded.
    pub async fn shutdown(mut self) -> Result<()> {
        let name = self.handler.name.to_string();
        let (ack, done) = oneshot::channel();
        if self.handler.queue.send(Message::Shutdown(ack)).is_ok() {
            // Worker drops the sender only if it dies mid-drain
            if done.await.is_err() {
                warn!(handler = %name, "Handler exited before acknowledging shutdown");
            }
        }

        if let Some(worker) = self.worker.take() {
            tokio::task::spawn_blocking(move || worker.join())
                .await
                .map_err(|e| Error::internal(format!("Failed to join handler {name}: {e}")))?
                .map_err(|panic| {
                    Error::internal(format!(
                        "Handler {name} worker panicked: {}",
                        panic_message(panic.as_ref())
                    ))
                })?;
        }
        debug!(handler = %name, "Handler thread stopped");
        Ok(())
    }
}

impl Drop for HandlerThread {
    fn drop(&mut self) {
        if self.worker.is_some() {
            let (ack, _) = oneshot::channel();
            // Detach: the worker exits on its own after draining
            let _ = self.handler.queue.send(Message::Shutdown(ack));
        }
    }
}

impl fmt::Debug for HandlerThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerThread")
            .field("handler", &self.handler)
            .field("joined", &self.worker.is_none())
            .finish()
    }
}

fn run_worker(name: &str, mut inbox: mpsc::UnboundedReceiver<Message>, executed: &AtomicU64) {
    trace!(handler = %name, "Handler worker running");
    while let Some(message) = inbox.blocking_recv() {
        match message {
            Message::Run(task) => {
                // Counted before running so a `call` reply never overtakes it
                executed.fetch_add(1, Ordering::AcqRel);
                if let Err(panic) = catch_unwind(AssertUnwindSafe(task)) {
                    error!(
                        handler = %name,
                        panic = %panic_message(panic.as_ref()),
                        "Handler task panicked"
                    );
                }
            }
            Message::Shutdown(ack) => {
                inbox.close();
                let _ = ack.send(());
                break;
            }
        }
    }
    trace!(handler = %name, "Handler worker exiting");
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
