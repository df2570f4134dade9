//! Thread-affinity executor for UI-bound work.

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, ThreadId};

use crossbeam_channel::{bounded, unbounded, Sender};
use tracing::debug;

type Job = Box<dyn FnOnce() + Send>;

/// Executes closures on a dedicated UI thread.
///
/// Editor views must only be constructed on the thread that owns the
/// UI. The executor owns that thread; [`UiExecutor::invoke_and_wait`]
/// runs a closure there and blocks the caller until it completes. Calls
/// made on the UI thread itself run inline, so nested dispatch cannot
/// deadlock.
#[derive(Clone)]
pub struct UiExecutor {
    sender: Sender<Job>,
    thread_id: ThreadId,
}

impl UiExecutor {
    /// Spawns the UI thread and returns a handle to it.
    ///
    /// Handles are cheap to clone. The thread exits once the last
    /// handle is dropped.
    ///
    /// # Errors
    ///
    /// Fails when the operating system refuses to spawn the thread.
    pub fn new() -> std::io::Result<Self> {
        let (sender, receiver) = unbounded::<Job>();
        let worker = thread::Builder::new()
            .name("vellum-ui".to_string())
            .spawn(move || {
                while let Ok(job) = receiver.recv() {
                    job();
                }
            })?;
        Ok(Self {
            sender,
            thread_id: worker.thread().id(),
        })
    }

    /// Returns true when called from the UI thread.
    #[must_use]
    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Runs `f` on the UI thread and returns its result, blocking the
    /// caller until the call completes. A panic raised by `f` resumes on
    /// the calling thread.
    pub fn invoke_and_wait<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.is_ui_thread() {
            return f();
        }

        debug!("marshalling call onto the ui thread");
        let (result_sender, result_receiver) = bounded(1);
        let job: Job = Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(f));
            let _ = result_sender.send(result);
        });
        // The worker only exits after every handle is gone, and `&self`
        // keeps one alive for the duration of the call.
        if self.sender.send(job).is_err() {
            panic!("ui thread is no longer running");
        }
        match result_receiver.recv() {
            Ok(Ok(value)) => value,
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(_) => panic!("ui thread dropped a marshalled call"),
        }
    }
}
