use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc,
};
use std::time::{Duration, Instant};

use threadpool::ThreadPool;

use super::{
    provider::{MapProvider, MapSurface, ViewSettings},
    token::AccessToken,
};
use crate::errors::error_types::ErrorTypes;

/// Called from the worker once a load has finished.
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

/// Result of one initialization attempt.
///
/// Owns the surface until `take` hands it over. An outcome dropped without
/// being taken destroys its surface.
pub struct LoadOutcome {
    pub attempt: u64,
    result: Option<Result<Box<dyn MapSurface>, ErrorTypes>>,
}

impl LoadOutcome {
    pub fn new(attempt: u64, result: Result<Box<dyn MapSurface>, ErrorTypes>) -> Self {
        Self {
            attempt,
            result: Some(result),
        }
    }

    /// Hands over the loaded surface or the load error.
    pub fn take(mut self) -> Result<Box<dyn MapSurface>, ErrorTypes> {
        match self.result.take() {
            Some(result) => result,
            None => Err(ErrorTypes::widget_init(
                205,
                "Map load result was already taken".to_string(),
            )),
        }
    }

    /// Releases the surface of an outcome nobody is going to adopt.
    pub fn discard(self) {
        drop(self);
    }
}

impl Drop for LoadOutcome {
    fn drop(&mut self) {
        if let Some(Ok(mut surface)) = self.result.take() {
            surface.destroy();
        }
    }
}

/// Messages posted by the worker.
pub enum LoaderEvent {
    /// The worker picked up `attempt` at `at`.
    Started { attempt: u64, at: Instant },
    Finished(LoadOutcome),
}

/// Runs `MapProvider::load` off the UI thread.
///
/// A single worker thread serializes loads, so a queued attempt may wait
/// behind an earlier one. The worker reports when it starts each attempt and
/// when it finishes; both are picked up with `try_recv` from the UI thread.
pub struct Loader {
    pool: ThreadPool,
    provider: Arc<dyn MapProvider>,
    sender: Sender<LoaderEvent>,
    receiver: Receiver<LoaderEvent>,
    notifier: Option<Notifier>,
}

impl Loader {
    pub fn new(provider: Arc<dyn MapProvider>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            pool: ThreadPool::with_name("map-loader".to_string(), 1),
            provider,
            sender,
            receiver,
            notifier: None,
        }
    }

    /// Sets a callback fired after every finished load, e.g. to request a repaint.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.set_notifier(notifier);
        self
    }

    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }

    pub fn provider(&self) -> &dyn MapProvider {
        self.provider.as_ref()
    }

    /// Queues a load tagged with `attempt`.
    pub fn start(&self, attempt: u64, token: AccessToken, view: ViewSettings) {
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        let notifier = self.notifier.clone();

        log::info!("Queueing {} map load (attempt {})", provider.name(), attempt);
        self.pool.execute(move || {
            let started = LoaderEvent::Started {
                attempt,
                at: Instant::now(),
            };
            if sender.send(started).is_err() {
                return;
            }
            let result = provider.load(&token, &view);
            // On a closed channel the returned outcome is dropped here, which
            // destroys its surface.
            if sender
                .send(LoaderEvent::Finished(LoadOutcome::new(attempt, result)))
                .is_err()
            {
                return;
            }
            if let Some(notify) = notifier {
                notify();
            }
        });
    }

    pub fn try_recv(&self) -> Option<LoaderEvent> {
        self.receiver.try_recv().ok()
    }

    pub fn recv_timeout(&self, wait: Duration) -> Option<LoaderEvent> {
        self.receiver.recv_timeout(wait).ok()
    }
}
