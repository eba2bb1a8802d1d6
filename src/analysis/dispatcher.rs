use std::{fmt, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::{sync::watch, task::JoinHandle};

use crate::{detector::DetectionBackend, domain::ModelTarget};

use super::{state::RequestState, validator::ValidInput};

/// Shown for every transport, status or body failure.
pub const UNREACHABLE_MESSAGE: &str = "⚠️ Could not connect to detection server";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("request {0} is still pending")]
    Busy(RequestToken),
}

/// How a finished request related to the state it was issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Committed,
    /// A newer dispatch or a reset superseded the request; its outcome was dropped.
    Discarded,
}

#[derive(Debug, Default)]
struct Ledger {
    latest: u64,
    in_flight: bool,
}

struct Shared {
    ledger: Mutex<Ledger>,
    state: watch::Sender<RequestState>,
}

impl Shared {
    fn commit(&self, token: RequestToken, next: RequestState) -> Completion {
        let mut ledger = self.ledger.lock();
        if ledger.latest != token.0 {
            tracing::debug!(
                target: "dispatch",
                %token,
                latest = ledger.latest,
                outcome = next.name(),
                "discarding stale completion"
            );
            return Completion::Discarded;
        }
        ledger.in_flight = false;
        tracing::info!(target: "dispatch", %token, outcome = next.name(), "request finished");
        self.state.send_replace(next);
        Completion::Committed
    }
}

/// Handle to the request started by [`Dispatcher::dispatch`].
pub struct InFlight {
    token: RequestToken,
    handle: JoinHandle<Completion>,
}

impl InFlight {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub async fn wait(self) -> Completion {
        match self.handle.await {
            Ok(completion) => completion,
            Err(err) => {
                tracing::warn!(target: "dispatch", token = %self.token, error = %err, "request task did not finish");
                Completion::Discarded
            }
        }
    }
}

/// Owns the request state and the single in-flight request.
pub struct Dispatcher<B> {
    backend: Arc<B>,
    shared: Arc<Shared>,
}

impl<B: DetectionBackend> Dispatcher<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            backend,
            shared: Arc::new(Shared {
                ledger: Mutex::new(Ledger::default()),
                state,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> RequestState {
        self.shared.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.shared.ledger.lock().in_flight
    }

    /// Moves to `Pending` and sends `input` to `target` on a background task.
    ///
    /// Fails fast with [`DispatchError::Busy`] while another request is pending.
    pub fn dispatch(
        &self,
        input: ValidInput,
        target: ModelTarget,
    ) -> Result<InFlight, DispatchError> {
        let token = {
            let mut ledger = self.shared.ledger.lock();
            if ledger.in_flight {
                let current = RequestToken(ledger.latest);
                tracing::warn!(target: "dispatch", %current, "rejecting dispatch while busy");
                return Err(DispatchError::Busy(current));
            }
            ledger.latest += 1;
            ledger.in_flight = true;
            self.shared.state.send_replace(RequestState::Pending);
            RequestToken(ledger.latest)
        };
        tracing::info!(target: "dispatch", %token, model = %target, "request started");

        let backend = Arc::clone(&self.backend);
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let outcome = AssertUnwindSafe(backend.classify(target, input.as_str()))
                .catch_unwind()
                .await;
            let next = match outcome {
                Ok(Ok(result)) => RequestState::Succeeded(result),
                Ok(Err(err)) => {
                    tracing::warn!(target: "dispatch", %token, error = %err, "classification failed");
                    RequestState::Failed(UNREACHABLE_MESSAGE.to_string())
                }
                Err(_) => {
                    tracing::error!(target: "dispatch", %token, "detection backend panicked");
                    RequestState::Failed(UNREACHABLE_MESSAGE.to_string())
                }
            };
            shared.commit(token, next)
        });

        Ok(InFlight { token, handle })
    }

    /// Abandons any pending request and returns to `Idle`.
    pub fn reset(&self) {
        let mut ledger = self.shared.ledger.lock();
        if ledger.in_flight {
            tracing::info!(target: "dispatch", abandoned = ledger.latest, "abandoning pending request");
        }
        ledger.latest += 1;
        ledger.in_flight = false;
        self.shared.state.send_replace(RequestState::Idle);
    }
}
