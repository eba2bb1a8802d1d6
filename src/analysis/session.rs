use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::{detector::DetectionBackend, domain::ModelTarget};

use super::{
    dispatcher::{DispatchError, Dispatcher, InFlight},
    reconciler::{reconcile, ViewModel},
    selector::ModelSelector,
    state::RequestState,
    validator::{validate, ValidationError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Busy(#[from] DispatchError),
}

/// Controller tying the user-owned input and model choice to the dispatcher.
pub struct AnalysisSession<B> {
    input: String,
    selector: ModelSelector,
    dispatcher: Dispatcher<B>,
}

impl<B: DetectionBackend> AnalysisSession<B> {
    pub fn new(backend: Arc<B>, initial_model: ModelTarget) -> Self {
        Self {
            input: String::new(),
            selector: ModelSelector::new(initial_model),
            dispatcher: Dispatcher::new(backend),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn select(&mut self, target: ModelTarget) {
        self.selector.select(target);
    }

    pub fn current_model(&self) -> ModelTarget {
        self.selector.current()
    }

    pub fn is_pending(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// Validates the current input and dispatches it to the selected model.
    ///
    /// Invalid input is rejected before any request is built; the request state
    /// is left untouched.
    pub fn submit(&self) -> Result<InFlight, SubmitError> {
        let input = validate(&self.input).inspect_err(|err| {
            tracing::debug!(target: "dispatch", error = %err, "submission rejected");
        })?;
        Ok(self.dispatcher.dispatch(input, self.selector.current())?)
    }

    pub fn reset(&self) {
        self.dispatcher.reset();
    }

    pub fn state(&self) -> RequestState {
        self.dispatcher.state()
    }

    pub fn view(&self) -> ViewModel {
        reconcile(&self.state())
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.dispatcher.subscribe()
    }
}
