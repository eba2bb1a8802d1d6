use crate::domain::ModelTarget;

/// Holds the detection target the next submission goes to.
///
/// Callers keep the selection stable while a request is pending; the selector
/// itself does not check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelSelector {
    current: ModelTarget,
}

impl ModelSelector {
    pub fn new(initial: ModelTarget) -> Self {
        Self { current: initial }
    }

    pub fn select(&mut self, target: ModelTarget) {
        self.current = target;
    }

    pub fn current(&self) -> ModelTarget {
        self.current
    }
}
