//! One-shot completion signals.
//!
//! Each module exposes exactly one completion signal with a typed payload and
//! a single listener. Delivery is synchronous on the caller's thread.

/// A one-shot notification from a module to its orchestrator.
///
/// The signal fires at most once until it is re-armed. Connecting a new
/// listener replaces the previous one.
pub struct CompletionSignal<T> {
    listener: Option<Box<dyn FnMut(T)>>,
    fired: bool,
}

impl<T> CompletionSignal<T> {
    /// Create an armed signal with no listener.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listener: None,
            fired: false,
        }
    }

    /// Register the listener.
    pub fn connect(&mut self, listener: impl FnMut(T) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Whether a listener is registered.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.listener.is_some()
    }

    /// Fire the signal.
    ///
    /// Returns `true` if this call was the firing one. Later calls before
    /// [`rearm`](Self::rearm) are ignored. A signal without a listener still
    /// counts as fired.
    pub fn emit(&mut self, payload: T) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        if let Some(listener) = self.listener.as_mut() {
            listener(payload);
        }
        true
    }

    /// Whether the signal has fired since it was last armed.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Allow the signal to fire again.
    pub fn rearm(&mut self) {
        self.fired = false;
    }
}

impl<T> Default for CompletionSignal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CompletionSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("connected", &self.listener.is_some())
            .field("fired", &self.fired)
            .finish()
    }
}
