use std::{fmt::Display, sync::Mutex};

/// Represents a trait responsible for handling diagnostics produced by the front end.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive<E: Into<T>>(&self, error: E);
}

/// Prints every received diagnostic to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintHandler;

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<T: Display> Handler<T> for PrintHandler {
    fn receive<E: Into<T>>(&self, error: E) {
        let error: T = error.into();
        eprintln!("{error}");
    }
}

/// Collects every received diagnostic without printing it.
#[derive(Debug)]
pub struct SilentHandler<T> {
    received: Mutex<Vec<T>>,
}

impl<T> Default for SilentHandler<T> {
    fn default() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
        }
    }
}

impl<T> SilentHandler<T> {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all diagnostics received so far.
    #[must_use]
    pub fn dissolve(self) -> Vec<T> {
        self.received
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<T> Handler<T> for SilentHandler<T> {
    fn receive<E: Into<T>>(&self, error: E) {
        self.received
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(error.into());
    }
}

/// Discards every received diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoidHandler;

impl<T> Handler<T> for VoidHandler {
    fn receive<E: Into<T>>(&self, _error: E) {}
}
