use std::{
    cell::{Cell, RefCell},
    fmt::Display,
};

use super::Error;

/// Represents a trait responsible for handling diagnostics in the transpiler.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive<E: Into<T>>(&self, error: E);
    /// Returns whether any error has been received.
    fn has_received(&self) -> bool;
}

/// A handler that prints the received errors to stderr.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Display> Handler<T> for PrintHandler {
    fn receive<E: Into<T>>(&self, error: E) {
        eprintln!("{}", error.into());
        self.printed.set(true);
    }

    fn has_received(&self) -> bool {
        self.printed.get()
    }
}

/// A handler that stores the received errors so they can be inspected later.
#[derive(Debug, Default)]
pub struct SilentHandler {
    received: RefCell<Vec<Error>>,
}

impl SilentHandler {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all errors received so far.
    #[must_use]
    pub fn received(&self) -> Vec<Error> {
        self.received.borrow().clone()
    }
}

impl Handler<Error> for SilentHandler {
    fn receive<E: Into<Error>>(&self, error: E) {
        self.received.borrow_mut().push(error.into());
    }

    fn has_received(&self) -> bool {
        !self.received.borrow().is_empty()
    }
}

/// A handler that discards every error it receives.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoidHandler;

impl<T> Handler<T> for VoidHandler {
    fn receive<E: Into<T>>(&self, _error: E) {}

    fn has_received(&self) -> bool {
        false
    }
}

/// Forwards every error to another handler and remembers whether one was received.
///
/// The wrapped handler may not be able to tell, e.g. [`VoidHandler`].
#[derive(Debug)]
pub(crate) struct TrackingHandler<'a, H> {
    inner: &'a H,
    received: Cell<bool>,
}

impl<'a, H> TrackingHandler<'a, H> {
    pub(crate) fn new(inner: &'a H) -> Self {
        Self {
            inner,
            received: Cell::new(false),
        }
    }
}

impl<H: Handler<Error>> Handler<Error> for TrackingHandler<'_, H> {
    fn receive<E: Into<Error>>(&self, error: E) {
        self.received.set(true);
        self.inner.receive(error.into());
    }

    fn has_received(&self) -> bool {
        self.received.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_void_handler() {
        let handler = TrackingHandler::new(&VoidHandler);
        assert!(!handler.has_received());

        handler.receive(Error::Other("failure"));
        assert!(handler.has_received());
    }

    #[test]
    fn test_silent_handler_collects() {
        let silent = SilentHandler::new();
        let handler = TrackingHandler::new(&silent);
        handler.receive(Error::Other("first"));
        handler.receive(Error::Other("second"));

        assert_eq!(
            silent.received(),
            vec![Error::Other("first"), Error::Other("second")]
        );
    }
}
