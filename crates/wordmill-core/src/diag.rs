//! Diagnostic sink
//!
//! The engine performs no I/O of its own. Pool dumps and deletion notices
//! are pushed through this single-method observer; the host decides whether
//! they end up in a console panel, a log file, or nowhere.

use std::cell::RefCell;

/// Receiver for human-readable engine diagnostics.
///
/// Implementations must not block; the engine never waits on them.
pub trait DiagnosticSink {
    /// Post one diagnostic message.
    fn post(&self, message: &str);
}

/// Sink that accumulates messages in memory. Handy for tests and for
/// hosts that render diagnostics lazily.
#[derive(Debug, Default)]
pub struct BufferSink {
    messages: RefCell<Vec<String>>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages posted so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Drop all buffered messages.
    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl DiagnosticSink for BufferSink {
    fn post(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
