//! User-facing progress output
//!
//! Messages sent through [`Ui`] are advisory text for the person running the
//! pipeline. They are not a machine interface; structured diagnostics go
//! through `tracing`.

use std::sync::Mutex;

/// Sink for user-facing progress messages
pub trait Ui: Send + Sync {
    /// Print an informational message
    fn message(&self, message: &str);

    /// Print an error message
    fn error(&self, message: &str);
}

/// Writes messages to the terminal
#[derive(Debug, Default, Clone)]
pub struct ConsoleUi {
    stderr_only: bool,
}

impl ConsoleUi {
    /// Create a console UI printing messages to stdout
    pub fn new() -> Self {
        Self::default()
    }

    /// Send informational messages to stderr as well, keeping stdout free
    /// for machine-readable output
    pub fn to_stderr(mut self) -> Self {
        self.stderr_only = true;
        self
    }
}

impl Ui for ConsoleUi {
    fn message(&self, message: &str) {
        if self.stderr_only {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Collects messages in memory
///
/// Useful for hosts that forward output elsewhere and for tests.
#[derive(Debug, Default)]
pub struct BufferedUi {
    messages: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl BufferedUi {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Informational messages received so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Error messages received so far
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Ui for BufferedUi {
    fn message(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }

    fn error(&self, message: &str) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(message.to_string());
        }
    }
}
