use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(test)]
use mockall::automock;

/// User visible sink for informational messages and failures.
#[cfg_attr(test, automock)]
pub trait Reporter {
    fn info(&self, message: &str);
    fn failed(&self, message: &str);
}

/// Reports through GitHub Actions workflow commands on stdout.
///
/// A failure is rendered as an `::error::` annotation and remembered so the
/// process can exit non-zero once the run is over.
#[derive(Debug, Default)]
pub struct ActionsReporter {
    failed: AtomicBool,
}

impl ActionsReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl Reporter for ActionsReporter {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        println!("::error::{}", escape_command_data(message));
    }
}

// Workflow commands are line based, so newlines and '%' must be percent-encoded.
fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
