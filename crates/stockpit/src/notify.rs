//! Console notifier: terminal rendering of the core notification
//! contract.
//!
//! Success and error notices go to stderr so structured stdout output
//! stays machine-readable. Confirmation uses `dialoguer`, auto-affirmed
//! by `--yes`. The last error is retained so command handlers can map it
//! to a nonzero exit code after the controllers finish.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use owo_colors::OwoColorize;

use stockpit_core::Notifier;

pub struct ConsoleNotifier {
    yes: bool,
    quiet: bool,
    color: bool,
    last_error: Mutex<Option<String>>,
}

impl ConsoleNotifier {
    pub fn new(yes: bool, quiet: bool, color: bool) -> Self {
        Self {
            yes,
            quiet,
            color,
            last_error: Mutex::new(None),
        }
    }

    /// Take the most recent error message, clearing it.
    pub fn take_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|mut e| e.take())
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    // A one-shot CLI has no toast to dismiss; the interval is part of
    // the contract for long-lived presentations.
    async fn notify_success(&self, message: &str, _auto_dismiss: Duration) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {message}", "✓".green());
        } else {
            eprintln!("✓ {message}");
        }
    }

    async fn notify_error(&self, message: &str) {
        if self.color {
            eprintln!("{} {message}", "✗".red());
        } else {
            eprintln!("✗ {message}");
        }
        if let Ok(mut last) = self.last_error.lock() {
            *last = Some(message.to_owned());
        }
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.yes {
            return true;
        }
        // Any prompt failure (non-interactive stdin) counts as a decline.
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
