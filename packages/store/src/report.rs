//! Diagnostics sink owned by each store instance.
//!
//! Recoverable outcomes (missing file, malformed content, empty input) never
//! surface as errors to callers, so the store narrates them through a
//! `Reporter` instead. The default forwards to the `log` facade; tests inject
//! a capturing implementation to assert on severities.

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Receives diagnostics from a store instance.
pub trait Reporter: Send + Sync {
    fn report(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }
}

/// Default reporter: forwards to the `log` facade.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => log::info!("{}", message),
            Severity::Warning => log::warn!("{}", message),
            Severity::Error => log::error!("{}", message),
        }
    }
}
