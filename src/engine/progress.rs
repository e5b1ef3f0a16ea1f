// ==========================================
// Fuel Ledger - Progress & diagnostics reporting
// ==========================================
// Responsibility: caller hooks for progress percentage and per-record diagnostics
// Notifications are synchronous and best-effort; they never fail a run
// ==========================================

use std::cell::Cell;

/// Advisory progress sub-ranges `(start, span)` of one run
pub mod phases {
    pub const EXTRACTION: (u8, u8) = (20, 40);
    pub const WRITING: (u8, u8) = (60, 30);
    pub const PROPAGATION: (u8, u8) = (70, 30);
}

/// Receiver of run notifications. Both hooks default to no-ops.
pub trait RunReporter {
    /// Progress percentage, 0..=100
    fn progress(&self, _percent: u8) {}

    /// One human-readable message per notable event
    fn diagnostic(&self, _message: &str) {}
}

/// Reporter that drops every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl RunReporter for SilentReporter {}

type ProgressHook = Box<dyn Fn(u8) + Send>;
type DiagnosticHook = Box<dyn Fn(&str) + Send>;

/// Reporter built from two optional closures
#[derive(Default)]
pub struct CallbackReporter {
    on_progress: Option<ProgressHook>,
    on_diagnostic: Option<DiagnosticHook>,
}

impl CallbackReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, hook: impl Fn(u8) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(hook));
        self
    }

    pub fn with_diagnostic(mut self, hook: impl Fn(&str) + Send + 'static) -> Self {
        self.on_diagnostic = Some(Box::new(hook));
        self
    }
}

impl RunReporter for CallbackReporter {
    fn progress(&self, percent: u8) {
        if let Some(hook) = &self.on_progress {
            hook(percent);
        }
    }

    fn diagnostic(&self, message: &str) {
        if let Some(hook) = &self.on_diagnostic {
            hook(message);
        }
    }
}

/// Wrapper that keeps progress non-decreasing within one run and clamps it to 100.
/// Diagnostics pass through untouched.
pub struct MonotonicProgress<'a> {
    inner: &'a dyn RunReporter,
    last: Cell<u8>,
}

impl<'a> MonotonicProgress<'a> {
    pub fn new(inner: &'a dyn RunReporter) -> Self {
        Self {
            inner,
            last: Cell::new(0),
        }
    }

    pub fn last(&self) -> u8 {
        self.last.get()
    }
}

impl RunReporter for MonotonicProgress<'_> {
    fn progress(&self, percent: u8) {
        let value = percent.min(100).max(self.last.get());
        self.last.set(value);
        self.inner.progress(value);
    }

    fn diagnostic(&self, message: &str) {
        self.inner.diagnostic(message);
    }
}

/// Position of item `index` out of `total` inside the sub-range `(start, span)`
pub fn scaled(index: usize, total: usize, (start, span): (u8, u8)) -> u8 {
    if total == 0 {
        return start;
    }
    let offset = (index.min(total) * span as usize) / total;
    (start as usize + offset).min(100) as u8
}
