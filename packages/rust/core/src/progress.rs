//! Progress callbacks for long-running batch passes.

/// Trait for reporting progress to the UI layer.
pub trait ProgressReporter: Send + Sync {
    /// Called when a new phase starts (e.g. a section is entered).
    fn phase(&self, name: &str);
    /// Called after each file has been handled.
    fn file_done(&self, path: &str, current: usize);
    /// Called once the pass is complete.
    fn finish(&self);
}

/// A no-op progress reporter for tests or silent mode.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn phase(&self, _name: &str) {}
    fn file_done(&self, _path: &str, _current: usize) {}
    fn finish(&self) {}
}

/// Records how often each callback fired.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct CountingProgress {
    pub files: std::sync::atomic::AtomicUsize,
    pub finished: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ProgressReporter for CountingProgress {
    fn phase(&self, _name: &str) {}

    fn file_done(&self, _path: &str, _current: usize) {
        self.files.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn finish(&self) {
        self.finished.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
