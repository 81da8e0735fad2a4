// src/progress.rs
use std::sync::Arc;

/// Lightweight progress reporting for the extraction loop.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the page cap.
    fn begin(&mut self, _max_pages: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called after each page: how many rows matched of how many entries.
    fn page_done(&mut self, _page: usize, _matched: usize, _seen: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// One fresh sink per extraction invocation; the worker calls this on its
/// own thread, so the factory crosses the boundary rather than the sink.
pub type ProgressFactory = Arc<dyn Fn() -> Box<dyn Progress> + Send + Sync>;

pub fn null_factory() -> ProgressFactory {
    Arc::new(|| Box::new(NullProgress) as Box<dyn Progress>)
}
