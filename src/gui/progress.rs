// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::{Progress, ProgressFactory};

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    pages: usize,
    matched: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, pages: 0, matched: 0 }
    }

    pub fn factory(status: Arc<Mutex<String>>) -> ProgressFactory {
        Arc::new(move || Box::new(GuiProgress::new(Arc::clone(&status))) as Box<dyn Progress>)
    }

    fn set_status(&self, msg: impl Into<String>) {
        let text = msg.into();
        *self.status.lock().unwrap() = text;
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, _max_pages: usize) {
        self.set_status(s!("Scanning bet history…"));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn page_done(&mut self, page: usize, matched: usize, _seen: usize) {
        self.pages = page;
        self.matched += matched;
        self.set_status(format!("Page {} scanned, {} bets so far", page, self.matched));
    }
    fn finish(&mut self) {
        if self.pages == 0 {
            self.set_status(s!("Scan complete"));
        } else {
            self.set_status(format!("Scan complete ({} pages)", self.pages));
        }
    }
}
