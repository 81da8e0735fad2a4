// src/controller.rs
//
// The privileged side of the handshake: validates the request, makes sure
// an extractor worker is active for the target, sends exactly one command,
// awaits exactly one reply, and turns it into a typed surface for the
// frontend. Never touches page state itself.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::config::consts::REPLY_TIMEOUT_MS;
use crate::config::options::ExportOptions;
use crate::progress::ProgressFactory;
use crate::scrape::{self, Command, ExtractorHandle, Reply, SourceFactory};
use crate::specs::BetPageSpec;

/// Opaque handle for the page instance extraction runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabId(pub u32);

#[derive(Clone, Debug)]
pub struct Summary {
    pub count: usize,
    pub pages: usize,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum StartError {
    /// Rejected before dispatch.
    InvalidRange,
    /// No such target registered.
    UnknownTab(TabId),
    /// The extractor could not be activated or its channel is gone.
    Unreachable(String),
    /// The command went out but no reply ever came back.
    NoResponse,
    /// An extraction is already running in the target.
    AlreadyRunning,
    /// Clean run, zero matching bets. Business outcome, not a fault.
    NoRecords,
    /// The extractor aborted with an error.
    Extraction(String),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::InvalidRange => write!(f, "start date is after end date"),
            StartError::UnknownTab(id) => write!(f, "no tab registered with id {}", id.0),
            StartError::Unreachable(msg) => write!(f, "extractor unreachable: {msg}"),
            StartError::NoResponse => write!(f, "no response from extractor"),
            StartError::AlreadyRunning => write!(f, "extraction already in progress"),
            StartError::NoRecords => write!(f, "no bets found in the requested range"),
            StartError::Extraction(msg) => write!(f, "extraction failed: {msg}"),
        }
    }
}

impl Error for StartError {}

struct Tab {
    sources: SourceFactory,
    progress: ProgressFactory,
    extractor: Option<ExtractorHandle>,
}

pub struct Controller {
    spec: &'static BetPageSpec,
    tabs: HashMap<TabId, Tab>,
}

impl Controller {
    pub fn new(spec: &'static BetPageSpec) -> Self {
        Self { spec, tabs: HashMap::new() }
    }

    pub fn register_tab(&mut self, id: TabId, sources: SourceFactory, progress: ProgressFactory) {
        self.tabs.insert(id, Tab { sources, progress, extractor: None });
    }

    /// Idempotent activation: a live worker is reused untouched, a dead or
    /// missing one is (re)spawned.
    fn ensure_extractor(&mut self, id: TabId) -> Result<ExtractorHandle, StartError> {
        let tab = self.tabs.get_mut(&id).ok_or(StartError::UnknownTab(id))?;

        if let Some(handle) = &tab.extractor {
            if handle.is_alive() {
                return Ok(handle.clone());
            }
            logd!("Controller: extractor for tab {} died, respawning", id.0);
        }

        let handle = scrape::spawn(
            self.spec,
            tab.sources.clone(),
            tab.progress.clone(),
        );
        tab.extractor = Some(handle.clone());
        logf!("Controller: extractor active for tab {}", id.0);
        Ok(handle)
    }

    /// One command out, one terminal status back.
    pub fn start_extraction(
        &mut self,
        id: TabId,
        start: NaiveDate,
        end: NaiveDate,
        export: &ExportOptions,
    ) -> Result<Summary, StartError> {
        if start > end {
            return Err(StartError::InvalidRange);
        }

        let handle = self.ensure_extractor(id)?;
        let (reply_tx, reply_rx) = mpsc::channel();

        handle
            .send(Command::Extract {
                start,
                end,
                export: export.clone(),
                reply: reply_tx,
            })
            .map_err(|_| StartError::Unreachable(s!("command channel closed")))?;

        // Worker death drops the reply sender, which also lands here.
        let reply = reply_rx
            .recv_timeout(Duration::from_millis(REPLY_TIMEOUT_MS))
            .map_err(|_| StartError::NoResponse)?;

        match reply {
            Reply::Done { count, pages, path } => {
                logf!("Controller: tab {} done, {count} bets over {pages} pages", id.0);
                Ok(Summary { count, pages, path })
            }
            Reply::Empty => Err(StartError::NoRecords),
            Reply::Busy => Err(StartError::AlreadyRunning),
            Reply::Failed(msg) => Err(StartError::Extraction(msg)),
        }
    }
}
