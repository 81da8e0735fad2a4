// src/scrape/worker.rs
//
// The extractor side of the command handshake: one worker per target,
// commands in over a channel, exactly one reply out per command. The
// worker owns the single "is an extraction running" flag for its target;
// a command arriving while the flag is up gets an immediate Busy reply
// instead of queueing behind the running loop.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SendError, Sender};
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

use crate::config::options::ExportOptions;
use crate::progress::ProgressFactory;
use crate::specs::BetPageSpec;

use super::session::{DateWindow, Session};
use super::source::SourceFactory;

pub enum Command {
    Extract {
        start: NaiveDate,
        end: NaiveDate,
        export: ExportOptions,
        reply: Sender<Reply>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Done {
        count: usize,
        pages: usize,
        path: PathBuf,
    },
    /// Loop finished cleanly but nothing matched. A business outcome, not
    /// an error.
    Empty,
    /// An extraction is already running in this worker.
    Busy,
    Failed(String),
}

#[derive(Clone)]
pub struct ExtractorHandle {
    tx: Sender<Command>,
    alive: Arc<AtomicBool>,
}

impl ExtractorHandle {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn send(&self, cmd: Command) -> Result<(), SendError<Command>> {
        self.tx.send(cmd)
    }
}

/// Clears the running flag on every exit path, panics included.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Start a worker for one target. Commands are dispatched off the worker
/// thread so a Busy rejection never waits on the extraction itself.
pub fn spawn(
    spec: &'static BetPageSpec,
    sources: SourceFactory,
    progress: ProgressFactory,
) -> ExtractorHandle {
    let (tx, rx) = mpsc::channel::<Command>();
    let alive = Arc::new(AtomicBool::new(true));
    let alive_flag = Arc::clone(&alive);

    thread::spawn(move || {
        let running = Arc::new(AtomicBool::new(false));

        while let Ok(cmd) = rx.recv() {
            let Command::Extract { start, end, export, reply } = cmd;

            if running
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                logd!("Extract: command rejected, already in progress");
                let _ = reply.send(Reply::Busy);
                continue;
            }

            let guard = RunningGuard(Arc::clone(&running));
            let sources = Arc::clone(&sources);
            let progress = Arc::clone(&progress);

            thread::spawn(move || {
                let _guard = guard;
                let outcome = run_one(spec, &sources, &progress, start, end, &export);
                let _ = reply.send(outcome);
            });
        }

        alive_flag.store(false, Ordering::SeqCst);
    });

    ExtractorHandle { tx, alive }
}

fn run_one(
    spec: &'static BetPageSpec,
    sources: &SourceFactory,
    progress: &ProgressFactory,
    start: NaiveDate,
    end: NaiveDate,
    export: &ExportOptions,
) -> Reply {
    let Some(window) = DateWindow::new(start, end) else {
        return Reply::Failed(s!("start date is after end date"));
    };

    let mut source = match sources() {
        Ok(s) => s,
        Err(e) => {
            loge!("Extract: target unreachable: {e}");
            return Reply::Failed(format!("target page unreachable: {e}"));
        }
    };

    let mut progress = progress();
    let mut session = Session::new();

    match session.run(&mut *source, &window, spec, Some(&mut *progress)) {
        Ok(mut extraction) => {
            if extraction.is_empty() {
                logf!("Extract: no bets in window");
                return Reply::Empty;
            }
            match extraction.export(export, &window) {
                Ok(Some(path)) => Reply::Done {
                    count: extraction.count(),
                    pages: extraction.pages,
                    path,
                },
                // A fresh extraction always delivers; treat a suppressed
                // write as a failure so the caller is not told "exported".
                Ok(None) => Reply::Failed(s!("export already delivered")),
                Err(e) => {
                    loge!("Extract: export failed: {e}");
                    Reply::Failed(format!("export failed: {e}"))
                }
            }
        }
        Err(e) => {
            loge!("Extract: aborted: {e}");
            Reply::Failed(e.to_string())
        }
    }
}
