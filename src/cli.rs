// src/cli.rs
use std::{env, error::Error};

use chrono::NaiveDate;

use crate::config::options::ExportOptions;
use crate::controller::{Controller, StartError, TabId};
use crate::progress::{Progress, ProgressFactory};
use crate::scrape::{LiveSource, PageSource, SourceFactory};
use crate::specs::STAKE_ESPORTS;
use std::sync::Arc;

const LIVE_TAB: TabId = TabId(0);

struct Params {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    out: Option<String>,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_cli()?;

    let start = params.start.ok_or("Missing --start (see --help)")?;
    let end = params.end.unwrap_or(start); // single-day extraction

    let mut export = ExportOptions::default();
    if let Some(out) = &params.out {
        export.set_path(out);
    }

    let mut controller = Controller::new(&STAKE_ESPORTS);
    controller.register_tab(LIVE_TAB, live_sources(), cli_progress());

    match controller.start_extraction(LIVE_TAB, start, end, &export) {
        Ok(summary) => {
            println!(
                "Extracted {} bets across {} pages → {}",
                summary.count,
                summary.pages,
                summary.path.display()
            );
            Ok(())
        }
        // Clean run with nothing in the window; not a failure exit.
        Err(StartError::NoRecords) => {
            println!("No bets found between {start} and {end}.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn live_sources() -> SourceFactory {
    Arc::new(|| LiveSource::open(&STAKE_ESPORTS).map(|s| Box::new(s) as Box<dyn PageSource>))
}

struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn page_done(&mut self, page: usize, matched: usize, seen: usize) {
        eprintln!("Page {page}: {matched} matched of {seen} entries");
    }
    fn finish(&mut self) {
        eprintln!("Scan complete");
    }
}

fn cli_progress() -> ProgressFactory {
    Arc::new(|| Box::new(CliProgress) as Box<dyn Progress>)
}

fn parse_cli() -> Result<Params, Box<dyn Error>> {
    let mut params = Params { start: None, end: None, out: None };

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-s" | "--start" => {
                let v = args.next().ok_or("Missing value for --start")?;
                params.start = Some(parse_date(&v)?);
            }
            "-e" | "--end" => {
                let v = args.next().ok_or("Missing value for --end")?;
                params.end = Some(parse_date(&v)?);
            }
            "-o" | "--out" => params.out = Some(args.next().ok_or("Missing output path")?),
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(params)
}

fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn Error>> {
    s.parse()
        .map_err(|_| format!("Invalid date '{s}' (expected YYYY-MM-DD)").into())
}
