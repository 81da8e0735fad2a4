// src/scrape/mod.rs
mod live;
mod record;
mod session;
mod source;
mod worker;

pub use live::LiveSource;
pub use record::EXPORT_HEADER;
pub use session::{DateWindow, Extraction, Phase, Session};
pub use source::{PageSource, RawEntry, SourceFactory};
pub use worker::{spawn, Command, ExtractorHandle, Reply};
