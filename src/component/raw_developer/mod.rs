//! RAW 顯像元件
//!
//! 收集 RAW 檔案，呼叫 dcraw_emu 轉成 TIFF，再用 exiftool 複製 EXIF

mod collection;
mod error;
mod main;
mod pipeline;
mod record;
mod worker;

pub use collection::RawFileCollection;
pub use error::DevelopError;
pub use main::{RawDeveloper, parse_dropped_paths};
pub use pipeline::ConversionPipeline;
pub use record::{BatchSummary, ConversionRecord, ConversionStatus, DevelopBatch, DevelopEvent};
pub use worker::run_batch;
