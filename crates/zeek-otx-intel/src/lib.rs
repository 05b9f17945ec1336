//! Zeek Intel Framework output for zeek-otx.
//!
//! This crate provides the writing half of the pipeline:
//!
//! - [`IntelRecord`] - One tab-delimited intel file line
//! - [`IntelWriter`] - Header plus pulse-to-record expansion over any writer
//! - [`write_feed`] - Streams pulses into a staging file and atomically
//!   promotes it over the previous feed

#![doc(issue_tracker_base_url = "https://github.com/zeek-otx/zeek-otx-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod feed;
mod record;
mod writer;

pub use feed::{FeedSummary, IntelError, write_feed};
pub use record::{FALLBACK_URL, IF_IN, INTEL_HEADER, IntelRecord, SOURCE_NAME, strip_scheme};
pub use writer::IntelWriter;
