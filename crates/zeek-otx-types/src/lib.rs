//! Core types for the zeek-otx intel feed client.
//!
//! This crate provides the fundamental data structures used throughout
//! zeek-otx:
//!
//! - [`Pulse`] - A threat-intelligence bundle published by the OTXv2 feed
//! - [`Indicator`] - A single atomic threat artifact within a pulse
//! - [`PulsePage`] - One page of the paginated subscribed-pulses endpoint
//! - [`IntelType`] - The Zeek Intel Framework type vocabulary
//! - [`map_indicator_type`] - OTXv2 to Zeek indicator type mapping

#![doc(issue_tracker_base_url = "https://github.com/zeek-otx/zeek-otx-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod intel;
mod pulse;

pub use error::{OtxError, Result};
pub use intel::{IntelType, map_indicator_type};
pub use pulse::{Indicator, Pulse, PulsePage};
