//! HTTP client and paginated pulse retrieval for zeek-otx.
//!
//! This crate provides the retrieval half of the pipeline:
//!
//! - [`OtxClient`] - HTTP client with timeouts and bounded retries
//! - [`OtxClient::fetch_page`] - One page of the subscribed-pulses endpoint
//! - [`pulse_stream`] - Lazy, single-pass stream over all matching pulses

#![doc(issue_tracker_base_url = "https://github.com/zeek-otx/zeek-otx-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod stream;

pub use client::{API_KEY_HEADER, ClientConfig, FetchError, OtxClient, PULSES_URL};
pub use stream::{pulse_stream, pulse_stream_with};
