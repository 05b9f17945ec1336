//! Rust client for pulling AlienVault OTXv2 pulses into a Zeek Intel file.
//!
//! This is a facade crate that re-exports functionality from the zeek-otx
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use zeek_otx_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OtxClient::with_defaults()?;
//!     let pulses = pulse_stream(&client, "my-api-key", "2024-01-01T00:00:00");
//!     let summary = write_feed("otx.dat".as_ref(), "T", pulses).await?;
//!     println!("{} records written", summary.records);
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/zeek-otx/zeek-otx-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use zeek_otx_types::*;

// Re-export fetch functionality
pub use zeek_otx_fetch::{
    API_KEY_HEADER, ClientConfig, FetchError, OtxClient, PULSES_URL, pulse_stream,
    pulse_stream_with,
};

// Re-export intel output
pub use zeek_otx_intel::{
    FALLBACK_URL, FeedSummary, IF_IN, INTEL_HEADER, IntelError, IntelRecord, IntelWriter,
    SOURCE_NAME, strip_scheme, write_feed,
};

/// Prelude module for convenient imports.
///
/// ```
/// use zeek_otx_lib::prelude::*;
/// ```
pub mod prelude {
    pub use zeek_otx_types::{
        Indicator, IntelType, OtxError, Pulse, PulsePage, Result, map_indicator_type,
    };

    pub use zeek_otx_fetch::{ClientConfig, OtxClient, pulse_stream};

    pub use zeek_otx_intel::{FeedSummary, IntelError, IntelRecord, IntelWriter, write_feed};
}
