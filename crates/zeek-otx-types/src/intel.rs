//! Zeek Intel Framework type vocabulary and the OTXv2 type mapping.

use serde::{Deserialize, Serialize};

/// Zeek Intel Framework indicator type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntelType {
    /// An IP address (`Intel::ADDR`).
    Addr,
    /// A domain or host name (`Intel::DOMAIN`).
    Domain,
    /// An email address (`Intel::EMAIL`).
    Email,
    /// A URL, written without its scheme (`Intel::URL`).
    Url,
    /// A file hash (`Intel::FILE_HASH`).
    FileHash,
}

impl IntelType {
    /// Returns the type name as it appears in the intel file.
    #[must_use]
    pub const fn zeek_name(&self) -> &'static str {
        match self {
            Self::Addr => "Intel::ADDR",
            Self::Domain => "Intel::DOMAIN",
            Self::Email => "Intel::EMAIL",
            Self::Url => "Intel::URL",
            Self::FileHash => "Intel::FILE_HASH",
        }
    }
}

impl std::fmt::Display for IntelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.zeek_name())
    }
}

/// Maps an OTXv2 indicator type code to a Zeek Intel Framework type.
///
/// The table is fixed: codes not listed here are unsupported by the Zeek
/// intel file format and must be skipped without error, not reported.
#[must_use]
pub fn map_indicator_type(kind: &str) -> Option<IntelType> {
    match kind {
        "IPv4" | "IPv6" => Some(IntelType::Addr),
        "domain" | "hostname" => Some(IntelType::Domain),
        "email" => Some(IntelType::Email),
        "URL" | "URI" => Some(IntelType::Url),
        "FileHash-MD5" | "FileHash-SHA1" | "FileHash-SHA256" => Some(IntelType::FileHash),
        _ => None,
    }
}
