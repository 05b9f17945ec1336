//! Zeek Intel file record formatting.

use std::io::{self, Write};
use zeek_otx_types::IntelType;

/// Zeek Intel file header line.
pub const INTEL_HEADER: &str =
    "#fields\tindicator\tindicator_type\tmeta.source\tmeta.url\tmeta.do_notice\tmeta.if_in\n";

/// Producer name written into every record description.
pub const SOURCE_NAME: &str = "AlienVault OTXv2";

/// Fallback `meta.url` for pulses that carry no references.
pub const FALLBACK_URL: &str = "https://otx.alienvault.com";

/// Constant `meta.if_in` column.
pub const IF_IN: &str = "-";

/// One line of a Zeek Intel file.
///
/// Field values never contain a literal tab: the file format is
/// tab-delimited, so [`IntelRecord::new`] replaces embedded tabs with a
/// single space at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntelRecord {
    /// Indicator value. For [`IntelType::Url`] the scheme prefix is
    /// stripped; the downstream consumer expects bare URLs.
    pub indicator: String,
    /// Zeek intel type.
    pub intel_type: IntelType,
    /// Human-readable description shown in notices.
    pub description: String,
    /// Reference URL.
    pub url: String,
    /// `meta.do_notice` value, passed through from configuration.
    pub do_notice: String,
}

impl IntelRecord {
    /// Creates a record, sanitizing every field for the tab-delimited
    /// format and stripping the scheme from URL indicators.
    #[must_use]
    pub fn new(
        indicator: &str,
        intel_type: IntelType,
        description: &str,
        url: &str,
        do_notice: &str,
    ) -> Self {
        let indicator = if intel_type == IntelType::Url {
            strip_scheme(indicator)
        } else {
            indicator
        };

        Self {
            indicator: sanitize(indicator),
            intel_type,
            description: sanitize(description),
            url: sanitize(url),
            do_notice: sanitize(do_notice),
        }
    }

    /// Writes the record as one tab-delimited line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.indicator,
            self.intel_type.zeek_name(),
            self.description,
            self.url,
            self.do_notice,
            IF_IN
        )
    }
}

/// Replaces literal tabs with a single space.
///
/// Zeek throws errors on tabs inside intel fields, so every field value is
/// passed through here before it reaches the file.
fn sanitize(field: &str) -> String {
    field.replace('\t', " ")
}

/// Strips the `<scheme>://` prefix from a URL indicator value.
///
/// Values without a recognizable scheme are returned unchanged.
#[must_use]
pub fn strip_scheme(value: &str) -> &str {
    match value.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            rest
        }
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_line() {
        let record = IntelRecord::new(
            "1.2.3.4",
            IntelType::Addr,
            "AlienVault OTXv2 - P1 ID: 42 Author: A",
            "https://otx.alienvault.com",
            "T",
        );

        let mut out = Vec::new();
        record.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1.2.3.4\tIntel::ADDR\tAlienVault OTXv2 - P1 ID: 42 Author: A\thttps://otx.alienvault.com\tT\t-\n"
        );
    }

    #[test]
    fn test_url_scheme_stripped() {
        let record = IntelRecord::new("https://example.com/a", IntelType::Url, "d", "u", "T");
        assert_eq!(record.indicator, "example.com/a");
        assert_eq!(record.intel_type, IntelType::Url);
    }

    #[test]
    fn test_scheme_kept_for_non_url_types() {
        let record = IntelRecord::new("https://example.com/a", IntelType::Domain, "d", "u", "T");
        assert_eq!(record.indicator, "https://example.com/a");
    }

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("https://example.com/a"), "example.com/a");
        assert_eq!(strip_scheme("http://example.com"), "example.com");
        assert_eq!(strip_scheme("ftp://x/y"), "x/y");
        assert_eq!(strip_scheme("example.com/a"), "example.com/a");
        assert_eq!(strip_scheme("://example.com"), "://example.com");
    }

    #[test]
    fn test_tabs_sanitized_in_every_field() {
        let record = IntelRecord::new(
            "1.2.3.4\tbad",
            IntelType::Addr,
            "desc\twith\ttabs",
            "https://x\t/y",
            "T\t",
        );

        let mut out = Vec::new();
        record.write_to(&mut out).unwrap();
        let line = String::from_utf8(out).unwrap();

        // Exactly the five field separators, nothing more
        assert_eq!(line.matches('\t').count(), 5);
        assert_eq!(record.description, "desc with tabs");
    }

    #[test]
    fn test_header_is_bit_exact() {
        assert_eq!(
            INTEL_HEADER.as_bytes(),
            b"#fields\tindicator\tindicator_type\tmeta.source\tmeta.url\tmeta.do_notice\tmeta.if_in\n"
        );
    }
}
