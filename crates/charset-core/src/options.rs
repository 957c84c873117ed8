//! Audit options shared by the detectors and the command-line front end.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::document::WINDOW_BYTES;
use crate::error::{AuditError, Result};

/// All options controlling a charset audit.
///
/// Loaded from TOML config files by the binary; every field falls back to its
/// default when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditOptions {
    // -- General --
    pub verbose: u8,

    // -- Detection --
    /// Number of leading transfer bytes the meta scanner may inspect.
    pub window_bytes: usize,

    // -- Input --
    /// Label of the encoding the document text was decoded from, used to
    /// recover transfer byte offsets. `None` means UTF-8.
    pub transfer_encoding: Option<String>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            window_bytes: WINDOW_BYTES,
            transfer_encoding: None,
        }
    }
}

impl AuditOptions {
    /// Reject option combinations that cannot produce a meaningful audit.
    pub fn validate(&self) -> Result<()> {
        if self.window_bytes == 0 {
            return Err(AuditError::Config(
                "window_bytes must be greater than zero".to_string(),
            ));
        }
        self.encoding()?;
        Ok(())
    }

    /// Resolve `transfer_encoding` to a WHATWG encoding.
    pub fn encoding(&self) -> Result<&'static Encoding> {
        match self.transfer_encoding.as_deref() {
            None => Ok(encoding_rs::UTF_8),
            Some(label) => Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                AuditError::Encoding(format!("unknown encoding label '{}'", label))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = AuditOptions::default();
        assert_eq!(opts.window_bytes, 1024);
        assert_eq!(opts.encoding().unwrap(), encoding_rs::UTF_8);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let opts: AuditOptions = toml::from_str("transfer_encoding = \"latin1\"").unwrap();
        assert_eq!(opts.window_bytes, 1024);
        assert_eq!(opts.encoding().unwrap(), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let opts = AuditOptions {
            window_bytes: 0,
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(AuditError::Config(_))));

        let opts = AuditOptions {
            transfer_encoding: Some("klingon".to_string()),
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(AuditError::Encoding(_))));
    }
}
