//! Packet codec configuration

/// Packet encoder configuration
///
/// # Example
///
/// ```
/// use fidopkt::CodecConfig;
///
/// // Default: oversized fields are cut to their maximum size
/// let config = CodecConfig::default();
/// assert!(config.truncate_oversized_fields);
///
/// // Strict: oversized fields fail the encode
/// let config = CodecConfig::strict();
/// assert!(!config.truncate_oversized_fields);
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    /// Truncate variable fields longer than their declared maximum
    ///
    /// When `false`, encoding such a field fails with
    /// [`PktError::FieldTooLarge`](crate::PktError::FieldTooLarge).
    ///
    /// Default: `true`
    #[cfg_attr(feature = "serde", serde(default = "default_truncate"))]
    pub truncate_oversized_fields: bool,
}

#[cfg(feature = "serde")]
fn default_truncate() -> bool {
    true
}

impl CodecConfig {
    /// Configuration that rejects oversized fields instead of truncating them
    pub fn strict() -> Self {
        Self {
            truncate_oversized_fields: false,
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            truncate_oversized_fields: true,
        }
    }
}
