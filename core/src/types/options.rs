/// Configuration for metadata extraction
///
/// # Example
///
/// ```
/// use dicommeta_core::ExtractorOptions;
///
/// let options = ExtractorOptions::default()
///     .with_trace_raw_bytes(true)
///     .with_force_element_offset(true);
///
/// assert!(options.trace_raw_bytes);
/// assert!(options.force_element_offset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractorOptions {
    /// Log the raw bytes and decoded text of every field routed through
    /// the ISO 2022 decoder (debug level)
    pub trace_raw_bytes: bool,

    /// Skip the full-dataset parse and read every file through the
    /// element-offset layout
    pub force_element_offset: bool,
}

impl ExtractorOptions {
    /// Enables or disables raw byte tracing in the character-set decoder
    pub fn with_trace_raw_bytes(mut self, enabled: bool) -> Self {
        self.trace_raw_bytes = enabled;
        self
    }

    /// Enables or disables the element-offset-only mode
    pub fn with_force_element_offset(mut self, enabled: bool) -> Self {
        self.force_element_offset = enabled;
        self
    }
}
