use crate::ConfigError;

/// Largest snapshot a tree-sitter host hands to `serialize`.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Scanner options fixed for the lifetime of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    list_marker: char,
    track_context: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            list_marker: '-',
            track_context: true,
        }
    }
}

impl ScannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Character that opens a list item in the host grammar.
    ///
    /// Whitespace and line breaks are rejected: the measurer consumes them,
    /// so the scanner would never see one at the decision point.
    pub fn with_list_marker(mut self, marker: char) -> Result<Self, ConfigError> {
        if matches!(marker, ' ' | '\t' | '\n' | '\r') {
            return Err(ConfigError::InvalidListMarker(marker));
        }
        self.list_marker = marker;
        Ok(self)
    }

    /// Without context tracking every level is `Normal` and snapshots
    /// store widths only.
    pub fn with_context_tracking(mut self, enabled: bool) -> Self {
        self.track_context = enabled;
        self
    }

    pub fn list_marker(&self) -> char {
        self.list_marker
    }

    pub fn tracks_context(&self) -> bool {
        self.track_context
    }

    pub fn record_layout(&self) -> RecordLayout {
        if self.track_context {
            RecordLayout::WidthAndContext
        } else {
            RecordLayout::WidthOnly
        }
    }
}

/// Shape of one snapshot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// `width: u32`
    WidthOnly,
    /// `width: u32, context: u32`
    WidthAndContext,
}

impl RecordLayout {
    pub fn record_size(self) -> usize {
        match self {
            RecordLayout::WidthOnly => 4,
            RecordLayout::WidthAndContext => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.list_marker(), '-');
        assert!(config.tracks_context());
        assert_eq!(config.record_layout().record_size(), 8);
    }

    #[test]
    fn test_custom_list_marker() {
        let config = ScannerConfig::new().with_list_marker('*').unwrap();
        assert_eq!(config.list_marker(), '*');
    }

    #[test]
    fn test_whitespace_list_marker_rejected() {
        for marker in [' ', '\t', '\n', '\r'] {
            assert_eq!(
                ScannerConfig::new().with_list_marker(marker),
                Err(ConfigError::InvalidListMarker(marker))
            );
        }
    }

    #[test]
    fn test_width_only_layout() {
        let config = ScannerConfig::new().with_context_tracking(false);
        assert_eq!(config.record_layout(), RecordLayout::WidthOnly);
        assert_eq!(config.record_layout().record_size(), 4);
    }
}
