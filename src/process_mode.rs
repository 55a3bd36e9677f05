//! Processing modes understood by `waifu2x-converter-cpp`.
//!
//! The catalog is a fixed three-entry list in display order. It is built by
//! the main window and handed to each process dialog, which only needs it to
//! turn the `-m` value into a label.

use std::fmt;

use crate::error::{ConverterError, Result};

/// Which transformation(s) the converter applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMode {
    Scale,
    Noise,
    NoiseScale,
}

impl ProcessMode {
    /// Value passed to the converter's `-m` flag
    pub fn tag(self) -> &'static str {
        match self {
            ProcessMode::Scale => "scale",
            ProcessMode::Noise => "noise",
            ProcessMode::NoiseScale => "noise_scale",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessMode::Scale => "Upscale",
            ProcessMode::Noise => "Noise Reduction",
            ProcessMode::NoiseScale => "Upscale & Noise Reduction",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        ProcessMode::ALL.iter().copied().find(|m| m.tag() == tag)
    }

    /// Whether the noise level setting has any effect in this mode
    pub fn uses_noise(self) -> bool {
        self.tag().contains("noise")
    }

    /// Whether the scale ratio setting has any effect in this mode
    pub fn uses_scale(self) -> bool {
        self.tag().contains("scale")
    }

    pub const ALL: [ProcessMode; 3] = [
        ProcessMode::Scale,
        ProcessMode::Noise,
        ProcessMode::NoiseScale,
    ];
}

impl fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One selectable row: the tag sent to the converter and its display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeEntry {
    pub tag: String,
    pub label: String,
}

/// The list of processing modes shown in the mode selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessModeCatalog {
    entries: Vec<ModeEntry>,
}

impl Default for ProcessModeCatalog {
    fn default() -> Self {
        Self {
            entries: ProcessMode::ALL
                .iter()
                .map(|m| ModeEntry {
                    tag: m.tag().to_string(),
                    label: m.label().to_string(),
                })
                .collect(),
        }
    }
}

impl ProcessModeCatalog {
    pub fn entries(&self) -> &[ModeEntry] {
        &self.entries
    }

    /// Resolve a tag to its label. Tags are matched exactly.
    pub fn label_for(&self, tag: &str) -> Result<&str> {
        self.entries
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.label.as_str())
            .ok_or_else(|| ConverterError::ModeNotFound(tag.to_string()))
    }

    /// Label for display, falling back to the raw tag for unknown modes
    pub fn display_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.label_for(tag).unwrap_or(tag)
    }

    /// Position of a tag in the list, used to restore the saved selection
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_scale_noise_then_both() {
        let catalog = ProcessModeCatalog::default();
        let tags: Vec<&str> = catalog.entries().iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["scale", "noise", "noise_scale"]);
    }

    #[test]
    fn label_lookup_hits_every_known_tag() {
        let catalog = ProcessModeCatalog::default();
        assert_eq!(catalog.label_for("noise").unwrap(), "Noise Reduction");
        assert_eq!(catalog.label_for("scale").unwrap(), "Upscale");
        assert_eq!(catalog.label_for("noise_scale").unwrap(), "Upscale & Noise Reduction");
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let catalog = ProcessModeCatalog::default();
        match catalog.label_for("Noise") {
            Err(ConverterError::ModeNotFound(tag)) => assert_eq!(tag, "Noise"),
            other => panic!("expected ModeNotFound, got {:?}", other),
        }
        assert_eq!(catalog.display_label("Noise"), "Noise");
    }

    #[test]
    fn widget_enablement_follows_mode() {
        assert!(ProcessMode::Noise.uses_noise());
        assert!(!ProcessMode::Noise.uses_scale());
        assert!(ProcessMode::Scale.uses_scale());
        assert!(!ProcessMode::Scale.uses_noise());
        assert!(ProcessMode::NoiseScale.uses_noise() && ProcessMode::NoiseScale.uses_scale());
    }

    #[test]
    fn tags_round_trip_through_from_tag() {
        for mode in ProcessMode::ALL {
            assert_eq!(ProcessMode::from_tag(mode.tag()), Some(mode));
        }
        assert_eq!(ProcessMode::from_tag("both"), None);
    }

    #[test]
    fn index_of_restores_selection() {
        let catalog = ProcessModeCatalog::default();
        assert_eq!(catalog.index_of("noise_scale"), Some(2));
        assert_eq!(catalog.index_of("missing"), None);
    }
}
