#![forbid(unsafe_code)]

//! Class edits applied to carousel clones.
//!
//! A clone is a deep copy of an original card. It must carry the clone
//! marker, be visible from the start, and never be picked up by the reveal
//! observer.

use loopdeck_core::RevealConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneMarkers {
    add: Vec<String>,
    remove: Vec<String>,
}

impl CloneMarkers {
    #[must_use]
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            add: vec![config.clone_class.clone(), config.visible_class.clone()],
            remove: vec![config.reveal_class.clone()],
        }
    }

    /// Rewrite a `class` attribute value for a clone.
    ///
    /// Existing tokens keep their order; duplicates collapse the way
    /// `classList` does.
    #[must_use]
    pub fn rewrite(&self, class_attr: &str) -> String {
        let mut tokens: Vec<&str> = Vec::new();
        let kept = class_attr
            .split_whitespace()
            .filter(|t| !self.remove.iter().any(|r| r == t));
        for token in kept.chain(self.add.iter().map(String::as_str)) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        tokens.join(" ")
    }

    /// Whether `class_attr` already marks a clone.
    #[must_use]
    pub fn is_clone(&self, class_attr: &str) -> bool {
        let Some(marker) = self.add.first() else {
            return false;
        };
        class_attr.split_whitespace().any(|t| t == marker)
    }
}

impl Default for CloneMarkers {
    fn default() -> Self {
        Self::new(&RevealConfig::default())
    }
}
