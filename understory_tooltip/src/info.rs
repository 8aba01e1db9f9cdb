// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content values.

use alloc::string::String;

/// Content shown by the tooltip overlay.
///
/// Both fields may carry markup; the crate never interprets it and hands the
/// text to the [`OverlaySurface`](crate::OverlaySurface) as-is.
///
/// A `TooltipInfo` is produced fresh for every show and never mutated in place
/// by this crate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TooltipInfo {
    /// Descriptive text. Empty means "no description".
    pub message: String,
    /// Optional error decoration shown above the description.
    pub error_message: Option<String>,
}

impl TooltipInfo {
    /// Create a tooltip with a description and no error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_message: None,
        }
    }

    /// Create a tooltip that only carries an error.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            message: String::new(),
            error_message: Some(error.into()),
        }
    }

    /// Attach an error decoration.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error_message = Some(error.into());
        self
    }

    /// Returns `true` if there is anything to show.
    ///
    /// A present error counts as content even when its text is empty.
    #[must_use]
    pub fn has_message(&self) -> bool {
        !self.message.is_empty() || self.error_message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_info_has_no_message() {
        assert!(!TooltipInfo::default().has_message());
        assert!(!TooltipInfo::new("").has_message());
    }

    #[test]
    fn message_or_error_counts_as_content() {
        assert!(TooltipInfo::new("Save").has_message());
        assert!(TooltipInfo::error("Required").has_message());
        assert!(TooltipInfo::error("").has_message());
        assert!(TooltipInfo::new("").with_error("x").has_message());
    }
}
