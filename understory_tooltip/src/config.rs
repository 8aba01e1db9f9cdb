// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip timing and sizing configuration.

/// Externally supplied tooltip configuration.
///
/// Durations are in milliseconds, sizes in pixels. The values are read-only
/// to the tooltip machinery once a [`TooltipManager`](crate::TooltipManager)
/// is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TooltipConfig {
    /// Delay before a tooltip opens (default: 750).
    pub open_delay: u32,
    /// Delay before a tooltip opens shortly after another one closed (default: 100).
    pub quick_open_delay: u32,
    /// How long after a close [`quick_open_delay`](Self::quick_open_delay)
    /// applies (default: 1000).
    pub quick_open_timeout: u32,
    /// How long a tooltip stays up after a hide request (default: 300).
    pub close_timeout: u32,
    /// Maximum overlay width before content is wrapped (default: 500).
    pub max_width: u32,
    /// Minimum distance kept from the viewport edges (default: 4).
    pub margin: u32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            open_delay: 750,
            quick_open_delay: 100,
            quick_open_timeout: 1000,
            close_timeout: 300,
            max_width: 500,
            margin: 4,
        }
    }
}

/// Errors reported by [`TooltipConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max_width` is zero.
    #[error("tooltip max_width must be greater than zero")]
    ZeroMaxWidth,
    /// The margins on both sides leave no room for content.
    #[error("tooltip margin {margin}px leaves no room within max_width {max_width}px")]
    MarginTooLarge {
        /// Configured margin.
        margin: u32,
        /// Configured maximum width.
        max_width: u32,
    },
}

impl TooltipConfig {
    /// Set the open delay.
    #[must_use]
    pub fn open_delay(mut self, ms: u32) -> Self {
        self.open_delay = ms;
        self
    }

    /// Set the quick open delay.
    #[must_use]
    pub fn quick_open_delay(mut self, ms: u32) -> Self {
        self.quick_open_delay = ms;
        self
    }

    /// Set the quick open timeout.
    #[must_use]
    pub fn quick_open_timeout(mut self, ms: u32) -> Self {
        self.quick_open_timeout = ms;
        self
    }

    /// Set the close timeout.
    #[must_use]
    pub fn close_timeout(mut self, ms: u32) -> Self {
        self.close_timeout = ms;
        self
    }

    /// Set the maximum width.
    #[must_use]
    pub fn max_width(mut self, px: u32) -> Self {
        self.max_width = px;
        self
    }

    /// Set the viewport margin.
    #[must_use]
    pub fn margin(mut self, px: u32) -> Self {
        self.margin = px;
        self
    }

    /// Check that the sizes leave room for content.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::ZeroMaxWidth);
        }
        if u64::from(self.margin) * 2 >= u64::from(self.max_width) {
            return Err(ConfigError::MarginTooLarge {
                margin: self.margin,
                max_width: self.max_width,
            });
        }
        Ok(())
    }
}
