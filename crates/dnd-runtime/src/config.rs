#![forbid(unsafe_code)]

//! Drag configuration.
//!
//! [`DragConfig`] collects the handful of tunables the coordinator and the
//! item binding read. `DragConfig::default()` reproduces the stock behavior:
//! left button starts a drag, the dragged element is lifted to z-index 9999,
//! and the translation carries a 0.1px depth bias so hosts promote it to its
//! own compositing layer.
//!
//! # Loading
//!
//! With the `config` feature the config can be loaded from TOML:
//!
//! ```toml
//! activation_button = "left"
//! elevated_z_index = 5000
//! depth_bias = 0.1
//! ```
//!
//! ```rust,ignore
//! let config = DragConfig::from_toml_file("dnd.toml")?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use dnd_core::event::PointerButton;

/// Default stacking order for the element being dragged.
pub const DEFAULT_ELEVATED_Z_INDEX: i32 = 9999;

/// Default z component of the drag translation, in pixels.
pub const DEFAULT_DEPTH_BIAS: f64 = 0.1;

/// Tunables for drag coordination and item styling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DragConfig {
    /// Button that picks an item up. Any other button is ignored.
    pub activation_button: PointerButton,

    /// Stacking order applied to the active item.
    pub elevated_z_index: i32,

    /// Z component of the active item's translation.
    pub depth_bias: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Left,
            elevated_z_index: DEFAULT_ELEVATED_Z_INDEX,
            depth_bias: DEFAULT_DEPTH_BIAS,
        }
    }
}

impl DragConfig {
    /// Set the activation button.
    #[must_use]
    pub const fn with_activation_button(mut self, button: PointerButton) -> Self {
        self.activation_button = button;
        self
    }

    /// Set the elevated z-index.
    #[must_use]
    pub const fn with_elevated_z_index(mut self, z_index: i32) -> Self {
        self.elevated_z_index = z_index;
        self
    }

    /// Load from a TOML string. The result is validated.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, DragConfigError> {
        let config: Self = toml::from_str(s).map_err(DragConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk. The result is validated.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.elevated_z_index <= 0 {
            errors.push(format!(
                "elevated_z_index must be > 0, got {}",
                self.elevated_z_index
            ));
        }

        if !self.depth_bias.is_finite() {
            errors.push(format!(
                "depth_bias must be finite, got {}",
                self.depth_bias
            ));
        }

        errors
    }

    /// Return `self` if valid, otherwise a [`DragConfigError::Validation`].
    pub fn validated(self) -> Result<Self, DragConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DragConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a drag configuration.
#[derive(Debug)]
pub enum DragConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for DragConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for DragConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
