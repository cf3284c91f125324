#![forbid(unsafe_code)]

//! Style a draggable item applies to its element.

use std::fmt;

use dnd_core::geometry::Translate;
use dnd_runtime::config::{DEFAULT_DEPTH_BIAS, DragConfig};

/// Whether the element receives pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerEvents {
    #[default]
    Auto,
    /// The element is transparent to hit-testing, so targets underneath
    /// receive the release.
    None,
}

impl PointerEvents {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
        }
    }
}

/// Stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZIndex {
    #[default]
    Auto,
    Elevated(i32),
}

impl fmt::Display for ZIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Elevated(z) => write!(f, "{z}"),
        }
    }
}

/// Computed style of a draggable item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStyle {
    pub translate: Translate,
    /// Z component of the translation.
    pub depth: f64,
    pub pointer_events: PointerEvents,
    pub z_index: ZIndex,
}

impl Default for DragStyle {
    fn default() -> Self {
        Self {
            translate: Translate::ZERO,
            depth: DEFAULT_DEPTH_BIAS,
            pointer_events: PointerEvents::Auto,
            z_index: ZIndex::Auto,
        }
    }
}

impl DragStyle {
    /// Style of an item at rest.
    #[must_use]
    pub fn resting(config: &DragConfig) -> Self {
        Self {
            depth: config.depth_bias,
            ..Self::default()
        }
    }

    /// Style of the item being dragged, offset by `translate`.
    #[must_use]
    pub fn lifted(config: &DragConfig, translate: Translate) -> Self {
        Self {
            translate,
            depth: config.depth_bias,
            pointer_events: PointerEvents::None,
            z_index: ZIndex::Elevated(config.elevated_z_index),
        }
    }

    /// Inline CSS declaration block.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "transform: translate3d({}px, {}px, {}px); pointer-events: {}; z-index: {}",
            self.translate.x,
            self.translate.y,
            self.depth,
            self.pointer_events.as_css(),
            self.z_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_css() {
        let style = DragStyle::resting(&DragConfig::default());
        assert_eq!(
            style.to_css(),
            "transform: translate3d(0px, 0px, 0.1px); pointer-events: auto; z-index: auto"
        );
    }

    #[test]
    fn lifted_css() {
        let style = DragStyle::lifted(&DragConfig::default(), Translate::new(-12.5, 30.0));
        assert_eq!(
            style.to_css(),
            "transform: translate3d(-12.5px, 30px, 0.1px); pointer-events: none; z-index: 9999"
        );
    }

    #[test]
    fn lifted_uses_configured_z_index() {
        let config = DragConfig::default().with_elevated_z_index(50);
        let style = DragStyle::lifted(&config, Translate::ZERO);
        assert_eq!(style.z_index, ZIndex::Elevated(50));
    }
}
