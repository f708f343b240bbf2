//! Anchor geometry and resting positions
//!
//! All Y values are in the element's own position space: the same space the
//! host uses for the element's `y` property, with the origin at the top of the
//! content area.

/// Screen edge the control is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorEdge {
    Top,
    /// Bottom edge (default, the usual floating action button placement)
    #[default]
    Bottom,
}

/// Anchor configuration, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorConfig {
    pub edge: AnchorEdge,
    /// Layout margin on the anchored edge
    pub margin: i32,
    /// Padding on the anchored edge
    pub padding: i32,
}

impl AnchorConfig {
    pub fn new(edge: AnchorEdge, margin: i32, padding: i32) -> Self {
        Self {
            edge,
            margin,
            padding,
        }
    }

    /// Anchor to the top edge
    pub fn top(margin: i32) -> Self {
        Self::new(AnchorEdge::Top, margin, 0)
    }

    /// Anchor to the bottom edge
    pub fn bottom(margin: i32) -> Self {
        Self::new(AnchorEdge::Bottom, margin, 0)
    }

    /// Set the padding on the anchored edge
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Distance kept between the element and its anchored edge when shown
    pub fn offset(&self) -> i32 {
        self.margin + self.padding
    }
}

/// Container metrics the control is positioned against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerBounds {
    /// Usable container height in element coordinates
    pub height: i32,
    /// Height of the system status bar above the container
    pub status_bar_inset: i32,
}

impl ContainerBounds {
    pub fn new(height: i32, status_bar_inset: i32) -> Self {
        Self {
            height,
            status_bar_inset,
        }
    }
}

/// Measured size of the control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementGeometry {
    pub height: i32,
}

impl ElementGeometry {
    pub fn new(height: i32) -> Self {
        Self { height }
    }
}

/// The two resting Y offsets of the control
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionTargets {
    pub shown_y: f32,
    pub hidden_y: f32,
}

impl PositionTargets {
    /// Resting offset for a visibility state
    pub fn resting_y(&self, hidden: bool) -> f32 {
        if hidden {
            self.hidden_y
        } else {
            self.shown_y
        }
    }
}

/// Computes resting positions from anchor, element size and container.
///
/// Pure; callers refresh `bounds` on rotation or resize before calling.
pub struct PositionCalculator;

impl PositionCalculator {
    /// Offset at which the control is entirely out of view
    pub fn hidden_y(anchor: &AnchorConfig, bounds: &ContainerBounds) -> f32 {
        match anchor.edge {
            AnchorEdge::Top => 0.0,
            AnchorEdge::Bottom => bounds.height as f32,
        }
    }

    /// Offset at which the control rests while visible
    pub fn shown_y(anchor: &AnchorConfig, element_height: i32, bounds: &ContainerBounds) -> f32 {
        match anchor.edge {
            AnchorEdge::Top => (element_height + anchor.offset()) as f32,
            AnchorEdge::Bottom => (bounds.height - element_height - anchor.offset()) as f32,
        }
    }

    /// Both resting offsets
    pub fn compute_targets(
        anchor: &AnchorConfig,
        element_height: i32,
        bounds: &ContainerBounds,
    ) -> PositionTargets {
        PositionTargets {
            shown_y: Self::shown_y(anchor, element_height, bounds),
            hidden_y: Self::hidden_y(anchor, bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_anchor_targets() {
        let targets = PositionCalculator::compute_targets(
            &AnchorConfig::bottom(16),
            56,
            &ContainerBounds::new(800, 0),
        );
        assert_eq!(targets.hidden_y, 800.0);
        assert_eq!(targets.shown_y, 728.0);
    }

    #[test]
    fn test_bottom_anchor_identity() {
        let bounds = ContainerBounds::new(1920, 63);
        for (height, margin) in [(56, 16), (40, 0), (96, 24), (0, 8)] {
            let targets =
                PositionCalculator::compute_targets(&AnchorConfig::bottom(margin), height, &bounds);
            assert_eq!(
                targets.shown_y + height as f32 + margin as f32,
                bounds.height as f32
            );
            assert_eq!(targets.hidden_y, bounds.height as f32);
        }
    }

    #[test]
    fn test_top_anchor_targets() {
        let targets = PositionCalculator::compute_targets(
            &AnchorConfig::top(16),
            56,
            &ContainerBounds::new(800, 24),
        );
        assert_eq!(targets.hidden_y, 0.0);
        assert_eq!(targets.shown_y, 72.0);
    }

    #[test]
    fn test_padding_adds_to_margin() {
        let anchor = AnchorConfig::bottom(16).with_padding(8);
        assert_eq!(anchor.offset(), 24);

        let targets =
            PositionCalculator::compute_targets(&anchor, 56, &ContainerBounds::new(800, 0));
        assert_eq!(targets.shown_y, 720.0);
    }

    #[test]
    fn test_compute_targets_is_deterministic() {
        let anchor = AnchorConfig::bottom(12);
        let bounds = ContainerBounds::new(640, 0);
        let a = PositionCalculator::compute_targets(&anchor, 48, &bounds);
        let b = PositionCalculator::compute_targets(&anchor, 48, &bounds);
        assert_eq!(a, b);
    }

    #[test]
    fn test_resting_y() {
        let targets = PositionTargets {
            shown_y: 728.0,
            hidden_y: 800.0,
        };
        assert_eq!(targets.resting_y(true), 800.0);
        assert_eq!(targets.resting_y(false), 728.0);
    }
}
