//! Host configuration snapshots and change detection
//!
//! The host reports its display configuration on attach and whenever it
//! changes. Only changes that move the container edges invalidate the
//! control's resting positions.

use smallvec::SmallVec;

/// Baseline density: one density-independent pixel equals one pixel at 160 dpi
pub const DENSITY_DEFAULT: i32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Display configuration reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub orientation: Orientation,
    pub screen_width_dp: i32,
    pub screen_height_dp: i32,
    pub density_dpi: i32,
    pub layout_direction: LayoutDirection,
    /// Opaque screen-layout class bits (size class, long/notlong, ...)
    pub screen_layout: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            screen_width_dp: 360,
            screen_height_dp: 640,
            density_dpi: DENSITY_DEFAULT,
            layout_direction: LayoutDirection::Ltr,
            screen_layout: 0,
        }
    }
}

impl Configuration {
    /// Screen height converted from dp to pixels
    pub fn screen_height_px(&self) -> i32 {
        self.screen_height_dp * self.density_dpi / DENSITY_DEFAULT
    }

    /// Container bounds in the content view's coordinate space.
    ///
    /// The status bar sits above the content view, so its height is removed
    /// from the usable extent.
    pub fn container_bounds(&self, status_bar_inset: i32) -> crate::ContainerBounds {
        crate::ContainerBounds::new(self.screen_height_px() - status_bar_inset, status_bar_inset)
    }

    /// Fields that differ between `self` and `newer`
    pub fn diff(&self, newer: &Configuration) -> ConfigChanges {
        let mut changes = ConfigChanges::NONE;
        if self.orientation != newer.orientation {
            changes |= ConfigChanges::ORIENTATION;
        }
        if self.screen_width_dp != newer.screen_width_dp
            || self.screen_height_dp != newer.screen_height_dp
        {
            changes |= ConfigChanges::SCREEN_SIZE;
        }
        if self.screen_layout != newer.screen_layout {
            changes |= ConfigChanges::SCREEN_LAYOUT;
        }
        if self.layout_direction != newer.layout_direction {
            changes |= ConfigChanges::LAYOUT_DIRECTION;
        }
        if self.density_dpi != newer.density_dpi {
            changes |= ConfigChanges::DENSITY;
        }
        changes
    }
}

/// Set of configuration fields that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigChanges(u32);

impl ConfigChanges {
    pub const NONE: Self = Self(0);
    pub const ORIENTATION: Self = Self(1 << 0);
    pub const SCREEN_SIZE: Self = Self(1 << 1);
    pub const SCREEN_LAYOUT: Self = Self(1 << 2);
    pub const LAYOUT_DIRECTION: Self = Self(1 << 3);
    pub const DENSITY: Self = Self(1 << 4);

    /// Changes that move container edges
    pub const GEOMETRY: Self = Self(
        Self::ORIENTATION.0
            | Self::SCREEN_SIZE.0
            | Self::SCREEN_LAYOUT.0
            | Self::LAYOUT_DIRECTION.0
            | Self::DENSITY.0,
    );

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether cached resting positions must be recomputed
    pub fn affects_geometry(&self) -> bool {
        self.intersects(Self::GEOMETRY)
    }

    /// Names of the changed fields, for logging
    pub fn names(&self) -> SmallVec<[&'static str; 4]> {
        const NAMES: [(ConfigChanges, &str); 5] = [
            (ConfigChanges::ORIENTATION, "orientation"),
            (ConfigChanges::SCREEN_SIZE, "screen_size"),
            (ConfigChanges::SCREEN_LAYOUT, "screen_layout"),
            (ConfigChanges::LAYOUT_DIRECTION, "layout_direction"),
            (ConfigChanges::DENSITY, "density"),
        ];
        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl std::ops::BitOr for ConfigChanges {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ConfigChanges {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
