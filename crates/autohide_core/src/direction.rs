//! Scroll direction detection with hysteresis
//!
//! Turns the stream of "first visible row" observations a list emits into
//! hide/show intents. Small pixel adjustments inside the same row are ignored
//! until they exceed the threshold; a change of first visible row always
//! counts as a full-strength move in that direction.

/// Default direction-change threshold in pixels (the platform's scaled
/// overfling distance at baseline density).
pub const DEFAULT_DIRECTION_THRESHOLD: i32 = 6;

/// One scroll-progress observation from a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    /// Index of the topmost visible row
    pub first_visible_index: i32,
    /// Pixel offset of that row's top edge relative to the viewport top
    pub first_visible_top: i32,
}

impl ScrollSample {
    pub fn new(first_visible_index: i32, first_visible_top: i32) -> Self {
        Self {
            first_visible_index,
            first_visible_top,
        }
    }
}

/// Hide/show intent inferred from scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSignal {
    pub hide: bool,
}

/// Tracking state carried between samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScrollTracking {
    prev_index: i32,
    prev_top: i32,
    primed: bool,
}

/// Infers scroll direction from sequential [`ScrollSample`]s.
///
/// The first sample only primes the tracking state. The first sample that
/// produces a delta is a warm-up and never emits, so the initial layout pass
/// of a list cannot hide the control.
#[derive(Debug, Clone)]
pub struct ScrollDirectionDetector {
    threshold: i32,
    down_hides: bool,
    tracking: ScrollTracking,
    /// Set once the first delta has been evaluated; never re-armed
    live: bool,
}

impl ScrollDirectionDetector {
    /// Create a detector.
    ///
    /// `down_hides` selects the convention: `true` hides when content advances
    /// (scrolling down), `false` hides when scrolling back up.
    pub fn new(threshold: i32, down_hides: bool) -> Self {
        Self {
            threshold,
            down_hides,
            tracking: ScrollTracking::default(),
            live: false,
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn down_hides(&self) -> bool {
        self.down_hides
    }

    /// Feed one sample. Returns a signal when the movement crossed the
    /// threshold after warm-up.
    pub fn observe(&mut self, sample: ScrollSample) -> Option<DirectionSignal> {
        let ScrollSample {
            first_visible_index: index,
            first_visible_top: top,
        } = sample;

        if !self.tracking.primed {
            self.tracking = ScrollTracking {
                prev_index: index,
                prev_top: top,
                primed: true,
            };
            tracing::trace!("scroll tracking primed at row {} top {}", index, top);
            return None;
        }

        let jump = self.threshold.saturating_add(1);
        let top_delta = if index == self.tracking.prev_index {
            top.saturating_sub(self.tracking.prev_top)
        } else if index > self.tracking.prev_index {
            -jump
        } else {
            jump
        };

        self.tracking.prev_index = index;
        self.tracking.prev_top = top;

        let warm = self.live;
        self.live = true;

        tracing::trace!(
            "scroll sample row={} top={} delta={} threshold={}",
            index,
            top,
            top_delta,
            self.threshold
        );

        if !warm || top_delta.saturating_abs() <= self.threshold {
            return None;
        }

        let going_down = top_delta < 0;
        let hide = if self.down_hides {
            going_down
        } else {
            !going_down
        };
        Some(DirectionSignal { hide })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warmed(threshold: i32, down_hides: bool, index: i32, top: i32) -> ScrollDirectionDetector {
        let mut detector = ScrollDirectionDetector::new(threshold, down_hides);
        assert_eq!(detector.observe(ScrollSample::new(index, top)), None);
        assert_eq!(detector.observe(ScrollSample::new(index, top)), None);
        detector
    }

    #[test]
    fn test_first_sample_only_primes() {
        let mut detector = ScrollDirectionDetector::new(6, true);
        assert_eq!(detector.observe(ScrollSample::new(10, -500)), None);
    }

    #[test]
    fn test_warm_up_swallows_first_delta() {
        let mut detector = ScrollDirectionDetector::new(6, true);
        detector.observe(ScrollSample::new(0, 0));

        // Over-threshold, but it is the first evaluated delta
        assert_eq!(detector.observe(ScrollSample::new(3, 0)), None);

        // Live from here on
        assert_eq!(
            detector.observe(ScrollSample::new(4, 0)),
            Some(DirectionSignal { hide: true })
        );
    }

    #[test]
    fn test_sub_threshold_movement_is_ignored() {
        let mut detector = warmed(6, true, 0, 0);
        for top in [-1, -3, -6, -12, -18] {
            // Each step moves at most 6px
            assert_eq!(detector.observe(ScrollSample::new(0, top)), None);
        }
        for top in [-12, -6, 0] {
            assert_eq!(detector.observe(ScrollSample::new(0, top)), None);
        }
    }

    #[test]
    fn test_pixel_delta_over_threshold() {
        let mut detector = warmed(6, true, 0, 0);
        assert_eq!(
            detector.observe(ScrollSample::new(0, -7)),
            Some(DirectionSignal { hide: true })
        );
        assert_eq!(
            detector.observe(ScrollSample::new(0, 0)),
            Some(DirectionSignal { hide: false })
        );
    }

    #[test]
    fn test_index_jumps_ignore_pixel_offsets() {
        let mut detector = warmed(6, true, 2, -40);

        // Top moved "up" by pixels, but the row advanced: that's a fling down
        assert_eq!(
            detector.observe(ScrollSample::new(5, 0)),
            Some(DirectionSignal { hide: true })
        );
        assert_eq!(
            detector.observe(ScrollSample::new(2, -80)),
            Some(DirectionSignal { hide: false })
        );
    }

    #[test]
    fn test_up_hides_convention() {
        let mut detector = warmed(6, false, 2, 0);
        assert_eq!(
            detector.observe(ScrollSample::new(5, 0)),
            Some(DirectionSignal { hide: false })
        );
        assert_eq!(
            detector.observe(ScrollSample::new(2, 0)),
            Some(DirectionSignal { hide: true })
        );
    }

    #[test]
    fn test_repeated_identical_samples_emit_nothing() {
        let mut detector = warmed(6, true, 4, -10);
        for _ in 0..10 {
            assert_eq!(detector.observe(ScrollSample::new(4, -10)), None);
        }
    }

    #[test]
    fn test_zero_threshold_still_ignores_no_movement() {
        let mut detector = warmed(0, true, 0, 0);
        assert_eq!(detector.observe(ScrollSample::new(0, 0)), None);
        assert_eq!(
            detector.observe(ScrollSample::new(0, -1)),
            Some(DirectionSignal { hide: true })
        );
    }

    #[test]
    fn test_huge_threshold_does_not_overflow() {
        let mut detector = warmed(i32::MAX, true, 2, 0);
        assert_eq!(detector.observe(ScrollSample::new(5, 0)), None);
        assert_eq!(detector.observe(ScrollSample::new(1, 0)), None);
        assert_eq!(detector.observe(ScrollSample::new(1, i32::MIN)), None);
    }

    #[test]
    fn test_extreme_pixel_delta_saturates() {
        let mut detector = warmed(6, true, 0, i32::MAX);
        assert_eq!(
            detector.observe(ScrollSample::new(0, i32::MIN)),
            Some(DirectionSignal { hide: true })
        );
    }
}
