//! Encoder button debouncing.

/// Debounces an active-low button line.
///
/// Edges closer than the refractory period to the last accepted edge are
/// treated as contact bounce. Only a high to low edge counts as a press.
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    level_high: bool,
    last_edge_ms: Option<u64>,
    refractory_ms: u32,
}

impl ButtonDebouncer {
    /// Create a debouncer with the line idle (pulled high).
    pub fn new(refractory_ms: u32) -> Self {
        Self {
            level_high: true,
            last_edge_ms: None,
            refractory_ms,
        }
    }

    /// Last accepted line level.
    #[inline]
    pub fn is_high(&self) -> bool {
        self.level_high
    }

    /// Feed a sampled line level. Returns `true` for an accepted press.
    ///
    /// The level is always tracked; only the press event is held back
    /// inside the refractory period.
    pub fn update(&mut self, level_high: bool, now_ms: u64) -> bool {
        if level_high == self.level_high {
            return false;
        }
        self.level_high = level_high;

        let settled = self
            .last_edge_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= u64::from(self.refractory_ms));
        if !settled {
            return false;
        }

        self.last_edge_ms = Some(now_ms);
        !level_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_on_falling_edge_only() {
        let mut btn = ButtonDebouncer::new(50);
        assert!(btn.update(false, 0));
        assert!(!btn.update(true, 100));
        assert!(btn.update(false, 200));
    }

    #[test]
    fn test_bounce_inside_refractory_is_ignored() {
        let mut btn = ButtonDebouncer::new(50);
        assert!(btn.update(false, 1000));
        assert!(!btn.update(true, 1010));
        assert!(!btn.update(false, 1020));
        // Line still low when it settles
        assert!(!btn.update(false, 1100));
        assert!(!btn.is_high());
    }

    #[test]
    fn test_fast_tap_then_second_press() {
        let mut btn = ButtonDebouncer::new(50);
        assert!(btn.update(false, 1000));
        // Released inside the refractory period
        assert!(!btn.update(true, 1040));
        assert!(btn.is_high());
        assert!(btn.update(false, 2000));
    }

    #[test]
    fn test_held_level_never_repeats() {
        let mut btn = ButtonDebouncer::new(50);
        assert!(btn.update(false, 0));
        assert!(!btn.update(false, 500));
        assert!(!btn.update(false, 1000));
    }
}
