//! Scroll-back position for the terminal view.
//!
//! Offsets count lines up from the newest content, so 0 always shows the
//! input row. Appending lines never moves a view that sits at 0.

/// Scroll position and the limit computed at the last render.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Maximum offset (content height minus viewport height).
    pub max_scroll: u16,
    /// Lines scrolled up from the bottom (0 = input visible).
    pub offset: u16,
    /// True when the user scrolled away from the bottom.
    pub user_has_scrolled: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll up by `lines`. Returns true if the position changed.
    pub fn scroll_up(&mut self, lines: u16) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_add(lines).min(self.max_scroll);
        self.user_has_scrolled = self.offset > 0;
        old != self.offset
    }

    /// Scroll down by `lines`. Returns true if the position changed.
    pub fn scroll_down(&mut self, lines: u16) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        self.user_has_scrolled = self.offset > 0;
        old != self.offset
    }

    /// Jump back to the newest content.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = 0;
        self.user_has_scrolled = false;
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset == 0
    }

    /// Update the limit after layout, clamping the current offset.
    pub fn update_limits(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        if self.offset > max_scroll {
            self.offset = max_scroll;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_up_clamped() {
        let mut state = ScrollState::new();
        state.update_limits(50);
        assert!(state.scroll_up(100));
        assert_eq!(state.offset, 50);
        assert!(state.user_has_scrolled);
        assert!(!state.scroll_up(1));
    }

    #[test]
    fn test_scroll_down_to_bottom_clears_flag() {
        let mut state = ScrollState::new();
        state.update_limits(100);
        state.scroll_up(10);
        state.scroll_down(50);
        assert!(state.is_at_bottom());
        assert!(!state.user_has_scrolled);
    }

    #[test]
    fn test_update_limits_clamps_offset() {
        let mut state = ScrollState::new();
        state.update_limits(100);
        state.scroll_up(80);
        state.update_limits(20);
        assert_eq!(state.offset, 20);
    }

    #[test]
    fn test_no_scroll_without_overflow() {
        let mut state = ScrollState::new();
        assert!(!state.scroll_up(5));
        assert!(state.is_at_bottom());
    }

    #[test]
    fn test_scroll_to_bottom() {
        let mut state = ScrollState::new();
        state.update_limits(10);
        state.scroll_up(4);
        state.scroll_to_bottom();
        assert_eq!(state.offset, 0);
        assert!(!state.user_has_scrolled);
    }
}
