//! Vertical scroll state for a pane.
//!
//! Both panes own a [`Viewport`]: the preview scrolls freely over its
//! rendered lines, the editor follows the cursor with
//! [`Viewport::ensure_visible`].

use std::ops::Range;

/// The visible window over a list of lines.
///
/// # Example
///
/// ```
/// use markpad::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(height: u16, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    /// Index of the first visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Lines currently on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Scroll position as a percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the minimum amount that brings `line` on screen.
    pub const fn ensure_visible(&mut self, line: usize) {
        let height = self.height as usize;
        if height == 0 {
            return;
        }
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }

    /// Change the window height, keeping the offset valid.
    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length (e.g. after re-rendering).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(24, 100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..24);
    }

    #[test]
    fn test_visible_range_with_short_document() {
        let vp = Viewport::new(24, 10);
        assert_eq!(vp.visible_range(), 0..10);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 76);
        assert_eq!(vp.visible_range(), 76..100);
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(5);
        vp.scroll_up(50);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_paging() {
        let mut vp = Viewport::new(10, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 90);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(10, 110);
        assert_eq!(vp.scroll_percent(), 0);
        vp.scroll_down(50);
        assert_eq!(vp.scroll_percent(), 50);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
        assert_eq!(Viewport::new(10, 3).scroll_percent(), 100);
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let mut vp = Viewport::new(5, 50);
        vp.ensure_visible(3);
        assert_eq!(vp.offset(), 0);
        vp.ensure_visible(7);
        assert_eq!(vp.offset(), 3);
        vp.ensure_visible(1);
        assert_eq!(vp.offset(), 1);
    }

    #[test]
    fn test_ensure_visible_with_zero_height_is_noop() {
        let mut vp = Viewport::new(0, 50);
        vp.ensure_visible(20);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(10, 100);
        vp.go_to_bottom();
        vp.resize(50);
        assert_eq!(vp.offset(), 50);
    }

    #[test]
    fn test_set_total_lines_adjusts_offset() {
        let mut vp = Viewport::new(10, 100);
        vp.go_to_bottom();
        vp.set_total_lines(15);
        assert_eq!(vp.offset(), 5);
    }
}
