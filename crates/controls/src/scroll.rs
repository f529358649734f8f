/// Accumulates wheel input into a page-scroll offset `t`.
///
/// Follows the document convention the scroll response expects: `t` is 0
/// at the top of the page and becomes more negative as the user scrolls
/// down, clamped to a finite page extent.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    offset: f32,
    /// Pixels represented by one wheel line.
    pub line_height: f32,
    /// Scrollable page length in pixels; `t` stays within `[-page_extent, 0]`.
    pub page_extent: f32,
}

impl ScrollTracker {
    pub fn new(page_extent: f32) -> Self {
        Self {
            offset: 0.0,
            line_height: 40.0,
            page_extent,
        }
    }

    /// Current offset `t`, in `[-page_extent, 0]`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Apply a wheel delta in lines. Positive scrolls up, toward the top.
    /// Returns the new offset.
    pub fn scroll_lines(&mut self, dy: f32) -> f32 {
        self.apply(dy * self.line_height)
    }

    /// Apply a precise wheel delta in pixels. Returns the new offset.
    pub fn scroll_pixels(&mut self, dy: f32) -> f32 {
        self.apply(dy)
    }

    /// Jump back to the top of the page.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    fn apply(&mut self, delta: f32) -> f32 {
        self.offset = (self.offset + delta).clamp(-self.page_extent, 0.0);
        self.offset
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(2000.0)
    }
}
