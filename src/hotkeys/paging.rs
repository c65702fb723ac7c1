//! Which slice of a long hotkey list is on screen.
//!
//! The panel shows a fixed number of rows; `first_shown` is the index of the
//! topmost one. It is kept in `[0, max(0, count - visible_count)]` after every
//! scroll and every registry mutation.

use smallvec::SmallVec;

/// Height of one hotkey row in pixels
pub const ROW_HEIGHT: f32 = 60.0;

/// Padding around and between rows
pub const ROW_PADDING: f32 = 5.0;

/// Minimum scrollbar thumb size as a fraction of the track
const MIN_THUMB_RATIO: f32 = 0.05;

/// Screen placement of one visible hotkey.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowPlacement {
    /// Index into the registry
    pub index: usize,
    /// Row on screen, `index - first_shown`
    pub row: usize,
    pub x: f32,
    pub y: f32,
}

pub type Layout = SmallVec<[RowPlacement; 8]>;

#[derive(Clone, Debug, PartialEq)]
pub struct PagingState {
    first_shown: usize,
    visible_count: usize,
    layout: Layout,
}

impl PagingState {
    pub fn new(visible_count: usize) -> Self {
        Self {
            first_shown: 0,
            visible_count: visible_count.max(1),
            layout: Layout::new(),
        }
    }

    pub fn first_shown(&self) -> usize {
        self.first_shown
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Current placements, as of the last recompute.
    pub fn layout(&self) -> &[RowPlacement] {
        &self.layout
    }

    /// Largest valid `first_shown` for `count` items (the scrollbar maximum).
    pub fn max_first_shown(&self, count: usize) -> usize {
        count.saturating_sub(self.visible_count)
    }

    /// Clamp `first` into range and recompute the layout.
    ///
    /// Takes a signed value because scroll arithmetic can go negative.
    pub fn set_first_shown(&mut self, first: i64, count: usize) {
        let max = self.max_first_shown(count) as i64;
        self.first_shown = first.clamp(0, max) as usize;
        self.recompute(count);
    }

    /// One step per scroll notch; the sign of `delta` picks the direction.
    pub fn on_scroll(&mut self, delta: i32, count: usize) {
        let step = match delta.signum() {
            0 => return,
            s => s as i64,
        };
        self.set_first_shown(self.first_shown as i64 + step, count);
    }

    /// Reveal the last item, used after an add.
    pub fn scroll_to_bottom(&mut self, count: usize) {
        self.set_first_shown(self.max_first_shown(count) as i64, count);
    }

    pub fn scroll_to_top(&mut self, count: usize) {
        self.set_first_shown(0, count);
    }

    /// Re-clamp without moving otherwise, used after a delete.
    pub fn reclamp(&mut self, count: usize) {
        self.set_first_shown(self.first_shown as i64, count);
    }

    pub fn visible_range(&self, count: usize) -> std::ops::Range<usize> {
        let start = self.first_shown.min(count);
        let end = (self.first_shown + self.visible_count).min(count);
        start..end
    }

    fn recompute(&mut self, count: usize) {
        let first_shown = self.first_shown;
        self.layout = self
            .visible_range(count)
            .map(|index| {
                let row = index - first_shown;
                RowPlacement {
                    index,
                    row,
                    x: ROW_PADDING,
                    y: ROW_PADDING + row as f32 * (ROW_HEIGHT + ROW_PADDING),
                }
            })
            .collect();
    }

    /// Scrollbar thumb size as a ratio of visible/total items.
    pub fn thumb_height_ratio(&self, count: usize) -> f32 {
        if count == 0 {
            return 1.0;
        }
        (self.visible_count as f32 / count as f32).clamp(MIN_THUMB_RATIO, 1.0)
    }

    /// Scrollbar thumb position as a ratio of first_shown/max.
    pub fn thumb_position_ratio(&self, count: usize) -> f32 {
        let max = self.max_first_shown(count);
        if max == 0 {
            return 0.0;
        }
        (self.first_shown as f32 / max as f32).clamp(0.0, 1.0)
    }
}
