use crate::raster::{RasterBuffer, Snapshot};

/// Linear undo/redo over whole-canvas snapshots.
///
/// A snapshot is only ever in one of the two stacks; undo and redo move it
/// across rather than copying it.
#[derive(Debug, Default)]
pub struct History {
    /// Canvas states that undo can return to
    undo_stack: Vec<Snapshot>,
    /// Canvas states that redo can return to
    redo_stack: Vec<Snapshot>,
    /// Oldest undo entries are dropped beyond this depth
    limit: Option<usize>,
}

impl History {
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record the canvas state from before a new action. Starting a new
    /// action discards everything that could have been redone.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
                log::debug!("History limit {} reached, dropped {} snapshot(s)", limit, excess);
            }
        }
    }

    /// Step back one action. Returns false when there is nothing to undo.
    pub fn undo(&mut self, canvas: &mut RasterBuffer) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(canvas.snapshot());
        canvas.replace_with(previous);
        log::debug!("Undo: {} undo / {} redo", self.undo_stack.len(), self.redo_stack.len());
        true
    }

    /// Re-apply the last undone action. Returns false when there is nothing to redo.
    pub fn redo(&mut self, canvas: &mut RasterBuffer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(canvas.snapshot());
        canvas.replace_with(next);
        log::debug!("Redo: {} undo / {} redo", self.undo_stack.len(), self.redo_stack.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::to_pixel;
    use egui::Color32;

    fn painted(canvas: &mut RasterBuffer, x: i32) {
        canvas.put_pixel(x, 0, to_pixel(Color32::BLACK));
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::default();
        let mut canvas = RasterBuffer::new(4, 4, Color32::WHITE);
        let before = canvas.snapshot();

        assert!(!history.undo(&mut canvas));
        assert!(!history.redo(&mut canvas));
        assert!(canvas.matches(&before));
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_undo_moves_state_to_redo() {
        let mut history = History::default();
        let mut canvas = RasterBuffer::new(4, 4, Color32::WHITE);

        let blank = canvas.snapshot();
        history.record(blank.clone());
        painted(&mut canvas, 1);
        let after = canvas.snapshot();

        assert!(history.undo(&mut canvas));
        assert!(canvas.matches(&blank));
        assert_eq!((history.undo_depth(), history.redo_depth()), (0, 1));

        assert!(history.redo(&mut canvas));
        assert!(canvas.matches(&after));
        assert_eq!((history.undo_depth(), history.redo_depth()), (1, 0));
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::default();
        let mut canvas = RasterBuffer::new(4, 4, Color32::WHITE);

        history.record(canvas.snapshot());
        painted(&mut canvas, 1);
        history.undo(&mut canvas);
        assert!(history.can_redo());

        history.record(canvas.snapshot());
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        let mut canvas = RasterBuffer::new(4, 4, Color32::WHITE);

        for x in 0..3 {
            history.record(canvas.snapshot());
            painted(&mut canvas, x);
        }
        assert_eq!(history.undo_depth(), 2);

        assert!(history.undo(&mut canvas));
        assert!(history.undo(&mut canvas));
        assert!(!history.undo(&mut canvas));
        // the oldest state (blank) is gone; pixel 0 was painted before it was recorded
        assert_eq!(canvas.pixel(0, 0), Some(Color32::BLACK));
        assert_eq!(canvas.pixel(1, 0), Some(Color32::WHITE));
    }
}
