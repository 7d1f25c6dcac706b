use std::collections::VecDeque;

use crate::splat::Splat;

/// Live and undone splat collections with stroke-granular undo/redo.
///
/// `live` holds every unbaked splat in creation order (oldest at the front,
/// so the dried prefix can be drained for baking); `undone` is a stack with
/// the most recently undone stroke on top. The history is linear: starting a
/// new stroke clears `undone`.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub live: VecDeque<Splat>,
    pub undone: Vec<Splat>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every splat of the most recent stroke from `live` onto the
    /// undone stack. No-op on an empty history.
    pub fn undo(&mut self) {
        let Some(last_id) = self.live.back().map(|s| s.stroke_id) else {
            return;
        };
        while self.live.back().is_some_and(|s| s.stroke_id == last_id) {
            if let Some(splat) = self.live.pop_back() {
                self.undone.push(splat);
            }
        }
    }

    /// Restore the most recently undone stroke, in its original order.
    /// No-op when nothing has been undone.
    pub fn redo(&mut self) {
        let Some(last_id) = self.undone.last().map(|s| s.stroke_id) else {
            return;
        };
        while self.undone.last().is_some_and(|s| s.stroke_id == last_id) {
            if let Some(splat) = self.undone.pop() {
                self.live.push_back(splat);
            }
        }
    }

    /// Pop the fully dried prefix off the front of `live` for baking.
    ///
    /// Splats age roughly in creation order, but a rewet can delay one
    /// indefinitely, so the drain stops at the first splat that is not yet
    /// dry rather than assuming global FIFO.
    pub fn drain_dried(&mut self, drying_time: i32) -> Vec<Splat> {
        let mut dried = Vec::new();
        while self.live.front().is_some_and(|s| s.life < -drying_time) {
            if let Some(splat) = self.live.pop_front() {
                dried.push(splat);
            }
        }
        dried
    }

    pub fn flowing_count(&self) -> usize {
        self.live.iter().filter(|s| s.life > 0).count()
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.undone.clear();
    }
}
