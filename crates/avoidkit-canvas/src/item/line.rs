//! Line items: an ordered chain of handles from head to tail.

use avoidkit_core::{Point, EPSILON};

use super::{Handle, HandleId};
use crate::error::{CanvasError, Result};

/// The two endpoint handles of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnd {
    Head,
    Tail,
}

impl LineEnd {
    pub fn opposite(self) -> Self {
        match self {
            LineEnd::Head => LineEnd::Tail,
            LineEnd::Tail => LineEnd::Head,
        }
    }
}

/// A line with at least two handles.
///
/// The first and last handles are the endpoints and may be connected to
/// other items. Interior handles are either checkpoints, which the router
/// must pass through, or bends the router computed and may drop again.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    handles: Vec<Handle>,
    next_handle: u64,
}

impl Line {
    pub fn from_points(points: &[Point]) -> Result<Self> {
        if points.len() < 2 {
            return Err(CanvasError::TooFewPoints { got: points.len() });
        }
        let mut line = Self {
            handles: Vec::with_capacity(points.len()),
            next_handle: 0,
        };
        for p in points {
            let handle = line.new_handle(*p);
            line.handles.push(handle);
        }
        let last = line.handles.len() - 1;
        for i in [0, last] {
            line.handles[i].connectable = true;
        }
        Ok(line)
    }

    fn new_handle(&mut self, pos: Point) -> Handle {
        let id = HandleId(self.next_handle);
        self.next_handle += 1;
        Handle::new(id, pos)
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn head(&self) -> &Handle {
        &self.handles[0]
    }

    pub fn tail(&self) -> &Handle {
        &self.handles[self.handles.len() - 1]
    }

    pub fn end(&self, end: LineEnd) -> &Handle {
        match end {
            LineEnd::Head => self.head(),
            LineEnd::Tail => self.tail(),
        }
    }

    pub fn handle_index(&self, id: HandleId) -> Option<usize> {
        self.handles.iter().position(|h| h.id == id)
    }

    /// Which end `id` is, or `None` for interior and unknown handles.
    pub fn end_of(&self, id: HandleId) -> Option<LineEnd> {
        if self.head().id == id {
            Some(LineEnd::Head)
        } else if self.tail().id == id {
            Some(LineEnd::Tail)
        } else {
            None
        }
    }

    /// The endpoint handle at the other end of the line.
    pub fn opposite(&self, id: HandleId) -> Option<&Handle> {
        self.end_of(id).map(|end| self.end(end.opposite()))
    }

    pub fn positions(&self) -> Vec<Point> {
        self.handles.iter().map(|h| h.pos).collect()
    }

    fn is_interior(&self, index: usize) -> bool {
        index > 0 && index + 1 < self.handles.len()
    }

    /// Indices of the checkpoint handles, head to tail.
    pub fn checkpoint_indices(&self) -> Vec<usize> {
        (1..self.handles.len() - 1)
            .filter(|&i| self.handles[i].checkpoint)
            .collect()
    }

    pub fn checkpoints(&self) -> Vec<Point> {
        self.checkpoint_indices()
            .into_iter()
            .map(|i| self.handles[i].pos)
            .collect()
    }

    pub fn checkpoint_count(&self) -> usize {
        self.handles.iter().filter(|h| h.checkpoint).count()
    }

    pub fn set_position(&mut self, index: usize, pos: Point) -> bool {
        match self.handles.get_mut(index) {
            Some(h) => {
                h.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Flags an interior handle. Endpoints are never checkpoints.
    pub fn set_checkpoint(&mut self, index: usize, checkpoint: bool) -> bool {
        if !self.is_interior(index) {
            return false;
        }
        self.handles[index].checkpoint = checkpoint;
        true
    }

    /// Inserts a non-checkpoint handle before `index`, which must leave the
    /// head and tail in place.
    pub fn insert_handle(&mut self, index: usize, pos: Point) -> Option<HandleId> {
        if index == 0 || index >= self.handles.len() {
            return None;
        }
        let handle = self.new_handle(pos);
        self.handles.insert(index, handle);
        Some(handle.id)
    }

    pub fn remove_handle(&mut self, index: usize) -> Option<Handle> {
        if !self.is_interior(index) {
            return None;
        }
        Some(self.handles.remove(index))
    }

    /// Splits segment `segment` (between handles `segment` and
    /// `segment + 1`) into `count` equal parts.
    pub fn split_segment(&mut self, segment: usize, count: usize) -> Option<Vec<HandleId>> {
        if segment + 1 >= self.handles.len() || count < 2 {
            return None;
        }
        let start = self.handles[segment].pos;
        let end = self.handles[segment + 1].pos;
        let mut ids = Vec::with_capacity(count - 1);
        for i in 1..count {
            let pos = start.lerp(&end, i as f64 / count as f64);
            ids.extend(self.insert_handle(segment + i, pos));
        }
        Some(ids)
    }

    /// Merges segment `segment` with the next one by dropping the handle
    /// between them.
    pub fn merge_segment(&mut self, segment: usize) -> Option<Handle> {
        self.remove_handle(segment + 1)
    }

    /// Rewrites the handles to follow `points`, where each flag tells
    /// whether that point is a checkpoint echoed by the router.
    ///
    /// Runs between checkpoints grow or shrink to the number of route points
    /// in the matching run, so checkpoint handles are never removed. Only
    /// the positions and flags of the surviving handles change. Returns
    /// whether anything changed.
    pub fn reconcile(&mut self, points: &[(Point, bool)]) -> Result<bool> {
        let n = points.len();
        if n < 2 {
            return Err(CanvasError::TooFewPoints { got: n });
        }

        let handle_anchors = anchors(self.checkpoint_indices(), self.handles.len());
        let point_anchors = {
            let interior = (1..n - 1).filter(|&i| points[i].1).collect();
            anchors(interior, n)
        };
        if handle_anchors.len() != point_anchors.len() {
            return Err(CanvasError::CheckpointMismatch {
                expected: handle_anchors.len() - 2,
                got: point_anchors.len() - 2,
            });
        }

        let mut changed = false;
        for run in (0..handle_anchors.len() - 1).rev() {
            let have = handle_anchors[run + 1] - handle_anchors[run] - 1;
            let want = point_anchors[run + 1] - point_anchors[run] - 1;
            let at = handle_anchors[run + 1];
            if want > have {
                let pos = self.handles[at].pos;
                for _ in have..want {
                    self.insert_handle(at, pos);
                }
                changed = true;
            } else if have > want {
                for i in 0..have - want {
                    self.handles.remove(at - 1 - i);
                }
                changed = true;
            }
        }

        for (i, (handle, &(pos, flag))) in self.handles.iter_mut().zip(points).enumerate() {
            let checkpoint = flag && i > 0 && i + 1 < n;
            if !handle.pos.approx_eq(&pos, EPSILON) || handle.checkpoint != checkpoint {
                changed = true;
            }
            handle.pos = pos;
            handle.checkpoint = checkpoint;
        }
        Ok(changed)
    }
}

/// Indices delimiting the runs between checkpoints, endpoints included.
fn anchors(checkpoints: Vec<usize>, len: usize) -> Vec<usize> {
    let mut anchors = Vec::with_capacity(checkpoints.len() + 2);
    anchors.push(0);
    anchors.extend(checkpoints);
    anchors.push(len - 1);
    anchors
}
