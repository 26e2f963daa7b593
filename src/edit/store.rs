use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2, Axis, Zip};

use crate::model::{LabelVolume, Pixel};
use crate::slice::{Rotation, oriented_shape, oriented_slice, oriented_slice_mut};

use super::{EditError, Result, ToolParams, tool_mask};

pub const DEFAULT_UNDO_DEPTH: usize = 20;

/// Copy of one raw (unrotated) label plane taken before a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    pub slice_index: usize,
    pub labels: Array2<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing {
        slice_index: usize,
    },
}

/// The editable label volume plus its bounded undo history.
#[derive(Debug, Clone)]
pub struct SegmentationStore {
    labels: LabelVolume,
    history: VecDeque<UndoEntry>,
    capacity: usize,
    gesture: GestureState,
    revision: u64,
}

impl SegmentationStore {
    pub fn new(labels: LabelVolume) -> Self {
        Self::with_capacity(labels, DEFAULT_UNDO_DEPTH)
    }

    pub fn with_capacity(labels: LabelVolume, capacity: usize) -> Self {
        Self {
            labels,
            history: VecDeque::new(),
            capacity: capacity.max(1),
            gesture: GestureState::Idle,
            revision: 0,
        }
    }

    pub fn labels(&self) -> &LabelVolume {
        &self.labels
    }

    pub fn slice(&self, slice_index: usize, rotation: Rotation) -> Result<ArrayView2<'_, u8>> {
        Ok(oriented_slice(&self.labels.data, slice_index, rotation)?)
    }

    /// Bumped on every change to the label data.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Start a drag. The slice is snapshotted once; later applications in the same
    /// gesture share that snapshot. A gesture that was never ended is closed first.
    pub fn begin_gesture(&mut self, slice_index: usize) -> Result<()> {
        self.labels.check_depth(slice_index)?;
        if let GestureState::Drawing { slice_index: stale } = self.gesture {
            log::debug!("closing unfinished gesture on slice {stale}");
        }
        self.push_snapshot(slice_index);
        self.gesture = GestureState::Drawing { slice_index };
        Ok(())
    }

    pub fn end_gesture(&mut self) {
        self.gesture = GestureState::Idle;
    }

    /// Write `value` wherever `mask` is set on the oriented slice. Outside a gesture the
    /// application gets its own undo entry; a gesture that reaches another slice moves
    /// there with one new entry. Returns the number of pixels whose label changed.
    pub fn apply_mask(
        &mut self,
        slice_index: usize,
        rotation: Rotation,
        mask: ArrayView2<'_, bool>,
        value: u8,
    ) -> Result<usize> {
        self.labels.check_depth(slice_index)?;
        let expected = oriented_shape(self.labels.shape(), rotation);
        if mask.dim() != expected {
            return Err(EditError::MaskShapeMismatch {
                expected,
                found: mask.dim(),
            });
        }

        match self.gesture {
            GestureState::Drawing { slice_index: active } if active == slice_index => {}
            GestureState::Drawing { .. } => {
                self.push_snapshot(slice_index);
                self.gesture = GestureState::Drawing { slice_index };
            }
            GestureState::Idle => self.push_snapshot(slice_index),
        }

        let mut target = oriented_slice_mut(&mut self.labels.data, slice_index, rotation)?;
        let mut changed = 0usize;
        Zip::from(&mut target).and(mask).for_each(|label, &selected| {
            if selected && *label != value {
                *label = value;
                changed += 1;
            }
        });
        if changed > 0 {
            self.revision += 1;
        }
        Ok(changed)
    }

    /// Compute the tool footprint on the oriented slice and apply it.
    pub fn apply_tool(
        &mut self,
        params: &ToolParams,
        intensity: ArrayView2<'_, f32>,
        slice_index: usize,
        rotation: Rotation,
        anchor: Pixel,
    ) -> Result<usize> {
        let mask = tool_mask(params, intensity, anchor);
        self.apply_mask(slice_index, rotation, mask.view(), params.target_value())
    }

    /// Restore the most recent snapshot. Returns the restored slice index, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<usize> {
        let entry = self.history.pop_back()?;
        self.gesture = GestureState::Idle;
        self.labels
            .data
            .index_axis_mut(Axis(2), entry.slice_index)
            .assign(&entry.labels);
        self.revision += 1;
        log::debug!(
            "restored label slice {} ({} undo steps left)",
            entry.slice_index,
            self.history.len()
        );
        Some(entry.slice_index)
    }

    /// Swap in new label data and drop the history that belonged to the old data.
    pub fn reset(&mut self, labels: LabelVolume) {
        self.labels = labels;
        self.clear_history();
        self.revision += 1;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.gesture = GestureState::Idle;
    }

    fn push_snapshot(&mut self, slice_index: usize) {
        let labels = self
            .labels
            .data
            .index_axis(Axis(2), slice_index)
            .to_owned();
        self.history.push_back(UndoEntry {
            slice_index,
            labels,
        });
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }
}
