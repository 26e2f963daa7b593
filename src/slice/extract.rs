use ndarray::{Array2, Array3, ArrayBase, ArrayView2, ArrayViewMut2, Axis, Ix2, RawData, s};
use serde::{Deserialize, Serialize};

use crate::model::{CoreError, Result, Shape3};

/// Number of clockwise quarter turns applied after the radiological reorientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rotation(u8);

impl Rotation {
    pub const NONE: Self = Self(0);

    pub fn from_quarter_turns(turns: i32) -> Self {
        Self(turns.rem_euclid(4) as u8)
    }

    pub fn quarter_turns(self) -> u8 {
        self.0
    }

    pub fn clockwise(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    pub fn counter_clockwise(self) -> Self {
        Self((self.0 + 3) % 4)
    }
}

/// Transpose and reverse both axes of a raw `(W, H)` plane so rows run anterior to
/// posterior and columns run right to left, then apply the clockwise quarter turns.
/// Works on owned data and on shared or mutable views alike.
fn orient<S: RawData>(plane: ArrayBase<S, Ix2>, rotation: Rotation) -> ArrayBase<S, Ix2> {
    let mut oriented = plane.reversed_axes().slice_move(s![..;-1, ..;-1]);
    for _ in 0..rotation.quarter_turns() {
        oriented = oriented.reversed_axes().slice_move(s![.., ..;-1]);
    }
    oriented
}

fn check_depth<T>(volume: &Array3<T>, index: usize) -> Result<()> {
    let depth = volume.len_of(Axis(2));
    if index < depth {
        Ok(())
    } else {
        Err(CoreError::DepthOutOfRange { index, depth })
    }
}

pub fn oriented_slice<T>(
    volume: &Array3<T>,
    index: usize,
    rotation: Rotation,
) -> Result<ArrayView2<'_, T>> {
    check_depth(volume, index)?;
    Ok(orient(volume.index_axis(Axis(2), index), rotation))
}

pub fn oriented_slice_mut<T>(
    volume: &mut Array3<T>,
    index: usize,
    rotation: Rotation,
) -> Result<ArrayViewMut2<'_, T>> {
    check_depth(volume, index)?;
    Ok(orient(volume.index_axis_mut(Axis(2), index), rotation))
}

pub fn extract_slice<T: Clone>(
    volume: &Array3<T>,
    index: usize,
    rotation: Rotation,
) -> Result<Array2<T>> {
    Ok(oriented_slice(volume, index, rotation)?.to_owned())
}

/// `(rows, columns)` of every slice cut from a volume of `shape` under `rotation`.
pub fn oriented_shape(shape: Shape3, rotation: Rotation) -> (usize, usize) {
    let [width, height, _] = shape;
    if rotation.quarter_turns() % 2 == 0 {
        (height, width)
    } else {
        (width, height)
    }
}
