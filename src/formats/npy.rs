use std::path::Path;

use ndarray::Array3;
use ndarray_npy::{ReadNpyError, ReadableElement, read_npy, write_npy};

use super::{IoError, Result};

/// Reads `path` as `T`, or `None` when the stored dtype is a different one.
fn try_read<T: ReadableElement>(path: &Path) -> Result<Option<Array3<T>>> {
    match read_npy::<_, Array3<T>>(path) {
        Ok(data) => Ok(Some(data)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn unsupported_dtype(path: &Path) -> IoError {
    IoError::UnsupportedLayout(format!(
        "{} does not hold a 3D numeric array",
        path.display()
    ))
}

/// Any numeric dtype, widened or narrowed to `f32`.
pub(crate) fn read_intensity(path: &Path) -> Result<Array3<f32>> {
    if let Some(data) = try_read::<f32>(path)? {
        return Ok(data);
    }
    if let Some(data) = try_read::<f64>(path)? {
        return Ok(data.mapv(|value| value as f32));
    }
    if let Some(data) = try_read::<i16>(path)? {
        return Ok(data.mapv(f32::from));
    }
    if let Some(data) = try_read::<u16>(path)? {
        return Ok(data.mapv(f32::from));
    }
    if let Some(data) = try_read::<i32>(path)? {
        return Ok(data.mapv(|value| value as f32));
    }
    if let Some(data) = try_read::<u8>(path)? {
        return Ok(data.mapv(f32::from));
    }
    Err(unsupported_dtype(path))
}

/// Integer or float label arrays; every value must be a whole number in `0..=255`.
pub(crate) fn read_labels(path: &Path) -> Result<Array3<u8>> {
    if let Some(data) = try_read::<u8>(path)? {
        return Ok(data);
    }
    if let Some(data) = try_read::<i64>(path)? {
        return narrow(path, data, |value| u8::try_from(value).ok());
    }
    if let Some(data) = try_read::<i32>(path)? {
        return narrow(path, data, |value| u8::try_from(value).ok());
    }
    if let Some(data) = try_read::<i16>(path)? {
        return narrow(path, data, |value| u8::try_from(value).ok());
    }
    if let Some(data) = try_read::<u16>(path)? {
        return narrow(path, data, |value| u8::try_from(value).ok());
    }
    if let Some(data) = try_read::<f32>(path)? {
        return narrow(path, data, |value| whole_label(f64::from(value)));
    }
    if let Some(data) = try_read::<f64>(path)? {
        return narrow(path, data, whole_label);
    }
    Err(unsupported_dtype(path))
}

fn whole_label(value: f64) -> Option<u8> {
    (value.fract() == 0.0 && (0.0..=255.0).contains(&value)).then_some(value as u8)
}

fn narrow<T: Copy>(
    path: &Path,
    data: Array3<T>,
    convert: impl Fn(T) -> Option<u8>,
) -> Result<Array3<u8>> {
    let mut invalid = 0usize;
    let labels = data.mapv(|value| {
        convert(value).unwrap_or_else(|| {
            invalid += 1;
            0
        })
    });
    if invalid > 0 {
        return Err(IoError::UnsupportedLayout(format!(
            "{} holds {invalid} values that are not labels in 0..=255",
            path.display()
        )));
    }
    Ok(labels)
}

pub(crate) fn write<T: ndarray_npy::WritableElement>(path: &Path, data: &Array3<T>) -> Result<()> {
    write_npy(path, data)?;
    Ok(())
}
