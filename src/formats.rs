mod api;
mod codec;
mod error;
mod npy;
mod util;


pub use api::{
    load_case, read_intensity_volume, read_label_volume, save_panel_png, supported_formats,
    write_intensity_volume, write_label_volume,
};
pub use codec::{LabelSink, NpyCodec, VolumeProvider};
pub use error::{IoError, Result};
pub use util::metadata_path;
