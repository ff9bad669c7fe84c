pub mod metadata;
pub mod tiff;

pub use metadata::{load_metadata, VolumeMetadata};
pub use tiff::{load_volume, VolumeLoadResult};
