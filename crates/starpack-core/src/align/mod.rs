pub mod config;
mod dispatcher;
pub mod search;
pub mod spiral;
pub mod transform;

pub use config::{AlignmentConfig, SearchConfig};
pub use dispatcher::{
    align_frames, align_to_reference, apply_alignments, BatchAlignment, FrameAlignment,
};
pub use search::{find_offset, Alignment};
pub use transform::{bilinear_sample, transform_frame};
