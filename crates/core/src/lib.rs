pub mod audio;
pub mod detection;
pub mod guidance;
pub mod pipeline;
pub mod shared;
pub mod speech;
pub mod video;
