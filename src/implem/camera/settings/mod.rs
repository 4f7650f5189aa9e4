pub mod frame_format;
pub mod pixel_budget;
pub mod rect;
pub mod resolution;
