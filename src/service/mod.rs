pub mod read_frames;
pub mod scan;
