pub mod camera;
pub mod decoder;
