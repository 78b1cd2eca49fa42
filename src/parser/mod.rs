pub mod scene;

pub use crate::error::ParseError;
pub use scene::{parse_scene, parse_scene_file};
