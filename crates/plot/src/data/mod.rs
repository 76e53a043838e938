// src/data/mod.rs
//! Data handling for the plotter: GPU buffer types and the one-time upload
//! of the loaded point set.

pub mod types;
pub mod upload;

pub use self::types::{PointVertex, PointsGpu, TransformUniform};
pub use self::upload::upload_points;
