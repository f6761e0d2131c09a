// src/math/mod.rs

pub mod vector;

pub use vector::Vector3;
pub use vector::{distance, vector_add, vector_norm, vector_normalize, vector_scale, vector_sub};
