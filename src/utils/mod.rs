// src/utils/mod.rs

pub mod score;
pub mod upload;
