// src/extractors/mod.rs

pub mod json;
pub mod path;
