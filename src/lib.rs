// src/lib.rs

//! Xiaohongshu (RED) user notes to syndication feed payloads.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_utils;
