#![allow(dead_code)]

pub mod recording;
pub mod tracing;
