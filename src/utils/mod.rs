//! Utility modules: build info, file locations, logging.

#![allow(unused_imports)]

pub mod build_info;
pub mod logging;
pub mod persistence;

pub use build_info::*;
