//! Library components for the sheetplan CLI.

#![deny(unsafe_code)]

pub mod logging;
pub mod render;
