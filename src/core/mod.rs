//! Core pipeline logic
//!
//! Path normalization, slot resolution, file reading, and the export
//! pipeline itself. Everything here is side-effect free except where it
//! talks to the filesystem or to the adapter traits.

pub mod export;
pub mod paths;
pub mod reader;
pub mod resolver;
