//! Utility modules for the importer.

pub mod date;
