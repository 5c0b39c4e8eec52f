//! Price prediction dashboard: load a scored product dataset, look up one
//! product, and summarise how far the model's predicted prices are from the
//! actual ones.
//!
//! The [`data`] module is the reusable core; everything else is the eframe
//! shell around it.

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod format;
pub mod state;
pub mod ui;
