// src/lib.rs
//! Interactive 2D point plotter library.
//!
//! Loads a flat binary point file and renders it as GPU points with
//! mouse-driven pan and zoom over an orthographic view.

pub mod app;
pub mod data;
pub mod renderer;
pub mod view;
