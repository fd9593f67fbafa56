//! Core library for the factory layout planner.
//!
//! The graph editing model lives in [`model`], the canvas session controller
//! in [`session`], and both sides of the layout persistence boundary in
//! [`store`]. The `factory-planner` binary drives these from an egui shell;
//! `layoutd` serves the shared layout slot over HTTP.

pub mod model;
pub mod session;
pub mod store;
