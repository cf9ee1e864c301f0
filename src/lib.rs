//! paneflow - layout composition and transition engine
//!
//! A headless engine for arranging the panes of a live-streaming
//! workspace (stream, chat, controls, participants, notifications) into
//! named layouts, validating them, resolving them per breakpoint, and
//! animating the switches between them.
//!
//! The crate follows a Pure Core / Impure Shell split: `model`,
//! `validation`, `responsive` and `transition` are pure data and
//! functions; `controller` owns runtime state and talks to the outside
//! world exclusively through injected traits (`SurfaceResolver`,
//! `TickClock`, `PersistenceStore`, notification/context sinks).

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod registry;
pub mod responsive;
pub mod transition;
pub mod validation;

#[cfg(test)]
mod tests;
