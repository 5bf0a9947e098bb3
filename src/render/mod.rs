//! Caption compositing.
//!
//! [`compositor::Compositor`] is the only entry point; geometry helpers are public so callers can
//! reason about caption placement without rasterizing.

pub(crate) mod blend;
pub mod compositor;
pub mod geometry;
