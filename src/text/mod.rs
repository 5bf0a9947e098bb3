//! Font registry and caption shaping.

pub mod fonts;
pub(crate) mod layout;
