//! Extensions to the base camera rig plugin.

#[cfg(feature = "extension_anchor_indicator")]
pub mod anchor_indicator;
pub mod reset;
