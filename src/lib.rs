//! jsonchef — declarative JSON-to-JSON transformation.
//!
//! A recipe document is studied into a flat list of actions, which are then
//! applied to a material document to cook a result document.

pub mod cli;
pub mod core;

pub use crate::core::chef::Chef;
pub use crate::core::error::{ApplyError, CookError, CookResult, StudyError};
pub use crate::core::types::{Action, Operation};
