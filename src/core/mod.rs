//! Core transformation logic — action types, study, execution, cooking.

pub mod chef;
pub mod digest;
pub mod error;
pub mod executor;
pub mod studier;
pub mod template;
pub mod tree;
pub mod types;
