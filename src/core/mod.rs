//! Core data types: the interface type model and Go naming rules.

pub mod names;
pub mod types;

pub use types::{ChanDir, Interface, Method, Package, Packages, Signature, TypeDescriptor};
