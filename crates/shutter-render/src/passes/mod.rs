//! Built-in render passes

pub mod composite;

pub use composite::{CompositePass, CompositeUniform};
