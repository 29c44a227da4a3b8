mod actions;
mod core;
mod pointer;
#[cfg(test)]
mod tests;

pub use core::{DrawingState, DrawingSurface};
