//! Library exports for reusing paintbox subsystems.
//!
//! Exposes the drawing surface, shape renderers and persistence layer used by
//! the `paintbox` binary, along with the configuration types so that external
//! tools (e.g. the schema dumper) can share validation and serialization code.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod notification;
pub mod persist;
pub mod script;
pub mod session;
pub mod util;

pub use config::Config;
