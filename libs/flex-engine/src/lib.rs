//! Bidirectional conversion between symbolic models (tri-state
//! null/unknown/known attributes) and native structs (plain values with
//! optional pointers, sequences and maps).
//!
//! ```ignore
//! let ctx = Context::background();
//! let mut image = NativeImage::default();
//! flex_engine::expand(&ctx, &model, &mut image)?;
//! flex_engine::flatten(&ctx, &image, &mut model)?;
//! ```

pub mod config;
mod container;
pub mod context;
mod dispatch;
pub mod engine;
pub mod error;
mod nested;
mod resolver;
mod scalar;

pub use config::{ConversionOptions, FlexConfig, NarrowingPolicy, UnknownPolicy};
pub use context::Context;
pub use engine::{expand, flatten, Engine};
pub use error::EngineError;
