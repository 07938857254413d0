//! # insta485-build
//!
//! Page writer, static copier and build orchestration.
//!
//! Call [`run`] to render every route of an input directory and copy its
//! static assets, or [`run_with`] to observe progress as pages are written.

pub mod error;
pub mod pipeline;
pub mod static_files;
pub mod writer;

pub use error::BuildError;
pub use pipeline::{run, run_with, BuildEvent, BuildOptions, BuildReport};
pub use static_files::{copy_static, StaticCopy};
pub use writer::{write_page, RenderedPage};
