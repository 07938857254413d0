//! insta485 core library: route descriptors, input layout, config loading.
//!
//! Public API surface:
//! - [`types`]: [`Route`], [`SiteConfig`] and the [`TemplateName`] newtype
//! - [`layout`]: [`SiteLayout`] and the fixed input/output file names
//! - [`config`]: load `config.json` from an input directory
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use error::ConfigError;
pub use layout::SiteLayout;
pub use types::{Route, SiteConfig, TemplateName};
