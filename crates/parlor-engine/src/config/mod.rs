//! Game settings and content documents.
//!
//! The host fetches `settings.json` and the content file; a [`ConfigSource`]
//! hands the texts to [`ConfigService`], which never fails: anything it
//! cannot fetch or parse is replaced by the built-in defaults.

pub mod error;
pub mod service;
pub mod settings;

pub use error::ConfigError;
pub use service::{ConfigService, ConfigSource, PrefetchedSource, CONTENT_URL, SETTINGS_URL};
pub use settings::{Settings, TextAlign, Tone};
