//! vario-loader - Variant loading
//!
//! Renders request URLs from an element's template and swaps the visible
//! source once a fetched variant has fully decoded.

mod loader;
mod template;

pub use loader::{LoadError, VariantFetcher, VariantLoader};
pub use template::render_url;
