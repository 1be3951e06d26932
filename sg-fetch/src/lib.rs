//! SG Fetch - page sources for the announcement feed
//!
//! A [`PageSource`] hands the extraction engine a complete document. The HTTP
//! source waits until the feed has been rendered or a timeout elapses; the
//! file source reads a page saved earlier.

mod error;
mod file;
mod http;
mod source;

pub use error::{Error, Result};
pub use file::FilePageSource;
pub use http::HttpPageSource;
pub use source::{PageSource, StaticPageSource};
