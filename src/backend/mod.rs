mod client;
mod endpoints;
mod types;

pub use client::{ApiClient, Backend};
pub use types::{ImageId, ImageRecord, ImportRequest, ImportSource, SourceFilter};
