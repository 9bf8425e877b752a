pub mod config;
pub mod convert;
pub mod models;
pub mod provider;
pub mod relabel;
pub mod store;
pub mod upload;

pub use config::{Config, ConfigError, Settings};
pub use convert::{assemble_composite, Flatten};
pub use models::sort_by_date;
pub use provider::{ProviderError, QuoteClient};
pub use store::{DocStore, StoreError};
pub use upload::{document_id, upload_with, UploadError, Uploader};
