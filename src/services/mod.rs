// Service exports
pub mod documents;

pub use documents::{DocumentStoreClient, DocumentStoreConfig, DocumentCollections, DocumentStoreError, DEFAULT_PAGE_SIZE};
