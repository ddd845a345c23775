//! Document storage adapters.

mod in_memory;
mod local_file_storage;

pub use in_memory::InMemoryDocumentStorage;
pub use local_file_storage::LocalFileStorage;
