#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{InMemoryRepository, Storage, StorageError};
