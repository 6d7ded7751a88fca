pub mod memory;

pub use memory::{InMemoryProductStore, StoredProduct};
