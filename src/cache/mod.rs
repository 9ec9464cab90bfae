// Cache module for local filesystem caching.
// Stores the fetched repository list so queries never touch the network.

pub mod paths;
pub mod store;

pub use paths::*;
pub use store::CacheStore;
