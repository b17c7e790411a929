pub mod client;
pub mod types;

pub use client::{AddressSource, ExplorerClient, FetchError};
