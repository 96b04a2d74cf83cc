// src/lib.rs
pub mod asset;
pub mod client;
pub mod error;
pub mod holder;
pub mod registry;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use asset::{Asset, MetadataQuery};
pub use client::{ApiClient, HttpTransport, Transport};
pub use error::{ColuError, ColuResult};
pub use holder::Holder;
pub use registry::{AssetGraph, Colu, GraphNode};
pub use store::{AssetRecord, ColuRecord, HolderRecord};
pub use types::*;
