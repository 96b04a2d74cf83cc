// src/registry/mod.rs
mod crawl;
mod graph;

pub use graph::{AssetGraph, GraphNode};

use crate::asset::Asset;
use crate::client::ApiClient;
use crate::error::ColuResult;
use crate::holder::Holder;
use crate::store::{self, AssetRecord, ColuRecord, HolderRecord};
use crate::types::ColuConfig;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

/// Registry over the colored-coins API: owns every fetched [`Asset`] and
/// [`Holder`], the crawl worklist, and the derived bipartite holdings graph,
/// while avoiding extraneous requests.
///
/// All accessors take `&mut self`; there is no internal locking and a single
/// registry must not be driven from multiple tasks at once.
pub struct Colu {
    client: ApiClient,
    assets: HashMap<String, Asset>,
    holders: HashMap<String, Holder>,
    visited: HashSet<String>,
    frontier: BTreeSet<String>,
    seeded: bool,
    graph: Option<AssetGraph>,
}

impl Colu {
    pub fn new(config: &ColuConfig) -> ColuResult<Self> {
        Ok(Self::with_client(ApiClient::new(config)?))
    }

    /// Build a registry over an existing client
    pub fn with_client(client: ApiClient) -> Self {
        Self {
            client,
            assets: HashMap::new(),
            holders: HashMap::new(),
            visited: HashSet::new(),
            frontier: BTreeSet::new(),
            seeded: false,
            graph: None,
        }
    }

    /// Cached asset for `asset_id`, creating the entry if absent. With
    /// `force` the stored entity is always replaced by a fresh instance, so
    /// previously fetched fields are dropped. An optional `seed` record
    /// pre-populates the new entity without a network round trip.
    pub fn get_asset(
        &mut self,
        asset_id: &str,
        force: bool,
        seed: Option<AssetRecord>,
    ) -> &mut Asset {
        match self.assets.entry(asset_id.to_string()) {
            Entry::Occupied(occupied) => {
                let slot = occupied.into_mut();
                if force {
                    debug!("replacing cached asset {}", asset_id);
                    *slot = make_asset(&self.client, asset_id, seed);
                }
                slot
            }
            Entry::Vacant(vacant) => {
                debug!("creating asset entry for {}", asset_id);
                vacant.insert(make_asset(&self.client, asset_id, seed))
            }
        }
    }

    /// Cached holder for `address`; same semantics as [`Colu::get_asset`]
    pub fn get_holder(
        &mut self,
        address: &str,
        force: bool,
        seed: Option<HolderRecord>,
    ) -> &mut Holder {
        match self.holders.entry(address.to_string()) {
            Entry::Occupied(occupied) => {
                let slot = occupied.into_mut();
                if force {
                    debug!("replacing cached holder {}", address);
                    *slot = make_holder(&self.client, address, seed);
                }
                slot
            }
            Entry::Vacant(vacant) => {
                debug!("creating holder entry for {}", address);
                vacant.insert(make_holder(&self.client, address, seed))
            }
        }
    }

    /// Read-only peek at a cached asset
    pub fn asset(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.get(asset_id)
    }

    /// Read-only peek at a cached holder
    pub fn holder(&self, address: &str) -> Option<&Holder> {
        self.holders.get(address)
    }

    pub fn assets(&self) -> &HashMap<String, Asset> {
        &self.assets
    }

    pub fn holders(&self) -> &HashMap<String, Holder> {
        &self.holders
    }

    /// Asset ids expanded by the crawl so far
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Asset ids discovered but not yet expanded
    pub fn frontier(&self) -> &BTreeSet<String> {
        &self.frontier
    }

    pub fn to_record(&self) -> ColuRecord {
        ColuRecord {
            assets: self
                .assets
                .iter()
                .map(|(id, asset)| (id.clone(), asset.to_record()))
                .collect(),
            holders: self
                .holders
                .iter()
                .map(|(address, holder)| (address.clone(), holder.to_record()))
                .collect(),
        }
    }

    /// Rebuild a registry from a persisted record. Crawl state and the graph
    /// are not persisted; a restored registry starts with a fresh crawl.
    pub fn from_record(client: ApiClient, record: ColuRecord) -> Self {
        let mut colu = Self::with_client(client);
        colu.assets = record
            .assets
            .into_iter()
            .map(|(id, rec)| (id, Asset::from_record(colu.client.clone(), rec)))
            .collect();
        colu.holders = record
            .holders
            .into_iter()
            .map(|(address, rec)| (address, Holder::from_record(colu.client.clone(), rec)))
            .collect();
        colu
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ColuResult<()> {
        store::write_json(path, &self.to_record())
    }

    pub fn load(config: &ColuConfig, path: impl AsRef<Path>) -> ColuResult<Self> {
        let client = ApiClient::new(config)?;
        Ok(Self::from_record(client, store::read_json(path)?))
    }
}

fn make_asset(client: &ApiClient, asset_id: &str, seed: Option<AssetRecord>) -> Asset {
    match seed {
        Some(record) => Asset::from_record(client.clone(), record),
        None => Asset::new(client.clone(), asset_id),
    }
}

fn make_holder(client: &ApiClient, address: &str, seed: Option<HolderRecord>) -> Holder {
    match seed {
        Some(record) => Holder::from_record(client.clone(), record),
        None => Holder::new(client.clone(), address),
    }
}
