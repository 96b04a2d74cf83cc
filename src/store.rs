// src/store.rs
use crate::error::ColuResult;
use crate::types::{AddressInfo, AssetMetadata, StakeholdersResponse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Persisted form of an asset: exactly the four cached fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub asset_id: String,
    pub some_utxo: Option<String>,
    pub metadata: Option<AssetMetadata>,
    pub stakeholders: Option<StakeholdersResponse>,
}

/// Persisted form of a holder. The derived holdings table is recomputed on
/// load, never written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderRecord {
    pub address: String,
    pub address_info: Option<AddressInfo>,
}

/// Persisted form of the whole registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColuRecord {
    pub assets: HashMap<String, AssetRecord>,
    pub holders: HashMap<String, HolderRecord>,
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> ColuResult<()> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    fs::write(path, body)?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> ColuResult<T> {
    let body = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&body)?)
}
