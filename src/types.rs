// src/types.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ColuConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ColuConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coloredcoins.org/v3".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// One stakeholder entry from `stakeholders/{assetId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub address: String,
    pub amount: u64,
}

/// Full response of `stakeholders/{assetId}`. Besides the holder list it
/// carries a UTXO reference usable for UTXO-scoped metadata queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholdersResponse {
    pub asset_id: String,
    #[serde(default)]
    pub some_utxo: Option<String>,
    pub holders: Vec<Holding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divisibility: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_status: Option<bool>,
}

/// Response of `assetmetadata/{assetId}` or `assetmetadata/{assetId}/{utxo}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    pub total_supply: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_block: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuance_txid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divisibility: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_holders: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_transfers: Option<u64>,
}

/// Response of `addressinfo/{address}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: String,
    #[serde(default)]
    pub utxos: Vec<Utxo>,
}

/// One unspent output of an address, with the colored assets it carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utxo {
    pub txid: String,
    pub index: u32,
    pub value: u64,
    pub used: bool,
    pub blockheight: i64,
    pub blocktime: i64,
    #[serde(default)]
    pub assets: Vec<UtxoAsset>,
}

/// A colored asset held inside a UTXO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoAsset {
    pub asset_id: String,
    pub amount: u64,
}

/// One row of a holder's flattened holdings table: a (utxo, asset) pair with
/// the UTXO-level fields copied onto the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRow {
    pub asset_id: String,
    pub amount: u64,
    pub value: u64,
    pub used: bool,
    pub blockheight: i64,
    pub blocktime: i64,
}
