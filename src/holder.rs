// src/holder.rs
use crate::client::ApiClient;
use crate::error::{ColuError, ColuResult};
use crate::store::{self, HolderRecord};
use crate::types::{AddressInfo, HoldingRow, Utxo};
use std::path::Path;
use std::time::Duration;

/// An address holding colored coins. Address info is fetched lazily and
/// memoized; the flat holdings table is derived from it and cached.
#[derive(Debug, Clone)]
pub struct Holder {
    client: ApiClient,
    address: String,
    address_info: Option<AddressInfo>,
    assets: Option<Vec<HoldingRow>>,
}

impl Holder {
    pub fn new(client: ApiClient, address: impl Into<String>) -> Self {
        Self {
            client,
            address: address.into(),
            address_info: None,
            assets: None,
        }
    }

    /// Rebuild from a persisted record. The holdings table is not part of the
    /// record; it is recomputed from the stored address info.
    pub fn from_record(client: ApiClient, record: HolderRecord) -> Self {
        let assets = record
            .address_info
            .as_ref()
            .map(|info| derive_rows(&info.utxos));
        Self {
            client,
            address: record.address,
            address_info: record.address_info,
            assets,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Cached address info, without fetching
    pub fn address_info(&self) -> Option<&AddressInfo> {
        self.address_info.as_ref()
    }

    /// Address info, fetched at most once. The response must carry the
    /// requested address, otherwise nothing is cached.
    pub async fn get_address_info(&mut self, delay: Duration) -> ColuResult<AddressInfo> {
        if let Some(cached) = &self.address_info {
            return Ok(cached.clone());
        }

        let info: AddressInfo = self.client.fetch("addressinfo", &self.address, delay).await?;
        if info.address != self.address {
            return Err(ColuError::IdentityMismatch {
                requested: self.address.clone(),
                received: info.address,
            });
        }

        self.address_info = Some(info.clone());
        Ok(info)
    }

    /// Known UTXOs of this address, triggering an address-info fetch if needed
    pub async fn get_utxos(&mut self, delay: Duration) -> ColuResult<Vec<Utxo>> {
        Ok(self.get_address_info(delay).await?.utxos)
    }

    /// Flat holdings table: one row per (utxo, asset) pair, with the
    /// UTXO-level fields copied onto every row. A holder with no colored
    /// assets yields an empty table, not an error.
    pub async fn get_assets(&mut self, delay: Duration) -> ColuResult<Vec<HoldingRow>> {
        if let Some(cached) = &self.assets {
            return Ok(cached.clone());
        }

        let utxos = self.get_utxos(delay).await?;
        let rows = derive_rows(&utxos);
        self.assets = Some(rows.clone());
        Ok(rows)
    }

    pub fn to_record(&self) -> HolderRecord {
        HolderRecord {
            address: self.address.clone(),
            address_info: self.address_info.clone(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ColuResult<()> {
        store::write_json(path, &self.to_record())
    }

    pub fn load(client: ApiClient, path: impl AsRef<Path>) -> ColuResult<Self> {
        Ok(Self::from_record(client, store::read_json(path)?))
    }
}

fn derive_rows(utxos: &[Utxo]) -> Vec<HoldingRow> {
    let mut rows = Vec::new();
    for utxo in utxos {
        for held in &utxo.assets {
            rows.push(HoldingRow {
                asset_id: held.asset_id.clone(),
                amount: held.amount,
                value: utxo.value,
                used: utxo.used,
                blockheight: utxo.blockheight,
                blocktime: utxo.blocktime,
            });
        }
    }
    rows
}
