// src/asset.rs
use crate::client::ApiClient;
use crate::error::{ColuError, ColuResult};
use crate::store::{self, AssetRecord};
use crate::types::{AssetMetadata, Holding, StakeholdersResponse};
use std::path::Path;
use std::time::Duration;

/// Query options for [`Asset::get_metadata`]
#[derive(Debug, Clone, Default)]
pub struct MetadataQuery {
    pub use_utxo: bool,
    pub utxo: Option<String>,
    pub force: bool,
}

impl MetadataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for UTXO-scoped metadata, resolving a UTXO from the stakeholders
    /// response when none is given explicitly
    pub fn utxo_scoped(mut self) -> Self {
        self.use_utxo = true;
        self
    }

    pub fn with_utxo(mut self, utxo: impl Into<String>) -> Self {
        self.use_utxo = true;
        self.utxo = Some(utxo.into());
        self
    }

    pub fn force_refresh(mut self) -> Self {
        self.force = true;
        self
    }
}

/// A single colored-coin asset. Metadata and the stakeholder list are fetched
/// lazily and memoized; once populated they only change on a forced refetch.
#[derive(Debug, Clone)]
pub struct Asset {
    client: ApiClient,
    asset_id: String,
    some_utxo: Option<String>,
    metadata: Option<AssetMetadata>,
    stakeholders: Option<StakeholdersResponse>,
}

impl Asset {
    pub fn new(client: ApiClient, asset_id: impl Into<String>) -> Self {
        Self {
            client,
            asset_id: asset_id.into(),
            some_utxo: None,
            metadata: None,
            stakeholders: None,
        }
    }

    /// Rebuild from a persisted record, keeping whatever the record already
    /// carries so no network round trip is needed for those fields.
    pub fn from_record(client: ApiClient, record: AssetRecord) -> Self {
        Self {
            client,
            asset_id: record.asset_id,
            some_utxo: record.some_utxo,
            metadata: record.metadata,
            stakeholders: record.stakeholders,
        }
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn some_utxo(&self) -> Option<&str> {
        self.some_utxo.as_deref()
    }

    /// Cached metadata, without fetching
    pub fn metadata(&self) -> Option<&AssetMetadata> {
        self.metadata.as_ref()
    }

    /// Cached stakeholders response, without fetching
    pub fn stakeholders(&self) -> Option<&StakeholdersResponse> {
        self.stakeholders.as_ref()
    }

    /// Stakeholder list, fetched at most once. The response must carry the
    /// requested asset id, otherwise nothing is cached. It also carries a
    /// UTXO reference which is kept for UTXO-scoped metadata queries.
    pub async fn get_stakeholders(&mut self, delay: Duration) -> ColuResult<Vec<Holding>> {
        if let Some(cached) = &self.stakeholders {
            return Ok(cached.holders.clone());
        }

        let response: StakeholdersResponse =
            self.client.fetch("stakeholders", &self.asset_id, delay).await?;
        if response.asset_id != self.asset_id {
            return Err(ColuError::IdentityMismatch {
                requested: self.asset_id.clone(),
                received: response.asset_id,
            });
        }

        self.some_utxo = response.some_utxo.clone();
        let holders = response.holders.clone();
        self.stakeholders = Some(response);
        Ok(holders)
    }

    /// Asset metadata, memoized unless the query forces a refetch. A
    /// UTXO-scoped query without an explicit UTXO resolves one through
    /// [`Asset::get_stakeholders`] first.
    pub async fn get_metadata(
        &mut self,
        query: MetadataQuery,
        delay: Duration,
    ) -> ColuResult<AssetMetadata> {
        if !query.force {
            if let Some(cached) = &self.metadata {
                return Ok(cached.clone());
            }
        }

        let metadata: AssetMetadata = if query.use_utxo {
            let utxo = match query.utxo {
                Some(utxo) => utxo,
                None => {
                    if self.some_utxo.is_none() {
                        self.get_stakeholders(delay).await?;
                    }
                    self.some_utxo
                        .clone()
                        .ok_or_else(|| ColuError::NoUtxoAvailable(self.asset_id.clone()))?
                }
            };
            let param = format!("{}/{}", self.asset_id, utxo);
            self.client.fetch("assetmetadata", &param, delay).await?
        } else {
            self.client.fetch("assetmetadata", &self.asset_id, delay).await?
        };

        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    /// Total supply, fetching metadata on first use
    pub async fn total_supply(&mut self, delay: Duration) -> ColuResult<u64> {
        Ok(self.get_metadata(MetadataQuery::new(), delay).await?.total_supply)
    }

    pub fn to_record(&self) -> AssetRecord {
        AssetRecord {
            asset_id: self.asset_id.clone(),
            some_utxo: self.some_utxo.clone(),
            metadata: self.metadata.clone(),
            stakeholders: self.stakeholders.clone(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ColuResult<()> {
        store::write_json(path, &self.to_record())
    }

    pub fn load(client: ApiClient, path: impl AsRef<Path>) -> ColuResult<Self> {
        Ok(Self::from_record(client, store::read_json(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{client_over, metadata_body, stakeholders_body, MockTransport};
    use std::sync::Arc;

    const ASSET: &str = "La8sGvnXs3DgVbqzKzxcBLFJVhjvg1pyGwRxqk";

    #[tokio::test]
    async fn test_stakeholders_fetched_at_most_once() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "stakeholders",
            ASSET,
            stakeholders_body(ASSET, "txid0:0", &[("addr1", 5), ("addr2", 10)]),
        );
        let mut asset = Asset::new(client_over(&mock), ASSET);

        let first = asset.get_stakeholders(Duration::ZERO).await.unwrap();
        let second = asset.get_stakeholders(Duration::ZERO).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(mock.request_count(), 1);
        assert_eq!(asset.some_utxo(), Some("txid0:0"));
    }

    #[tokio::test]
    async fn test_stakeholders_identity_mismatch_leaves_cache_unset() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "stakeholders",
            ASSET,
            stakeholders_body("LaDifferentAssetId", "txid0:0", &[("addr1", 5)]),
        );
        let mut asset = Asset::new(client_over(&mock), ASSET);

        let result = asset.get_stakeholders(Duration::ZERO).await;
        assert!(matches!(result, Err(ColuError::IdentityMismatch { .. })));
        assert!(asset.stakeholders().is_none());
        assert!(asset.some_utxo().is_none());
    }

    #[tokio::test]
    async fn test_metadata_cached_unless_forced() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("assetmetadata", ASSET, metadata_body(ASSET, 100));
        let mut asset = Asset::new(client_over(&mock), ASSET);

        let first = asset.get_metadata(MetadataQuery::new(), Duration::ZERO).await.unwrap();
        let second = asset.get_metadata(MetadataQuery::new(), Duration::ZERO).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(mock.request_count(), 1);

        asset
            .get_metadata(MetadataQuery::new().force_refresh(), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_utxo_scoped_metadata_resolves_utxo_via_stakeholders() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "stakeholders",
            ASSET,
            stakeholders_body(ASSET, "txid9:1", &[("addr1", 5)]),
        );
        mock.respond(
            "assetmetadata",
            &format!("{}/txid9:1", ASSET),
            metadata_body(ASSET, 100),
        );
        let mut asset = Asset::new(client_over(&mock), ASSET);

        let metadata = asset
            .get_metadata(MetadataQuery::new().utxo_scoped(), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(metadata.total_supply, 100);
        // stakeholders first, then the utxo-scoped metadata route
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_explicit_utxo_skips_stakeholders() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "assetmetadata",
            &format!("{}/txidA:0", ASSET),
            metadata_body(ASSET, 100),
        );
        let mut asset = Asset::new(client_over(&mock), ASSET);

        asset
            .get_metadata(MetadataQuery::new().with_utxo("txidA:0"), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_record_round_trip() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "stakeholders",
            ASSET,
            stakeholders_body(ASSET, "txid0:0", &[("addr1", 5)]),
        );
        let mut asset = Asset::new(client_over(&mock), ASSET);
        asset.get_stakeholders(Duration::ZERO).await.unwrap();

        let record = asset.to_record();
        let restored = Asset::from_record(client_over(&mock), record.clone());
        assert_eq!(restored.to_record(), record);
        // metadata was never fetched and must round-trip as absent
        assert!(restored.metadata().is_none());
        assert_eq!(restored.some_utxo(), Some("txid0:0"));
    }
}
