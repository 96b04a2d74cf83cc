// src/testutil.rs
//
// Shared test fixtures: an in-memory transport with canned responses and a
// request counter, plus builders for the API response bodies.

use crate::client::{ApiClient, Transport};
use crate::error::{ColuError, ColuResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned-response transport. Unknown routes answer 404.
pub struct MockTransport {
    responses: Mutex<HashMap<(String, String), Value>>,
    requests: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn respond(&self, endpoint: &str, param: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert((endpoint.to_string(), param.to_string()), body);
    }

    /// Total GETs issued, across all routes
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, endpoint: &str, param: &str) -> ColuResult<Value> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .get(&(endpoint.to_string(), param.to_string()))
            .cloned()
            .ok_or_else(|| ColuError::Api {
                status: 404,
                endpoint: endpoint.to_string(),
                param: param.to_string(),
            })
    }
}

pub fn client_over(mock: &std::sync::Arc<MockTransport>) -> ApiClient {
    ApiClient::with_transport(mock.clone())
}

pub fn stakeholders_body(asset_id: &str, some_utxo: &str, holders: &[(&str, u64)]) -> Value {
    let holders: Vec<Value> = holders
        .iter()
        .map(|(address, amount)| json!({"address": address, "amount": amount}))
        .collect();
    json!({
        "assetId": asset_id,
        "someUtxo": some_utxo,
        "holders": holders,
    })
}

pub fn metadata_body(asset_id: &str, total_supply: u64) -> Value {
    json!({
        "assetId": asset_id,
        "totalSupply": total_supply,
        "firstBlock": 400_000,
        "divisibility": 0,
    })
}

pub fn utxo_body(
    txid: &str,
    value: u64,
    used: bool,
    blockheight: i64,
    blocktime: i64,
    assets: &[(&str, u64)],
) -> Value {
    let assets: Vec<Value> = assets
        .iter()
        .map(|(asset_id, amount)| json!({"assetId": asset_id, "amount": amount}))
        .collect();
    json!({
        "txid": txid,
        "index": 0,
        "value": value,
        "used": used,
        "blockheight": blockheight,
        "blocktime": blocktime,
        "assets": assets,
    })
}

pub fn address_info_body(address: &str, utxos: Vec<Value>) -> Value {
    json!({"address": address, "utxos": utxos})
}
