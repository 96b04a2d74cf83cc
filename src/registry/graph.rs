// src/registry/graph.rs
use super::Colu;
use crate::error::ColuResult;
use log::debug;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use std::time::Duration;

/// Node payload of the holdings graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub is_asset: bool,
}

/// Undirected bipartite graph of holders and assets. Edge weights are the
/// holder's stake as a fraction of the asset's total supply.
#[derive(Debug, Clone, Default)]
pub struct AssetGraph {
    graph: UnGraph<GraphNode, f64>,
    index: HashMap<String, NodeIndex>,
}

impl AssetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the node if absent. The tag of an existing node is kept.
    fn ensure_node(&mut self, id: &str, is_asset: bool) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            id: id.to_string(),
            is_asset,
        });
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Upsert the holder-asset edge; repeated calls overwrite the weight
    fn set_weight(&mut self, holder: &str, asset_id: &str, weight: f64) {
        let holder_idx = self.ensure_node(holder, false);
        let asset_idx = self.ensure_node(asset_id, true);
        self.graph.update_edge(holder_idx, asset_idx, weight);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.graph.node_weight(*self.index.get(id)?)
    }

    /// Weight of the holder-asset edge, if present
    pub fn weight(&self, holder: &str, asset_id: &str) -> Option<f64> {
        let holder_idx = *self.index.get(holder)?;
        let asset_idx = *self.index.get(asset_id)?;
        let edge = self.graph.find_edge(holder_idx, asset_idx)?;
        self.graph.edge_weight(edge).copied()
    }

    /// The underlying petgraph graph, for external analysis
    pub fn inner(&self) -> &UnGraph<GraphNode, f64> {
        &self.graph
    }
}

impl Colu {
    /// Materialize the node set: one node per known asset, one node per
    /// holder with at least `min_assets` holding rows. Edges are added by
    /// [`Colu::weight_assets`]. Replaces any previously built graph.
    pub async fn build_asset_graph(
        &mut self,
        min_assets: usize,
        delay: Duration,
    ) -> ColuResult<()> {
        let mut graph = AssetGraph::new();
        for asset_id in self.assets.keys() {
            graph.ensure_node(asset_id, true);
        }

        let addresses: Vec<String> = self.holders.keys().cloned().collect();
        for address in addresses {
            let rows = self
                .get_holder(&address, false, None)
                .get_assets(delay)
                .await?;
            if rows.len() >= min_assets {
                graph.ensure_node(&address, false);
            }
        }

        debug!("asset graph built with {} node(s)", graph.node_count());
        self.graph = Some(graph);
        Ok(())
    }

    /// Weight every holder-asset edge by the holder's share of the asset's
    /// total supply, fetching metadata lazily where it is not cached yet.
    /// Builds the graph first when none exists. Re-running overwrites edge
    /// weights in place; it never accumulates.
    pub async fn weight_assets(&mut self, min_assets: usize, delay: Duration) -> ColuResult<()> {
        if self.graph.is_none() {
            self.build_asset_graph(min_assets, delay).await?;
        }

        let addresses: Vec<String> = self.holders.keys().cloned().collect();
        for address in addresses {
            let rows = self
                .get_holder(&address, false, None)
                .get_assets(delay)
                .await?;
            if rows.len() < min_assets {
                continue;
            }
            for row in rows {
                let total_supply = self
                    .get_asset(&row.asset_id, false, None)
                    .total_supply(delay)
                    .await?;
                let weight = row.amount as f64 / total_supply as f64;
                if let Some(graph) = self.graph.as_mut() {
                    graph.set_weight(&address, &row.asset_id, weight);
                }
            }
        }

        Ok(())
    }

    /// The built graph, if any
    pub fn graph(&self) -> Option<&AssetGraph> {
        self.graph.as_ref()
    }
}
