// src/registry/crawl.rs
use super::Colu;
use crate::error::ColuResult;
use log::{debug, info};
use std::collections::HashSet;
use std::time::Duration;

impl Colu {
    /// Budget-limited breadth-first crawl over the asset/holder bipartite
    /// relationship, discovered lazily through the API.
    ///
    /// The first call seeds the frontier from `seed_ids`; later calls ignore
    /// the seeds and resume from the accumulated frontier, so the crawl can
    /// be continued incrementally. Each call expands at most `steps` assets:
    /// pop a pending id, fetch its stakeholders, walk every distinct
    /// stakeholder address through its holdings table, cache every referenced
    /// asset and push the ones not yet expanded onto the frontier.
    ///
    /// The frontier pops the lexicographically smallest pending id, so a
    /// crawl over a fixed universe is reproducible. A transport or integrity
    /// failure aborts the in-progress step; everything cached or visited up
    /// to that point is retained and a later call resumes from the frontier.
    ///
    /// Returns the cumulative set of expanded asset ids.
    pub async fn crawl_assets<I, S>(
        &mut self,
        seed_ids: I,
        steps: usize,
        delay: Duration,
    ) -> ColuResult<&HashSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.seeded {
            self.frontier.extend(seed_ids.into_iter().map(Into::into));
            self.seeded = true;
        }

        let mut remaining = steps;
        while remaining > 0 {
            let Some(asset_id) = self.frontier.pop_first() else {
                info!("frontier exhausted with {} step(s) left", remaining);
                break;
            };
            debug!("expanding {} ({} step(s) left)", asset_id, remaining);

            self.visited.insert(asset_id.clone());
            let stakeholders = self
                .get_asset(&asset_id, false, None)
                .get_stakeholders(delay)
                .await?;

            let mut seen_addresses = HashSet::new();
            for holding in &stakeholders {
                if !seen_addresses.insert(holding.address.as_str()) {
                    continue;
                }
                let rows = self
                    .get_holder(&holding.address, false, None)
                    .get_assets(delay)
                    .await?;
                for row in rows {
                    self.get_asset(&row.asset_id, false, None);
                    if !self.visited.contains(&row.asset_id) {
                        self.frontier.insert(row.asset_id);
                    }
                }
            }

            remaining -= 1;
        }

        Ok(&self.visited)
    }
}
