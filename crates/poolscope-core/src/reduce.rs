//! Latest-sample reduction for time-series collections.

use std::collections::BTreeMap;

use crate::upstream::pool::ServerSample;

/// Collapse samples to the freshest one per server.
///
/// A stored sample is only replaced by one with a strictly greater timestamp,
/// so on ties the first sample in upstream order wins.
pub fn reduce_latest(samples: &[ServerSample]) -> BTreeMap<String, ServerSample> {
    let mut latest: BTreeMap<String, ServerSample> = BTreeMap::new();
    for sample in samples {
        match latest.get(&sample.server) {
            Some(existing) if sample.time <= existing.time => {}
            _ => {
                latest.insert(sample.server.clone(), sample.clone());
            }
        }
    }
    latest
}
