use serde::Deserialize;

/// Subset of the explorer's `/address/{addr}` response we rely on.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressResponse {
    pub chain_stats: ChainStats,
}

/// Cumulative confirmed totals, in satoshis.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainStats {
    pub funded_txo_sum: i64,
    pub spent_txo_sum: i64,
    pub tx_count: u64,
}
