use chrono::NaiveDateTime;

use super::amount::Btc;

pub const LABEL_ADDRESS: &str = "Wallet Address";
pub const LABEL_RECEIVED: &str = "Total Received (BTC)";
pub const LABEL_SENT: &str = "Total Sent (BTC)";
pub const LABEL_BALANCE: &str = "Final Balance (BTC)";
pub const LABEL_TX_COUNT: &str = "Total Transactions";

/// On-chain totals for one address, taken from a single explorer snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletReport {
    pub address: String,
    pub total_received: Btc,
    pub total_sent: Btc,
    pub final_balance: Btc,
    pub tx_count: u64,
}

impl WalletReport {
    /// Build a report from funded/spent totals; the balance is derived here so
    /// all three amounts always come from the same snapshot.
    pub fn from_totals(address: impl Into<String>, received: Btc, sent: Btc, tx_count: u64) -> Self {
        Self {
            address: address.into(),
            total_received: received,
            total_sent: sent,
            final_balance: received - sent,
            tx_count,
        }
    }

    /// Label/value pairs in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (LABEL_ADDRESS, self.address.clone()),
            (LABEL_RECEIVED, self.total_received.to_string()),
            (LABEL_SENT, self.total_sent.to_string()),
            (LABEL_BALANCE, self.final_balance.to_string()),
            (LABEL_TX_COUNT, self.tx_count.to_string()),
        ]
    }
}

/// A report stamped with the local time it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub captured_at: NaiveDateTime,
    pub report: WalletReport,
}
