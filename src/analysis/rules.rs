use crate::wallet::{Btc, WalletReport};

use super::types::{Alert, AlertKind, RiskScore};

const BUSY_TX_COUNT: u64 = 100;
const BOT_TX_COUNT: u64 = 10_000;

const DUST_BALANCE: Btc = Btc::from_sats(1_000_000); // 0.01 BTC
const DRAINED_BALANCE: Btc = Btc::from_sats(100_000); // 0.001 BTC
const LARGE_INFLOW: Btc = Btc::from_sats(1_000_000_000); // 10 BTC
const HEAVY_FLOW: Btc = Btc::from_sats(5_000_000_000); // 50 BTC
const ONE_BTC: Btc = Btc::from_sats(100_000_000);

/// Accumulate threshold points and cap at 100.
///
/// - +30 for more than 100 transactions
/// - +30 for a balance under 0.01 BTC
/// - +40 when both received and sent exceed 50 BTC
pub fn risk_score(report: &WalletReport) -> RiskScore {
    let mut points = 0u32;

    if report.tx_count > BUSY_TX_COUNT {
        points += 30;
    }
    if report.final_balance < DUST_BALANCE {
        points += 30;
    }
    if report.total_received > HEAVY_FLOW && report.total_sent > HEAVY_FLOW {
        points += 40;
    }

    RiskScore::capped(points)
}

/// More than 10k transactions looks like a service or a bot.
pub fn check_high_volume(report: &WalletReport) -> Option<Alert> {
    (report.tx_count > BOT_TX_COUNT).then(|| Alert::new(AlertKind::HighVolume))
}

/// Almost nothing left after more than 10 BTC came in.
pub fn check_pass_through(report: &WalletReport) -> Option<Alert> {
    (report.final_balance < DRAINED_BALANCE && report.total_received > LARGE_INFLOW)
        .then(|| Alert::new(AlertKind::PassThrough))
}

/// Received more than 1 BTC and never spent anything.
pub fn check_accumulation_only(report: &WalletReport) -> Option<Alert> {
    (report.total_sent.is_zero() && report.total_received > ONE_BTC)
        .then(|| Alert::new(AlertKind::AccumulationOnly))
}
