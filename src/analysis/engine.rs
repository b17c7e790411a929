use crate::wallet::WalletReport;

use super::rules;
use super::types::{Alert, AlertKind, AlertSet, RiskScore};

/// Everything derived from one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub risk: RiskScore,
    pub alerts: AlertSet,
}

pub fn assess(report: &WalletReport) -> Assessment {
    Assessment {
        risk: rules::risk_score(report),
        alerts: detect_suspicious_activity(report),
    }
}

/// Run every alert rule in order. Falls back to a single "no anomalies" alert.
pub fn detect_suspicious_activity(report: &WalletReport) -> AlertSet {
    let checks: [fn(&WalletReport) -> Option<Alert>; 3] = [
        // Rule 1: bot-like volume
        rules::check_high_volume,
        // Rule 2: drained after large inflow
        rules::check_pass_through,
        // Rule 3: receive-only
        rules::check_accumulation_only,
    ];

    let mut alerts: AlertSet = checks.iter().filter_map(|check| check(report)).collect();

    if alerts.is_empty() {
        alerts.push(Alert::new(AlertKind::NoAnomalies));
    }

    alerts
}
