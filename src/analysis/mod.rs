pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{assess, detect_suspicious_activity, Assessment};
pub use rules::risk_score;
pub use types::{Alert, AlertKind, AlertSet, RiskLevel, RiskScore};
