/// Heuristic alert categories, in the order they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    HighVolume,
    PassThrough,
    AccumulationOnly,
    NoAnomalies,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighVolume => "high_volume",
            Self::PassThrough => "pass_through",
            Self::AccumulationOnly => "accumulation_only",
            Self::NoAnomalies => "no_anomalies",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::HighVolume => {
                "📈 Very high transaction count – possibly a service or bot-driven activity."
            }
            Self::PassThrough => {
                "💸 Low remaining balance despite large inflows – check for funds being moved out."
            }
            Self::AccumulationOnly => {
                "🕵️ Funds received with no outgoing transfers – possibly a storage or dormant address."
            }
            Self::NoAnomalies => "✅ No signs of unusual activity.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// Ordered alerts for one report. Never empty.
pub type AlertSet = Vec<Alert>;

/// Bounded 0–100 heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MAX: u8 = 100;

    /// Clamp an accumulated point total into range.
    pub fn capped(points: u32) -> Self {
        Self(points.min(Self::MAX as u32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn level(self) -> RiskLevel {
        match self.0 {
            0..=39 => RiskLevel::Low,
            40..=69 => RiskLevel::Caution,
            _ => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Caution,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Caution => "caution",
            RiskLevel::High => "high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_capped() {
        assert_eq!(RiskScore::capped(130).value(), 100);
        assert_eq!(RiskScore::capped(0).value(), 0);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskScore::capped(39).level(), RiskLevel::Low);
        assert_eq!(RiskScore::capped(40).level(), RiskLevel::Caution);
        assert_eq!(RiskScore::capped(69).level(), RiskLevel::Caution);
        assert_eq!(RiskScore::capped(70).level(), RiskLevel::High);
        assert_eq!(RiskScore::capped(100).level(), RiskLevel::High);
    }
}
