use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const SATS_PER_BTC: i64 = 100_000_000;

/// A bitcoin amount held as whole satoshis.
///
/// Renders with exactly 8 decimals, which is also the form written to the
/// wallet log, so reading a row back yields the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Btc(i64);

impl Btc {
    pub const ZERO: Btc = Btc(0);

    pub const fn from_sats(sats: i64) -> Self {
        Self(sats)
    }

    pub const fn sats(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self) -> BigDecimal {
        BigDecimal::new(self.0.into(), 8)
    }

    pub fn to_f64(self) -> f64 {
        self.to_decimal().to_f64().unwrap_or(0.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Sub for Btc {
    type Output = Btc;

    fn sub(self, rhs: Btc) -> Btc {
        Btc(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Btc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_btc = SATS_PER_BTC as u64;
        write!(f, "{}{}.{:08}", sign, abs / per_btc, abs % per_btc)
    }
}

impl FromStr for Btc {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s.trim())
            .map_err(|e| eyre::eyre!("Invalid BTC amount '{}': {}", s, e))?;
        let sats = (value * BigDecimal::from(SATS_PER_BTC)).with_scale(0);
        sats.to_i64()
            .map(Btc)
            .ok_or_else(|| eyre::eyre!("BTC amount '{}' out of range", s))
    }
}

impl Serialize for Btc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Btc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
