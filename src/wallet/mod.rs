pub mod amount;
pub mod report;

pub use amount::Btc;
pub use report::{LogEntry, WalletReport};
