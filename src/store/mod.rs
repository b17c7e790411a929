pub mod wallet_log;

pub use wallet_log::WalletLog;
