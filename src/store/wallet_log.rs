use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::wallet::{Btc, LogEntry, WalletReport};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV row layout. Field order is the column order and must not change for
/// an existing file.
#[derive(Debug, Serialize, Deserialize)]
struct LogRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Wallet Address")]
    address: String,
    #[serde(rename = "Total Received (BTC)")]
    total_received: Btc,
    #[serde(rename = "Total Sent (BTC)")]
    total_sent: Btc,
    #[serde(rename = "Final Balance (BTC)")]
    final_balance: Btc,
    #[serde(rename = "Total Transactions")]
    tx_count: u64,
}

impl From<&LogEntry> for LogRow {
    fn from(entry: &LogEntry) -> Self {
        let report = &entry.report;
        Self {
            date: entry.captured_at.format(DATE_FORMAT).to_string(),
            address: report.address.clone(),
            total_received: report.total_received,
            total_sent: report.total_sent,
            final_balance: report.final_balance,
            tx_count: report.tx_count,
        }
    }
}

impl TryFrom<LogRow> for LogEntry {
    type Error = eyre::Report;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        let captured_at = NaiveDateTime::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| eyre::eyre!("Invalid log date '{}': {}", row.date, e))?;
        Ok(LogEntry {
            captured_at,
            report: WalletReport {
                address: row.address,
                total_received: row.total_received,
                total_sent: row.total_sent,
                final_balance: row.final_balance,
                tx_count: row.tx_count,
            },
        })
    }
}

/// Append-only CSV log of every successful analysis.
///
/// Single writer assumed; there is no file locking.
#[derive(Debug, Clone)]
pub struct WalletLog {
    path: PathBuf,
}

impl WalletLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Stamp the report with the current local time and append it.
    pub fn append(&self, report: &WalletReport) -> eyre::Result<LogEntry> {
        let entry = LogEntry {
            captured_at: now_to_second(),
            report: report.clone(),
        };
        self.append_entry(&entry)?;
        Ok(entry)
    }

    /// Append a row, writing the header first when the file is new or empty.
    pub fn append_entry(&self, entry: &LogEntry) -> eyre::Result<()> {
        let write_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| eyre::eyre!("Failed to open wallet log '{}': {}", self.path.display(), e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(LogRow::from(entry))?;
        writer.flush()?;

        tracing::debug!(
            path = %self.path.display(),
            address = %entry.report.address,
            header = write_header,
            "Appended wallet log row"
        );
        Ok(())
    }

    /// Read every row back in file order.
    pub fn read_all(&self) -> eyre::Result<Vec<LogEntry>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| eyre::eyre!("Failed to open wallet log '{}': {}", self.path.display(), e))?;

        let mut entries = Vec::new();
        for result in reader.deserialize::<LogRow>() {
            entries.push(LogEntry::try_from(result?)?);
        }

        tracing::debug!(rows = entries.len(), "Loaded wallet log");
        Ok(entries)
    }
}

fn now_to_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
