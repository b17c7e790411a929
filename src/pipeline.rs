use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::{self, Assessment};
use crate::config::Config;
use crate::explorer::{AddressSource, ExplorerClient};
use crate::export::PdfExporter;
use crate::store::WalletLog;
use crate::wallet::{LogEntry, WalletReport};

/// Result of one successful run.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: WalletReport,
    pub assessment: Assessment,
    pub entry: LogEntry,
    /// `None` when the PDF could not be written; the rest of the run still stands.
    pub pdf_path: Option<PathBuf>,
}

/// Orchestrates a single analysis:
/// 1. Fetch address stats (absence stops everything)
/// 2. Derive risk score and alerts
/// 3. Append to the wallet log (errors propagate)
/// 4. Export the PDF summary (best effort)
pub struct AnalysisPipeline {
    source: Arc<dyn AddressSource>,
    log: WalletLog,
    exporter: PdfExporter,
}

impl AnalysisPipeline {
    pub fn new(source: Arc<dyn AddressSource>, log: WalletLog, exporter: PdfExporter) -> Self {
        Self {
            source,
            log,
            exporter,
        }
    }

    /// Wire the pipeline against the configured explorer and storage paths.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ExplorerClient::new(config.explorer.base_url.clone())),
            WalletLog::new(&config.storage.log_path),
            PdfExporter::new(&config.storage.pdf_path),
        )
    }

    pub fn log(&self) -> &WalletLog {
        &self.log
    }

    pub fn exporter(&self) -> &PdfExporter {
        &self.exporter
    }

    /// Run every step for one address. `Ok(None)` means the fetch produced
    /// nothing and no later step ran.
    pub async fn run(&self, address: &str) -> eyre::Result<Option<AnalysisOutcome>> {
        let Some(report) = self.source.fetch(address).await else {
            tracing::info!(address, "No result for address, pipeline stopped");
            return Ok(None);
        };

        let assessment = analysis::assess(&report);
        let entry = self.log.append(&report)?;

        let pdf_path = match self.exporter.export(&report) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "PDF export failed, continuing without download");
                None
            }
        };

        tracing::info!(
            address,
            risk_score = assessment.risk.value(),
            alerts = assessment.alerts.len(),
            "Wallet analyzed"
        );

        Ok(Some(AnalysisOutcome {
            report,
            assessment,
            entry,
            pdf_path,
        }))
    }
}
