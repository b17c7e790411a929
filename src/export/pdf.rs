use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::wallet::WalletReport;

pub const TITLE: &str = "Bitcoin Wallet Report";
pub const PLACEHOLDER_LINE: &str = "[Line could not be printed]";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 14.0;
const PT_TO_MM: f32 = 0.3528;

/// Build the body lines, one `label: value` per field.
///
/// Lines the builtin Helvetica encoding cannot carry are swapped for a
/// placeholder so one bad field never sinks the document.
pub fn layout_lines(fields: &[(&str, String)]) -> Vec<String> {
    fields
        .iter()
        .map(|(label, value)| {
            let line = format!("{}: {}", label, value);
            match encode_line(&line) {
                Ok(encoded) => encoded,
                Err(bad) => {
                    tracing::warn!(label, character = %bad.escape_unicode(), "PDF line not encodable");
                    PLACEHOLDER_LINE.to_string()
                }
            }
        })
        .collect()
}

/// Check every character is representable in Latin-1 and printable.
/// Returns the first offending character.
fn encode_line(line: &str) -> Result<String, char> {
    match line
        .chars()
        .find(|&c| !matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF))
    {
        Some(bad) => Err(bad),
        None => Ok(line.to_string()),
    }
}

/// Writes a single-page summary of a report.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    output: PathBuf,
}

impl PdfExporter {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output_path(&self) -> &std::path::Path {
        &self.output
    }

    /// Render the report and write it, returning the file path.
    pub fn export(&self, report: &WalletReport) -> eyre::Result<PathBuf> {
        let lines = layout_lines(&report.fields());

        let (doc, page, layer) =
            PdfDocument::new(TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| eyre::eyre!("Failed to load builtin font: {}", e))?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
        layer.use_text(TITLE, FONT_SIZE_PT, Mm(centered_x(TITLE)), Mm(y), &font);

        // blank gap under the title
        y -= LINE_HEIGHT_MM * 2.0;
        for line in &lines {
            layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
            y -= LINE_HEIGHT_MM;
        }

        let file = File::create(&self.output)
            .map_err(|e| eyre::eyre!("Failed to create PDF '{}': {}", self.output.display(), e))?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| eyre::eyre!("Failed to write PDF '{}': {}", self.output.display(), e))?;

        tracing::info!(path = %self.output.display(), lines = lines.len(), "PDF report exported");
        Ok(self.output.clone())
    }
}

/// Approximate x offset that centres `text` on the page (Helvetica averages
/// about half an em per glyph).
fn centered_x(text: &str) -> f32 {
    let width = text.chars().count() as f32 * FONT_SIZE_PT * 0.5 * PT_TO_MM;
    ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Btc;

    fn report(address: &str) -> WalletReport {
        WalletReport::from_totals(address, Btc::from_sats(250_000_000), Btc::from_sats(50_000_000), 9)
    }

    #[test]
    fn test_layout_one_line_per_field() {
        let lines = layout_lines(&report("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").fields());
        assert_eq!(
            lines,
            vec![
                "Wallet Address: 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
                "Total Received (BTC): 2.50000000",
                "Total Sent (BTC): 0.50000000",
                "Final Balance (BTC): 2.00000000",
                "Total Transactions: 9",
            ]
        );
    }

    #[test]
    fn test_unencodable_field_gets_placeholder() {
        let lines = layout_lines(&report("כתובת-ביטקוין").fields());
        assert_eq!(lines[0], PLACEHOLDER_LINE);
        assert_eq!(lines[1], "Total Received (BTC): 2.50000000");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_latin1_is_encodable() {
        assert!(encode_line("Café: 1").is_ok());
        assert_eq!(encode_line("wallet 🕵️"), Err('🕵'));
    }

    /// Raw bytes of every `Tj` string on the first page.
    fn page_text(path: &std::path::Path) -> Vec<Vec<u8>> {
        let doc = lopdf::Document::load(path).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = lopdf::content::Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .into_iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.into_iter().next() {
                Some(lopdf::Object::String(bytes, _)) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_export_writes_pdf_despite_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("btc_wallet_report.pdf");
        let exporter = PdfExporter::new(&path);

        let written = exporter.export(&report("адрес")).unwrap();
        assert_eq!(written, path);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let text = page_text(&path);
        assert_eq!(text.len(), 6);
        assert_eq!(text[0], TITLE.as_bytes());
        assert_eq!(text[1], PLACEHOLDER_LINE.as_bytes());
        assert_eq!(text[2], b"Total Received (BTC): 2.50000000");
        assert_eq!(text[5], b"Total Transactions: 9");
    }

    #[test]
    fn test_export_writes_latin1_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("btc_wallet_report.pdf");
        PdfExporter::new(&path).export(&report("Café")).unwrap();

        let text = page_text(&path);
        assert_eq!(text[1], b"Wallet Address: Caf\xE9");
    }

    #[test]
    fn test_title_centering_stays_on_page() {
        let x = centered_x(TITLE);
        assert!(x > MARGIN_MM && x < PAGE_WIDTH_MM / 2.0);
    }
}
