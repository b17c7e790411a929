use crate::wallet::{report, LogEntry, WalletReport};

use super::escape_html;

/// Two-column label/value table for a single report.
pub fn report_table(report: &WalletReport) -> String {
    let rows: String = report
        .fields()
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><th scope=\"row\">{}</th><td>{}</td></tr>",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect();

    format!(
        "<table class=\"report\"><thead><tr><th></th><th>Value</th></tr></thead><tbody>{}</tbody></table>",
        rows
    )
}

/// Full dump of the wallet log, one row per entry in file order.
pub fn log_table(entries: &[LogEntry]) -> String {
    let header: String = [
        "Date",
        report::LABEL_ADDRESS,
        report::LABEL_RECEIVED,
        report::LABEL_SENT,
        report::LABEL_BALANCE,
        report::LABEL_TX_COUNT,
    ]
    .iter()
    .map(|h| format!("<th>{}</th>", escape_html(h)))
    .collect();

    let rows: String = entries
        .iter()
        .map(|entry| {
            let cells: String = std::iter::once(entry.captured_at.format("%Y-%m-%d %H:%M:%S").to_string())
                .chain(entry.report.fields().into_iter().map(|(_, value)| value))
                .map(|cell| format!("<td>{}</td>", escape_html(&cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        "<table class=\"log\"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        header, rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Btc;
    use chrono::NaiveDate;

    fn sample() -> WalletReport {
        WalletReport::from_totals("bc1q<odd>", Btc::from_sats(100_000_000), Btc::from_sats(1), 2)
    }

    #[test]
    fn test_report_table_has_every_field() {
        let html = report_table(&sample());
        assert_eq!(html.matches("<tr><th scope=\"row\">").count(), 5);
        assert!(html.contains("<td>1.00000000</td>"));
        assert!(html.contains("<td>0.99999999</td>"));
        assert!(html.contains("bc1q&lt;odd&gt;"));
        assert!(!html.contains("<odd>"));
    }

    #[test]
    fn test_log_table_rows() {
        let captured_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap();
        let entries = vec![
            LogEntry { captured_at, report: sample() },
            LogEntry { captured_at, report: sample() },
        ];
        let html = log_table(&entries);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<td>2024-05-01 12:30:05</td>"));
        assert!(html.contains("<th>Final Balance (BTC)</th>"));
    }
}
