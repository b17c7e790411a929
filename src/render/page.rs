use crate::analysis::Assessment;
use crate::wallet::{LogEntry, WalletReport};

use super::{alerts, charts, escape_html, table};

const STYLE: &str = r#"
body { font-family: sans-serif; background: #0e1117; color: #fafafa; margin: 0; display: flex; }
aside { width: 240px; padding: 1.5rem; background: #262730; min-height: 100vh; }
main { flex: 1; max-width: 760px; margin: 0 auto; padding: 2rem; }
.block { background: #0e1117; border-radius: 10px; }
button { background: #1f77b4; color: white; font-weight: bold; padding: 10px 20px; border-radius: 8px; border: none; cursor: pointer; }
button:hover { background: #145a86; }
input { width: 100%; padding: 8px; margin: 4px 0 10px; box-sizing: border-box; }
table { border-collapse: collapse; width: 100%; margin-top: 10px; }
th, td { border: 1px solid #333; padding: 6px 10px; text-align: left; }
.columns { display: flex; gap: 1rem; }
.columns > section { flex: 1; }
.alert { padding: 0.8rem; border-radius: 6px; margin-top: 8px; }
.alert.ok { background: #17395c; }
.alert.warn { background: #5c4417; }
.error { background: #5c1717; padding: 0.8rem; border-radius: 6px; }
.panel { padding: 1em; background: #1c1c1c; border-radius: 8px; }
.panel a { color: #00c0ff; }
"#;

fn layout(sidebar: Option<&str>, body: &str) -> String {
    let sidebar = sidebar
        .map(|s| format!("<aside>{}</aside>", s))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>BTC Wallet Analyzer</title><style>{}</style></head>\
         <body>{}<main class=\"block\"><h1>🕵️ Bitcoin Wallet Analyzer</h1>\
         <p>Track and analyze BTC wallet behavior visually.</p>{}</main></body></html>",
        STYLE, sidebar, body
    )
}

fn login_form() -> &'static str {
    "<details><summary>👤 Login</summary>\
     <form method=\"post\" action=\"/login\">\
     <label>Username<input name=\"username\" autocomplete=\"username\"></label>\
     <label>Password<input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label>\
     <button type=\"submit\">Login</button></form></details>"
}

fn address_form(address: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/analyze\">\
         <label>🔗 Enter BTC address:<input name=\"address\" value=\"{}\"></label>\
         <button type=\"submit\">🔍 Analyze Wallet</button></form>",
        escape_html(address)
    )
}

/// Normal mode: address form plus whatever result section the request produced.
pub fn normal_page(address: &str, result: &str) -> String {
    let body = format!("{}{}", address_form(address), result);
    layout(Some(login_form()), &body)
}

/// Full result section for a successful analysis.
pub fn analysis_section(
    report: &WalletReport,
    assessment: &Assessment,
    premium_report_url: &str,
    pdf_href: &str,
) -> eyre::Result<String> {
    let pie = charts::wallet_pie(report)?;
    let meter = charts::risk_meter(assessment.risk)?;

    Ok(format!(
        "<hr><h2>📋 Wallet Report</h2>{table}\
         <hr><div class=\"columns\">\
         <section><h3>📊 Wallet Distribution</h3>{pie}</section>\
         <section><h3>⚠️ Risk Score</h3><div data-risk=\"{score}\" data-level=\"{level}\">{meter}</div></section>\
         </div>\
         <details open><summary>🚨 Suspicious Activity Alerts</summary>{alerts}</details>\
         {panel}{export}",
        table = table::report_table(report),
        pie = pie,
        score = assessment.risk,
        level = assessment.risk.level().as_str(),
        meter = meter,
        alerts = alerts::alert_list(&assessment.alerts),
        panel = premium_panel(premium_report_url),
        export = export_link(pdf_href),
    ))
}

/// Download button, omitted when no PDF was written.
fn export_link(pdf_href: &str) -> String {
    if pdf_href.is_empty() {
        return String::new();
    }
    format!(
        "<hr><h2>📄 Export PDF</h2><a href=\"{}\" download><button type=\"button\">📥 Download PDF</button></a>",
        escape_html(pdf_href)
    )
}

/// Static teaser for the extended report.
fn premium_panel(url: &str) -> String {
    format!(
        "<details><summary>🔓 View Full Report</summary><div class=\"panel\"><ul>\
         <li>🔸 Hourly activity patterns</li>\
         <li>🔸 Value distribution breakdown</li>\
         <li>🔸 Behavioral fingerprints</li>\
         <li>🧭 Moral Index – deviation from responsible norms</li>\
         </ul><a href=\"{}\" target=\"_blank\" rel=\"noopener\">🔐 Get full premium report here</a></div></details>",
        escape_html(url)
    )
}

pub fn error_section(message: &str) -> String {
    format!("<div class=\"error\" role=\"alert\">❌ {}</div>", escape_html(message))
}

/// Admin dashboard. `None` means no readable log exists yet.
pub fn admin_page(entries: Option<&[LogEntry]>) -> eyre::Result<String> {
    let content = match entries {
        Some(entries) if !entries.is_empty() => format!(
            "{}<div class=\"chart\">{}</div>",
            table::log_table(entries),
            charts::balance_history(entries)?
        ),
        _ => "<div class=\"alert warn\">No logs available yet.</div>".to_string(),
    };
    let body = format!("<hr><h2>🛠️ Admin Dashboard</h2>{}", content);
    Ok(layout(None, &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::assess;
    use crate::wallet::Btc;

    #[test]
    fn test_normal_page_prefills_address() {
        let html = normal_page("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", "");
        assert!(html.contains("value=\"1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa\""));
        assert!(html.contains("action=\"/login\""));
        assert!(!html.contains("Admin Dashboard"));
    }

    #[test]
    fn test_address_is_escaped() {
        let html = normal_page("\"><script>", "");
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn test_analysis_section_parts() {
        let report = WalletReport::from_totals("bc1qx", Btc::from_sats(300_000_000), Btc::ZERO, 2);
        let assessment = assess(&report);
        let html = analysis_section(&report, &assessment, "https://example.com/p", "/report.pdf").unwrap();
        assert!(html.contains("Wallet Report"));
        assert!(html.contains("data-risk=\"0\""));
        assert!(html.contains("accumulation_only"));
        assert!(html.contains("https://example.com/p"));
        assert!(html.contains("href=\"/report.pdf\""));
    }

    #[test]
    fn test_no_download_link_without_pdf() {
        let report = WalletReport::from_totals("bc1qx", Btc::from_sats(1), Btc::ZERO, 1);
        let html = analysis_section(&report, &assess(&report), "https://example.com/p", "").unwrap();
        assert!(!html.contains("Download PDF"));
    }

    #[test]
    fn test_admin_page_without_logs() {
        let html = admin_page(None).unwrap();
        assert!(html.contains("No logs available yet."));
        assert!(!html.contains("action=\"/analyze\""));
        assert!(!html.contains("action=\"/login\""));
    }
}
