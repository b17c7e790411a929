use crate::analysis::{AlertKind, AlertSet};

use super::escape_html;

/// One info box per alert, in rule order.
pub fn alert_list(alerts: &AlertSet) -> String {
    alerts
        .iter()
        .map(|alert| {
            let class = match alert.kind {
                AlertKind::NoAnomalies => "alert ok",
                _ => "alert warn",
            };
            format!(
                "<div class=\"{}\" data-kind=\"{}\">{}</div>",
                class,
                alert.kind.as_str(),
                escape_html(&alert.message)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Alert;

    #[test]
    fn test_alert_boxes_in_order() {
        let alerts = vec![Alert::new(AlertKind::HighVolume), Alert::new(AlertKind::PassThrough)];
        let html = alert_list(&alerts);
        let first = html.find("high_volume").unwrap();
        let second = html.find("pass_through").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("alert warn").count(), 2);
    }

    #[test]
    fn test_default_alert_styled_ok() {
        let html = alert_list(&vec![Alert::new(AlertKind::NoAnomalies)]);
        assert!(html.contains("alert ok"));
    }
}
