use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::{RiskLevel, RiskScore};
use crate::wallet::{LogEntry, WalletReport};

const PIE_SIZE: (u32, u32) = (320, 320);
const METER_SIZE: (u32, u32) = (360, 110);
const HISTORY_SIZE: (u32, u32) = (640, 320);

const TRACK_GRAY: RGBColor = RGBColor(211, 211, 211);
const LOW_GREEN: RGBColor = RGBColor(0, 128, 0);
const CAUTION_ORANGE: RGBColor = RGBColor(255, 165, 0);
const ALERT_RED: RGBColor = RGBColor(220, 20, 60);
const BALANCE_BLUE: RGBColor = RGBColor(31, 119, 180);
const SENT_ORANGE: RGBColor = RGBColor(255, 127, 14);

fn chart_err(e: impl std::fmt::Display) -> eyre::Report {
    eyre::eyre!("Chart rendering failed: {}", e)
}

pub fn risk_color(level: RiskLevel) -> RGBColor {
    match level {
        RiskLevel::Low => LOW_GREEN,
        RiskLevel::Caution => CAUTION_ORANGE,
        RiskLevel::High => ALERT_RED,
    }
}

/// Balance vs. sent, with percentage labels.
///
/// Total received is not a slice, so the two parts do not necessarily add up
/// to anything meaningful. Negative inputs are drawn as zero.
pub fn wallet_pie(report: &WalletReport) -> eyre::Result<String> {
    let sizes = [
        report.final_balance.to_f64().max(0.0),
        report.total_sent.to_f64().max(0.0),
    ];
    let colors = [BALANCE_BLUE, SENT_ORANGE];
    let labels = ["Final Balance", "Total Sent"];

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, PIE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let (w, h) = root.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);

        if sizes.iter().sum::<f64>() <= 0.0 {
            let style = ("sans-serif", 16)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new("Nothing to chart", center, style))
                .map_err(chart_err)?;
        } else {
            let radius = (w.min(h) as f64) * 0.3;
            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
            pie.percentages(("sans-serif", 12).into_font().color(&WHITE));
            root.draw(&pie).map_err(chart_err)?;
        }

        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Horizontal 0–100 bar: gray track, filled portion coloured by level,
/// marker line and percentage label at the score.
pub fn risk_meter(score: RiskScore) -> eyre::Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, METER_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let (w, h) = root.dim_in_pixel();
        let pad = 16i32;
        let span = w as i32 - 2 * pad;
        let x_at = |v: u8| pad + span * v as i32 / 100;

        let bar_top = h as i32 / 2 - 12;
        let bar_bottom = h as i32 / 2 + 18;
        let x = x_at(score.value());

        root.draw(&Rectangle::new(
            [(x_at(0), bar_top), (x_at(100), bar_bottom)],
            TRACK_GRAY.filled(),
        ))
        .map_err(chart_err)?;
        root.draw(&Rectangle::new(
            [(x_at(0), bar_top), (x, bar_bottom)],
            risk_color(score.level()).filled(),
        ))
        .map_err(chart_err)?;
        root.draw(&PathElement::new(
            vec![(x, bar_top - 6), (x, bar_bottom + 6)],
            BLACK.stroke_width(2),
        ))
        .map_err(chart_err)?;

        let label = ("sans-serif", 16)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        root.draw(&Text::new(format!("{}%", score), (x, bar_top - 8), label))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Bar per log entry showing its final balance, in log order.
pub fn balance_history(entries: &[LogEntry]) -> eyre::Result<String> {
    let values: Vec<f64> = entries
        .iter()
        .map(|e| e.report.final_balance.to_f64())
        .collect();

    let mut y_min = values.iter().copied().fold(0.0f64, f64::min);
    let mut y_max = values.iter().copied().fold(0.0f64, f64::max);
    if (y_max - y_min).abs() < f64::EPSILON {
        y_max = y_min + 1.0;
    }
    y_max *= 1.05;
    y_min *= 1.05;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, HISTORY_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(0..values.len().max(1) as i32, y_min..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Log entry")
            .y_desc("Final Balance (BTC)")
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                let x = i as i32;
                let mut bar = Rectangle::new([(x, 0.0), (x + 1, *v)], BALANCE_BLUE.filled());
                bar.set_margin(0, 0, 3, 3);
                bar
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Btc;
    use chrono::NaiveDate;

    fn report(balance: i64, sent: i64) -> WalletReport {
        WalletReport {
            address: "bc1qtest".to_string(),
            total_received: Btc::from_sats(balance + sent),
            total_sent: Btc::from_sats(sent),
            final_balance: Btc::from_sats(balance),
            tx_count: 3,
        }
    }

    #[test]
    fn test_meter_colors_by_level() {
        assert_eq!(risk_color(RiskScore::capped(10).level()).rgb(), LOW_GREEN.rgb());
        assert_eq!(risk_color(RiskScore::capped(40).level()).rgb(), CAUTION_ORANGE.rgb());
        assert_eq!(risk_color(RiskScore::capped(70).level()).rgb(), ALERT_RED.rgb());
    }

    #[test]
    fn test_meter_renders_label() {
        let svg = risk_meter(RiskScore::capped(60)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("60%"));
    }

    #[test]
    fn test_meter_extremes() {
        assert!(risk_meter(RiskScore::capped(0)).unwrap().contains("0%"));
        assert!(risk_meter(RiskScore::capped(100)).unwrap().contains("100%"));
    }

    #[test]
    fn test_pie_renders_both_labels() {
        let svg = wallet_pie(&report(300_000_000, 100_000_000)).unwrap();
        assert!(svg.contains("Final Balance"));
        assert!(svg.contains("Total Sent"));
    }

    #[test]
    fn test_pie_empty_state() {
        let svg = wallet_pie(&report(0, 0)).unwrap();
        assert!(svg.contains("Nothing to chart"));
    }

    #[test]
    fn test_pie_negative_balance_does_not_fail() {
        assert!(wallet_pie(&report(-5, 10)).is_ok());
    }

    #[test]
    fn test_history_chart() {
        let captured_at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let entries: Vec<LogEntry> = [100_000_000, 0, 250_000_000]
            .iter()
            .map(|&b| LogEntry { captured_at, report: report(b, 0) })
            .collect();
        let svg = balance_history(&entries).unwrap();
        assert!(svg.contains("Final Balance (BTC)"));
        assert!(svg.matches("<rect").count() >= 3);
    }
}
