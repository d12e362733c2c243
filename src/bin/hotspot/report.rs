//! Terminal report for a tracked hotspot

use chrono::Local;
use console::{measure_text_width, pad_str, Alignment};
use hotspot_tracker::config::ReportConfig;
use hotspot_tracker::{Report, RewardEvent, Status};
use rust_decimal::Decimal;

use crate::style::*;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const COLUMN_GAP: &str = "   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleTier {
    Good,
    Fair,
    Poor,
}

pub fn scale_tier(percent: Decimal) -> ScaleTier {
    if percent >= Decimal::from(75) {
        ScaleTier::Good
    } else if percent >= Decimal::from(50) {
        ScaleTier::Fair
    } else {
        ScaleTier::Poor
    }
}

fn styled_scale(percent: Decimal) -> String {
    let text = format!("{} %", percent.normalize());
    match scale_tier(percent) {
        ScaleTier::Good => style_bold_green(&text),
        ScaleTier::Fair => style_bold_yellow(&text),
        ScaleTier::Poor => style_bold_red(&text),
    }
}

fn styled_status(status: Status) -> String {
    let text = format!("● {}", status);
    if status.is_online() {
        style_green(&text)
    } else {
        style_red(&text)
    }
}

pub fn format_amount(amount: Decimal, decimals: u32, symbol: &str) -> String {
    format!("{:.*} {}", decimals as usize, amount.round_dp(decimals), symbol)
}

fn format_time(event: &RewardEvent) -> String {
    event.time.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

fn render_table(rewards: &[RewardEvent], config: &ReportConfig) -> Vec<String> {
    let rows: Vec<[String; 3]> = rewards
        .iter()
        .map(|r| {
            [
                format_time(r),
                format_amount(r.amount, config.amount_decimals, &config.token_symbol),
                r.kind.clone(),
            ]
        })
        .collect();

    let headers = ["Date", "Reward amount", "Reward type"];
    let mut widths = headers.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }
    let alignments = [Alignment::Left, Alignment::Center, Alignment::Center];

    let line = |cells: [String; 3]| -> String {
        cells
            .iter()
            .zip(widths)
            .zip(alignments.iter())
            .map(|((cell, width), align)| pad_str(cell, width, *align, None).into_owned())
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
    };

    let total_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(style_bold(&line(headers.map(String::from))));
    lines.push("─".repeat(total_width));
    for [date, amount, kind] in rows {
        lines.push(line([date, style_bold(&amount), kind]));
    }
    lines
}

/// Render the whole report as terminal text
pub fn render(report: &Report, config: &ReportConfig) -> String {
    let hotspot = &report.hotspot;
    let mut lines = Vec::new();

    lines.push(format!("Name: {}", style_bold_red(&hotspot.display_name())));
    lines.push(format!("Status: {}", styled_status(hotspot.status)));
    lines.push(format!("Reward scale: {}", styled_scale(hotspot.reward_scale)));
    lines.push(format!("Witnesses: {}", hotspot.witness_count));
    lines.push(String::new());

    lines.extend(render_table(&hotspot.rewards, config));
    if hotspot.rewards.is_empty() {
        lines.push(style_dim("No rewards in this window."));
    }
    lines.push(String::new());

    let total = format_amount(
        hotspot.window_total,
        config.amount_decimals,
        &config.token_symbol,
    );
    let summary = match report.fiat_total {
        Some(fiat) => format!(
            "Total reward in last {}: {} ({:.*}{})",
            report.timespan,
            total,
            config.fiat_decimals as usize,
            fiat.round_dp(config.fiat_decimals),
            report.currency.symbol()
        ),
        None => format!("Total reward in last {}: {}", report.timespan, total),
    };
    lines.push(summary);

    lines.join("\n")
}

pub fn print_report(report: &Report, config: &ReportConfig) {
    println!("{}", render(report, config));
    if report.fiat_total.is_none() {
        print_warning(&format!(
            "No {} price available, fiat total omitted",
            report.currency.code()
        ));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hotspot_tracker::{Currency, Hotspot, HotspotInfo, RewardSummary, Timespan};
    use rust_decimal_macros::dec;

    fn report(rewards: Vec<RewardEvent>, fiat_total: Option<Decimal>) -> Report {
        let total = rewards.iter().map(|r| r.amount).sum();
        let hotspot = Hotspot::new(
            HotspotInfo {
                name: "fancy-red-fox".to_string(),
                status: Status::Online,
                reward_scale: 0.8,
            },
            12,
            RewardSummary { rewards, total },
        );
        Report {
            hotspot,
            timespan: Timespan::Week,
            currency: Currency::Usd,
            price: fiat_total.map(|_| dec!(10)),
            fiat_total,
        }
    }

    fn event(amount: Decimal, kind: &str) -> RewardEvent {
        RewardEvent {
            time: Utc.with_ymd_and_hms(2021, 5, 1, 12, 0, 0).unwrap(),
            amount,
            kind: kind.to_string(),
        }
    }

    #[test]
    fn test_scale_tiers() {
        assert_eq!(scale_tier(dec!(100)), ScaleTier::Good);
        assert_eq!(scale_tier(dec!(75)), ScaleTier::Good);
        assert_eq!(scale_tier(dec!(74.99)), ScaleTier::Fair);
        assert_eq!(scale_tier(dec!(50)), ScaleTier::Fair);
        assert_eq!(scale_tier(dec!(49.99)), ScaleTier::Poor);
        assert_eq!(scale_tier(Decimal::ZERO), ScaleTier::Poor);
    }

    #[test]
    fn test_scale_and_name_use_bold_styles() {
        assert_eq!(styled_scale(dec!(80)), style_bold_green("80 %"));
        assert_eq!(styled_scale(dec!(62.5)), style_bold_yellow("62.5 %"));
        assert_eq!(styled_scale(dec!(12)), style_bold_red("12 %"));

        let text = render(&report(vec![], None), &ReportConfig::default());
        let name_line = text.lines().next().unwrap();
        assert_eq!(name_line, format!("Name: {}", style_bold_red("Fancy Red Fox")));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1), 3, "HNT"), "1.000 HNT");
        assert_eq!(format_amount(dec!(0.04218133), 3, "HNT"), "0.042 HNT");
    }

    #[test]
    fn test_render_report() {
        colored::control::set_override(false);
        let report = report(
            vec![
                event(dec!(1.23456789), "poc_witnesses"),
                event(dec!(0.5), "poc_challengers"),
            ],
            Some(dec!(17.35)),
        );

        let text = render(&report, &ReportConfig::default());
        assert!(text.contains("Name: Fancy Red Fox"));
        assert!(text.contains("Status: ● online"));
        assert!(text.contains("Reward scale: 80 %"));
        assert!(text.contains("Witnesses: 12"));
        assert!(text.contains("1.235 HNT"));
        assert!(text.contains("0.500 HNT"));
        assert!(text.contains("poc_challengers"));
        assert!(text.contains("Total reward in last 7d: 1.735 HNT (17.35$)"));
    }

    #[test]
    fn test_render_empty_without_price() {
        colored::control::set_override(false);
        let report = report(vec![], None);

        let text = render(&report, &ReportConfig::default());
        assert!(text.contains("Reward amount"));
        assert!(text.contains("No rewards in this window."));
        assert!(text.ends_with("Total reward in last 7d: 0.000 HNT"));
    }

    #[test]
    fn test_table_columns_align() {
        colored::control::set_override(false);
        let rewards = vec![
            event(dec!(12.5), "poc_witnesses"),
            event(dec!(0.001), "data_credits"),
        ];

        let lines = render_table(&rewards, &ReportConfig::default());
        assert_eq!(lines.len(), 4);
        let widths: Vec<_> = lines
            .iter()
            .filter(|l| !l.starts_with('─'))
            .map(|l| measure_text_width(l))
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
