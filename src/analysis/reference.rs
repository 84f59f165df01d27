//! Static HTML balance reference.
//!
//! A single self-contained page with one table per topic and the insight list
//! underneath. The page is a presentation artifact; nothing reads it back.

use super::{Analysis, AnalysisOptions, FullReport};
use crate::build_info::version_line;
use crate::core::config::BalanceConfig;
use crate::core::error::Result;
use crate::simulator::format_duration;
use std::fs;
use std::path::Path;

const STYLE: &str = "body{font-family:sans-serif;margin:2em;background:#0d1117;color:#c9d1d9}\
table{border-collapse:collapse;margin-bottom:1.5em}\
th,td{border:1px solid #30363d;padding:4px 10px;text-align:right}\
th{background:#161b22}td:first-child,th:first-child{text-align:left}\
h2{color:#58a6ff}.insight{color:#d29922}";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut out = String::from("<table>\n<tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(&cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

fn section<A: Analysis>(analysis: &A, body: String) -> String {
    let mut out = format!("<h2>{}</h2>\n{}", escape(analysis.title()), body);
    if !analysis.insights().is_empty() {
        out.push_str("<ul>\n");
        for insight in analysis.insights() {
            out.push_str(&format!("<li class=\"insight\">{}</li>\n", escape(insight)));
        }
        out.push_str("</ul>\n");
    }
    out
}

fn opt_cost(cost: Option<f64>) -> String {
    cost.map(|c| format!("{:.0}", c)).unwrap_or_else(|| "max".to_string())
}

/// Render every analysis as one HTML page.
pub fn render_reference_html(config: &BalanceConfig, options: &AnalysisOptions) -> String {
    let report = FullReport::build(config, options);
    let mut body = String::new();

    body.push_str(&section(
        &report.protocols,
        table(
            &["Protocol", "Rarity", "Power", "L1 DPS", "Max DPS", "DPS/W", "Cost to max"],
            report
                .protocols
                .rows
                .iter()
                .map(|r| {
                    let first = r.levels.first().map(|s| s.dps).unwrap_or(0.0);
                    let last = r.levels.last().map(|s| s.dps).unwrap_or(0.0);
                    vec![
                        r.protocol.to_string(),
                        r.rarity.name().to_string(),
                        format!("{}W", r.power_draw),
                        format!("{:.1}", first),
                        format!("{:.1}", last),
                        format!("{:.3}", r.dps_per_watt),
                        format!("{:.0}", r.cost_to_max),
                    ]
                })
                .collect(),
        ),
    ));

    body.push_str(&section(
        &report.hash,
        table(
            &["CPU", "Hash/s", "Hash/h", "Offline max", "Next", "Payback"],
            report
                .hash
                .cpu_levels
                .iter()
                .map(|r| {
                    vec![
                        r.level.to_string(),
                        format!("{:.2}", r.hash_per_second),
                        format!("{:.0}", r.hash_per_hour),
                        format!("{:.0}", r.offline_max),
                        opt_cost(r.upgrade_cost),
                        r.payback_seconds.map(format_duration).unwrap_or_else(|| "-".into()),
                    ]
                })
                .collect(),
        ),
    ));

    body.push_str(&section(
        &report.power,
        table(
            &["PSU", "Budget", "Common", "Rare", "Epic", "Legendary", "Next"],
            report
                .power
                .rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.psu_level.to_string(), format!("{}W", r.budget_watts)];
                    cells.extend(r.towers.iter().map(|t| t.to_string()));
                    cells.push(opt_cost(r.upgrade_cost));
                    cells
                })
                .collect(),
        ),
    ));

    body.push_str(&section(
        &report.threat,
        table(
            &["Archetype", "Threshold", "Online", "Offline"],
            report
                .threat
                .unlocks
                .iter()
                .map(|u| {
                    vec![
                        u.archetype.name().to_string(),
                        format!("{:.1}", u.threshold),
                        u.online_seconds.map(format_duration).unwrap_or_else(|| "never".into()),
                        u.offline_seconds.map(format_duration).unwrap_or_else(|| "never".into()),
                    ]
                })
                .collect(),
        ),
    ));

    body.push_str(&section(
        &report.bosses,
        table(
            &["Threat", "Cyberboss HP", "Kill", "Zero-Day HP", "Kill"],
            report
                .bosses
                .cyberboss
                .iter()
                .zip(&report.bosses.zero_day)
                .map(|(c, z)| {
                    vec![
                        format!("{:.0}", c.threat),
                        format!("{:.0}", c.health),
                        format_duration(c.kill_seconds),
                        format!("{:.0}", z.stats.health),
                        format_duration(z.kill_seconds),
                    ]
                })
                .collect(),
        ),
    ));

    body.push_str(&section(
        &report.waves,
        table(
            &["Wave", "Enemies", "HP x", "Delay", "Total HP", "Reward", "Cumulative"],
            report
                .waves
                .rows
                .iter()
                .map(|r| {
                    vec![
                        format!("{}{}", r.wave, if r.boss { " (boss)" } else { "" }),
                        r.enemy_count.to_string(),
                        format!("{:.2}", r.health_multiplier),
                        format!("{:.2}s", r.spawn_delay),
                        format!("{:.0}", r.total_hp),
                        format!("{:.0}", r.hash_reward),
                        format!("{:.0}", r.cumulative_hash),
                    ]
                })
                .collect(),
        ),
    ));

    body.push_str(&section(
        &report.components,
        table(
            &["Component", "Stat", "L1", "Max", "Cost to max"],
            report
                .components
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.name.to_string(),
                        r.stat.to_string(),
                        format!("{:.2}", r.value_at_min),
                        format!("{:.2}", r.value_at_max),
                        format!("{:.0}", r.cost_to_max),
                    ]
                })
                .collect(),
        ),
    ));

    body.push_str(&section(
        &report.loot,
        table(
            &["Difficulty", "Multiplier", "Simulated drops", "Drop rate", "Pity drops"],
            report
                .loot
                .difficulties
                .iter()
                .map(|d| {
                    vec![
                        d.difficulty.name().to_string(),
                        format!("{:.2}x", d.multiplier),
                        d.simulated.drops.to_string(),
                        format!("{:.1}%", d.simulated.drop_rate() * 100.0),
                        d.simulated.pity_drops.to_string(),
                    ]
                })
                .collect(),
        ),
    ));

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Hashguard balance reference</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>Hashguard balance reference</h1>\n<p>{}</p>\n{}</body>\n</html>\n",
        STYLE,
        escape(&version_line()),
        body
    )
}

/// Render the reference page and write it to `path`.
pub fn write_reference(path: &Path, config: &BalanceConfig, options: &AnalysisOptions) -> Result<()> {
    let html = render_reference_html(config, options);
    fs::write(path, html)?;
    tracing::info!(path = %path.display(), "reference written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_options(config: &BalanceConfig) -> AnalysisOptions {
        let mut options = AnalysisOptions::new(config);
        options.loot_kills = 200;
        options
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_page_has_every_section() {
        let config = BalanceConfig::default();
        let html = render_reference_html(&config, &small_options(&config));
        assert!(html.starts_with("<!DOCTYPE html>"));
        for title in ["Protocols", "Hash Economy", "Power Grid", "Threat", "Bosses", "Waves", "Components", "Loot"] {
            assert!(html.contains(&format!("<h2>{}</h2>", title)), "missing {title}");
        }
        assert!(html.contains("hashguard"));
    }

    #[test]
    fn test_write_reference_creates_file() {
        let config = BalanceConfig::default();
        let path = std::env::temp_dir().join(format!("hashguard-reference-{}.html", std::process::id()));
        write_reference(&path, &config, &small_options(&config)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("</html>"));
        std::fs::remove_file(&path).ok();
    }
}
