//! Run report rendering.

use crate::metrics::RunReport;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::{Deserialize, Serialize};

/// How the run report is printed once all workers finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    #[value(name = "none")]
    #[serde(rename = "none")]
    Silent,
}

impl ReportFormat {
    /// Render `report`; `Ok(None)` when reporting is disabled.
    pub fn render(self, report: &RunReport) -> Result<Option<String>, serde_json::Error> {
        match self {
            ReportFormat::Table => Ok(Some(format_table(report))),
            ReportFormat::Json => format_json(report).map(Some),
            ReportFormat::Silent => Ok(None),
        }
    }
}

/// Format the run report as a table.
pub fn format_table(report: &RunReport) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Worker", "Executed", "Failed", "Skipped", "Duration", "Ops/sec",
    ]);

    for worker in &report.workers {
        let failed_cell = if worker.failed > 0 {
            Cell::new(format_number(worker.failed)).fg(Color::Red)
        } else {
            Cell::new("0")
        };

        table.add_row(vec![
            Cell::new(worker.worker),
            Cell::new(format_number(worker.executed)),
            failed_cell,
            Cell::new(format_number(worker.skipped)),
            Cell::new(format_duration(worker.elapsed_secs)),
            Cell::new(format!("{:.1}", worker.ops_per_second())),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan),
        Cell::new(format_number(report.total_executed)),
        Cell::new(format_number(report.total_failed)),
        Cell::new(format_number(report.total_skipped)),
        Cell::new(format!("{}*", format_duration(report.wall_clock_secs))),
        Cell::new(format!("{:.1}†", report.aggregate_ops_per_second)),
    ]);

    output.push_str(&format!(
        "Mode: {}  Seed: {}  Workers: {}\n",
        report.mode,
        report.seed,
        report.workers.len()
    ));
    output.push_str(&table.to_string());
    output.push_str("\n* Wall clock (parallel)  † Aggregate throughput\n");
    output
}

/// Format the run report as pretty JSON.
pub fn format_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Format duration in human-readable format.
fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{secs:.2}s")
    } else if secs < 3600.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{}m {:02.0}s", mins as u64, remaining_secs)
    } else {
        let hours = (secs / 3600.0).floor();
        let mins = ((secs - hours * 3600.0) / 60.0).floor();
        format!("{}h {:02}m", hours as u64, mins as u64)
    }
}

/// Format number with thousands separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::WorkerMetrics;
    use chrono::Utc;
    use fuzz_core::Mode;

    fn report() -> RunReport {
        RunReport {
            mode: Mode::Queue,
            seed: 99,
            requested_workers: 2,
            total_executed: 1500,
            total_failed: 3,
            total_skipped: 1,
            wall_clock_secs: 1.25,
            aggregate_ops_per_second: 1200.0,
            started_at: Utc::now(),
            completed_at: Utc::now(),
            workers: vec![
                WorkerMetrics {
                    worker: 0,
                    executed: 1000,
                    failed: 3,
                    skipped: 1,
                    elapsed_secs: 1.25,
                },
                WorkerMetrics {
                    worker: 1,
                    executed: 500,
                    failed: 0,
                    skipped: 0,
                    elapsed_secs: 1.0,
                },
            ],
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5.5), "5.50s");
        assert_eq!(format_duration(65.0), "1m 05s");
        assert_eq!(format_duration(3661.0), "1h 01m");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_table_contains_rows() {
        let output = format_table(&report());
        assert!(output.starts_with("Mode: queue  Seed: 99  Workers: 2\n"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("1,500"));
        assert!(output.contains("1200.0†"));
    }

    #[test]
    fn test_json_round_trips() {
        let json = format_json(&report()).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.workers, report().workers);
        assert_eq!(parsed.mode, Mode::Queue);
    }

    #[test]
    fn test_render_none() {
        assert_eq!(ReportFormat::Silent.render(&report()).unwrap(), None);
        assert!(ReportFormat::Table.render(&report()).unwrap().is_some());
    }
}
