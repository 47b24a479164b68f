//! Cross-scenario comparison report.

use std::fmt::Write as FmtWrite;
use std::io;
use std::path::Path;

use stratus_cloud::record::CloudletRecord;

use crate::cost::CostReport;
use crate::metrics::ScenarioResult;
use crate::scenario::LatencyClass;

/// Everything the reporter keeps about one executed scenario.
#[derive(Debug, Clone)]
pub struct ScenarioRow {
    pub result: ScenarioResult,
    /// Nominal VM rate label, the literal `Mixed` for heterogeneous scenarios.
    pub vm_mips: String,
    pub latency: LatencyClass,
    pub hosts_per_dc: u32,
    pub cost: CostReport,
    pub records: Vec<CloudletRecord>,
}

/// Accumulates scenario rows in execution order and renders the comparison.
///
/// Insertion order is the canonical ordering of the summary table.
#[derive(Debug, Default)]
pub struct SummaryReporter {
    rows: Vec<ScenarioRow>,
}

impl SummaryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, row: ScenarioRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ScenarioRow] {
        &self.rows
    }

    /// Renders the full report: per-scenario details, the summary table and
    /// the per-scenario conclusions.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let line = "=".repeat(80);
        writeln!(out, "{}", line).unwrap();
        writeln!(out, "                 CLOUD WORKLOAD EXPERIMENTS - SCENARIO RESULTS").unwrap();
        writeln!(out, "{}", line).unwrap();

        for row in &self.rows {
            self.render_scenario(&mut out, row);
        }

        writeln!(out).unwrap();
        writeln!(out, "{}", line).unwrap();
        writeln!(out, "                              SUMMARY TABLE").unwrap();
        writeln!(out, "{}", line).unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "| Scenario         | Cloudlets | VM MIPS | Latency | Hosts | Avg Time | Makespan | Throughput |"
        )
        .unwrap();
        writeln!(
            out,
            "|------------------|-----------|---------|---------|-------|----------|----------|------------|"
        )
        .unwrap();
        for row in &self.rows {
            let r = &row.result;
            writeln!(
                out,
                "| {:<16} | {:>9} | {:>7} | {:>7} | {:>5} | {:>7.2}s | {:>7.2}s | {:>10.4} |",
                r.label,
                format!("{}/{}", r.completed, r.requested),
                row.vm_mips,
                row.latency.to_string(),
                row.hosts_per_dc,
                r.avg_time,
                r.makespan,
                r.throughput,
            )
            .unwrap();
        }

        writeln!(out).unwrap();
        writeln!(out, "{}", line).unwrap();
        writeln!(out, "                               CONCLUSIONS").unwrap();
        writeln!(out, "{}", line).unwrap();
        for row in &self.rows {
            let r = &row.result;
            if r.completed == 0 {
                writeln!(
                    out,
                    "{}: no cloudlet completed ({} requested), metrics are zeroed",
                    r.label, r.requested
                )
                .unwrap();
                continue;
            }
            writeln!(
                out,
                "{}: {}/{} cloudlets completed, avg {:.2}s, makespan {:.2}s, \
                 throughput {:.4} cloudlets/s, total cost ${:.2}",
                r.label, r.completed, r.requested, r.avg_time, r.makespan, r.throughput, row.cost.total
            )
            .unwrap();
        }
        out
    }

    fn render_scenario(&self, out: &mut String, row: &ScenarioRow) {
        let r = &row.result;
        let line = "-".repeat(80);
        writeln!(out).unwrap();
        writeln!(out, "{}", line).unwrap();
        writeln!(out, "SCENARIO {}", r.label).unwrap();
        writeln!(out, "{}", line).unwrap();
        writeln!(out, "  Cloudlet | Status  | DC | VM | CPU Time | Start    | Finish").unwrap();
        for record in &row.records {
            writeln!(
                out,
                "  {:>8} | {:<7} | {:>2} | {:>2} | {:>7.2}s | {:>7.2}s | {:>7.2}s",
                record.cloudlet_id,
                record.status.to_string(),
                record.datacenter,
                record.vm_id,
                record.cpu_time,
                record.start_time,
                record.finish_time,
            )
            .unwrap();
        }
        writeln!(out, "  Completed cloudlets: {}/{}", r.completed, r.requested).unwrap();
        writeln!(out, "  Average CPU time:    {:.2} s", r.avg_time).unwrap();
        writeln!(out, "  Min / max CPU time:  {:.2} s / {:.2} s", r.min_time, r.max_time).unwrap();
        writeln!(out, "  Makespan:            {:.2} s", r.makespan).unwrap();
        writeln!(out, "  Throughput:          {:.4} cloudlets/s", r.throughput).unwrap();
        for task in &row.cost.tasks {
            writeln!(
                out,
                "  Cloudlet {}: CPU=${:.2} + BW=${:.3} = ${:.3}",
                task.cloudlet_id,
                task.breakdown.compute,
                task.breakdown.transfer,
                task.breakdown.total(),
            )
            .unwrap();
        }
        writeln!(
            out,
            "  Total cost:          ${:.2} (${:.2} per completed cloudlet)",
            row.cost.total,
            row.cost.per_task()
        )
        .unwrap();
    }

    /// Writes the summary table rows as CSV.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "scenario",
            "requested",
            "completed",
            "vm_mips",
            "latency",
            "hosts_per_dc",
            "avg_time",
            "min_time",
            "max_time",
            "makespan",
            "throughput",
            "total_cost",
        ])?;
        for row in &self.rows {
            let r = &row.result;
            csv.write_record([
                r.label.clone(),
                r.requested.to_string(),
                r.completed.to_string(),
                row.vm_mips.clone(),
                row.latency.to_string(),
                row.hosts_per_dc.to_string(),
                r.avg_time.to_string(),
                r.min_time.to_string(),
                r.max_time.to_string(),
                r.makespan.to_string(),
                r.throughput.to_string(),
                row.cost.total.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Saves the summary table to a CSV file.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> csv::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregate;

    fn row(label: &str, vm_mips: &str) -> ScenarioRow {
        ScenarioRow {
            result: aggregate(label, 5, &[]),
            vm_mips: vm_mips.to_string(),
            latency: LatencyClass::Normal,
            hosts_per_dc: 1,
            cost: CostReport::default(),
            records: Vec::new(),
        }
    }

    #[test]
    fn summary_table_preserves_insertion_order() {
        let mut reporter = SummaryReporter::new();
        reporter.add(row("b-second", "250"));
        reporter.add(row("a-first", "Mixed"));
        let text = reporter.render();
        let second = text.find("| b-second").unwrap();
        let first = text.find("| a-first").unwrap();
        assert!(second < first);
        assert!(text.contains("Mixed"));
    }

    #[test]
    fn failed_scenarios_render_as_zeroed_rows() {
        let mut reporter = SummaryReporter::new();
        reporter.add(row("failed", "250"));
        let text = reporter.render();
        assert!(text.contains("no cloudlet completed (5 requested)"));
        assert!(text.contains("|       0/5 |"));
    }

    #[test]
    fn csv_export_contains_one_line_per_scenario() {
        let mut reporter = SummaryReporter::new();
        reporter.add(row("one", "250"));
        reporter.add(row("two", "Mixed"));
        let mut buffer = Vec::new();
        reporter.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("scenario,requested,completed"));
        assert!(lines[2].starts_with("two,5,0,Mixed"));
    }
}
