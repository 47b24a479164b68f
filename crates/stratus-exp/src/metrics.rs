//! Reduction of cloudlet records into scenario-level statistics.

use serde::Serialize;

use stratus_cloud::record::{CloudletRecord, CloudletStatus};

/// Scenario-level statistics derived from one run.
///
/// When no cloudlet completed, every derived metric is zero by definition —
/// the empty case must never surface as a division error or a sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    /// Scenario label.
    pub label: String,
    /// Number of cloudlets requested by the scenario.
    pub requested: u32,
    /// Number of cloudlets that completed successfully.
    pub completed: u32,
    /// Average execution time of completed cloudlets, 0 when none completed.
    pub avg_time: f64,
    /// Minimum execution time, 0 when none completed.
    pub min_time: f64,
    /// Maximum execution time, 0 when none completed.
    pub max_time: f64,
    /// Maximum finish time across completed cloudlets.
    pub makespan: f64,
    /// Completed count divided by makespan, 0 when the makespan is 0.
    pub throughput: f64,
}

impl ScenarioResult {
    /// Result of a scenario that produced nothing (failed run or empty output).
    pub fn empty(label: &str, requested: u32) -> Self {
        aggregate(label, requested, &[])
    }
}

/// Reduces the records of one run into a [`ScenarioResult`].
///
/// Single pass; only successful records contribute. Failed records count
/// neither into `completed` nor into the timing metrics.
pub fn aggregate(label: &str, requested: u32, records: &[CloudletRecord]) -> ScenarioResult {
    let mut completed = 0u32;
    let mut total_time = 0.;
    let mut min_time = f64::MAX;
    let mut max_time = 0.;
    let mut makespan = 0.;

    for record in records {
        if record.status != CloudletStatus::Success {
            continue;
        }
        completed += 1;
        total_time += record.cpu_time;
        if record.cpu_time < min_time {
            min_time = record.cpu_time;
        }
        if record.cpu_time > max_time {
            max_time = record.cpu_time;
        }
        if record.finish_time > makespan {
            makespan = record.finish_time;
        }
    }

    let avg_time = if completed > 0 {
        total_time / completed as f64
    } else {
        0.
    };
    let throughput = if makespan > 0. {
        completed as f64 / makespan
    } else {
        0.
    };

    ScenarioResult {
        label: label.to_string(),
        requested,
        completed,
        avg_time,
        min_time: if completed > 0 { min_time } else { 0. },
        max_time,
        makespan,
        throughput,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_core::Id;

    fn record(cpu_time: f64, start_time: f64) -> CloudletRecord {
        CloudletRecord {
            cloudlet_id: 0,
            status: CloudletStatus::Success,
            datacenter: 1 as Id,
            vm_id: 0,
            cpu_time,
            start_time,
            finish_time: start_time + cpu_time,
        }
    }

    #[test]
    fn aggregates_single_pass_statistics() {
        let records = vec![record(40., 0.), record(20., 0.), record(40., 40.)];
        let result = aggregate("s", 3, &records);
        assert_eq!(result.completed, 3);
        assert!((result.avg_time - 100. / 3.).abs() < 1e-12);
        assert_eq!(result.min_time, 20.);
        assert_eq!(result.max_time, 40.);
        assert_eq!(result.makespan, 80.);
        assert_eq!(result.throughput, 3. / 80.);
    }

    #[test]
    // The zero-default policy: an empty record set yields all-zero metrics,
    // no NaN, no infinity, no panic.
    fn empty_records_yield_zeroed_metrics() {
        let result = aggregate("s", 5, &[]);
        assert_eq!(result.requested, 5);
        assert_eq!(result.completed, 0);
        assert_eq!(result.avg_time, 0.);
        assert_eq!(result.min_time, 0.);
        assert_eq!(result.max_time, 0.);
        assert_eq!(result.makespan, 0.);
        assert_eq!(result.throughput, 0.);
    }

    #[test]
    fn failed_records_are_excluded() {
        let mut failed = record(0., 0.);
        failed.status = CloudletStatus::Failed;
        let records = vec![record(40., 0.), failed];
        let result = aggregate("s", 2, &records);
        assert_eq!(result.completed, 1);
        assert_eq!(result.avg_time, 40.);
        assert!(result.completed <= result.requested);
    }

    #[test]
    fn zero_makespan_yields_zero_throughput() {
        // A degenerate zero-length cloudlet finishing at time 0.
        let records = vec![record(0., 0.)];
        let result = aggregate("s", 1, &records);
        assert_eq!(result.makespan, 0.);
        assert_eq!(result.throughput, 0.);
    }
}
