//! Monetary cost of a scenario run.

use serde::Serialize;

use stratus_cloud::record::{CloudletRecord, CloudletStatus};
use stratus_cloud::specs::{CloudletSpec, DatacenterCharacteristics};

/// Byte-based transfer sizes are billed against a per-kilo-unit bandwidth
/// rate; this ratio must be preserved exactly.
const TRANSFER_UNIT_SCALE: f64 = 1000.;

/// Cost of a single cloudlet, split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Execution time priced per compute second.
    pub compute: f64,
    /// Input plus output size priced per bandwidth unit.
    pub transfer: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.compute + self.transfer
    }
}

/// Prices one cloudlet execution.
///
/// Pure arithmetic over already-validated inputs; there are no failure modes.
pub fn cloudlet_cost(
    cpu_time: f64,
    input_size: u64,
    output_size: u64,
    characteristics: &DatacenterCharacteristics,
) -> CostBreakdown {
    CostBreakdown {
        compute: cpu_time * characteristics.cost_per_sec,
        transfer: (input_size + output_size) as f64 * characteristics.cost_per_bw / TRANSFER_UNIT_SCALE,
    }
}

/// Per-cloudlet cost line of a scenario cost report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCost {
    pub cloudlet_id: u32,
    pub breakdown: CostBreakdown,
}

/// Cost of a whole scenario run: per-task lines plus the accumulated total.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CostReport {
    pub tasks: Vec<TaskCost>,
    pub total: f64,
}

impl CostReport {
    /// Prices all successful records of a run.
    ///
    /// Transfer sizes are taken from the submitted cloudlet specs by id;
    /// failed cloudlets consumed nothing and cost nothing.
    pub fn for_run(
        records: &[CloudletRecord],
        cloudlets: &[CloudletSpec],
        characteristics: &DatacenterCharacteristics,
    ) -> Self {
        let mut report = CostReport::default();
        for record in records {
            if record.status != CloudletStatus::Success {
                continue;
            }
            let (input_size, output_size) = cloudlets
                .iter()
                .find(|c| c.id == record.cloudlet_id)
                .map_or((0, 0), |c| (c.input_size, c.output_size));
            let breakdown = cloudlet_cost(record.cpu_time, input_size, output_size, characteristics);
            report.total += breakdown.total();
            report.tasks.push(TaskCost {
                cloudlet_id: record.cloudlet_id,
                breakdown,
            });
        }
        report
    }

    /// Average cost of a completed cloudlet, 0 when none completed.
    pub fn per_task(&self) -> f64 {
        if self.tasks.is_empty() {
            0.
        } else {
            self.total / self.tasks.len() as f64
        }
    }
}
