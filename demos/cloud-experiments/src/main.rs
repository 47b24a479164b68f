use std::time::Instant;

use clap::Parser;

use stratus_exp::experiment::Experiment;
use stratus_exp::plan::ExperimentPlan;
use stratus_exp::presets;

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML experiment plan (runs the built-in suite if omitted)
    #[clap(short, long)]
    plan: Option<String>,

    /// Write the summary table to a CSV file
    #[clap(long)]
    csv: Option<String>,

    /// Simulation random seed
    #[clap(short, long, default_value_t = 123)]
    seed: u64,
}

fn main() {
    init_logger();

    let args = Args::parse();
    let scenarios = match &args.plan {
        Some(path) => match ExperimentPlan::from_file(path) {
            Ok(plan) => plan.scenarios,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => presets::suite(),
    };

    let simulation_start = Instant::now();
    let reporter = Experiment::new(scenarios, args.seed).run();
    println!("{}", reporter.render());

    if let Some(path) = &args.csv {
        if let Err(e) = reporter.save_csv(path) {
            eprintln!("can't write CSV to {}: {}", path, e);
            std::process::exit(1);
        }
    }

    println!("Simulation process time {:.2?}", simulation_start.elapsed());
}
