//! TVM Calculator CLI
//!
//! Solves one variable from the other four and prints the value and the
//! yearly balance series. Field values are given as the form would hold
//! them: the rate is a percentage and the unknown field may be omitted.

use anyhow::Context;
use clap::Parser;
use tvm_calculator::{FieldValues, SolverConfig, TvmSolver, Unknown};

#[derive(Parser, Debug)]
#[command(name = "tvm_calculator", version, about = "Solve for one time-value-of-money variable")]
struct Cli {
    /// Variable to solve for: fv, pv, ear, pmt or yrs
    #[arg(long, default_value = "fv", value_parser = parse_mode)]
    mode: Unknown,

    /// Present value (starting balance)
    #[arg(long, default_value = "10000")]
    pv: String,

    /// Future value (target balance)
    #[arg(long, default_value = "0")]
    fv: String,

    /// Payment added at the end of every period
    #[arg(long, default_value = "0")]
    pmt: String,

    /// Annual rate in percent
    #[arg(long, default_value = "5")]
    ear: String,

    /// Term in years
    #[arg(long, default_value = "10")]
    yrs: String,

    /// Compounding periods per year
    #[arg(long, default_value = "12")]
    frequency: String,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Iteration cap for the rate and term solvers
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Decimal places kept on series balances
    #[arg(long)]
    series_decimals: Option<u32>,
}

fn parse_mode(s: &str) -> Result<Unknown, String> {
    s.parse::<Unknown>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Environment first, flags override
    let mut config = SolverConfig::from_env();
    if let Some(max_iterations) = cli.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    if let Some(decimals) = cli.series_decimals {
        config = config.with_series_decimals(decimals);
    }

    let fields = FieldValues {
        pv: cli.pv,
        fv: cli.fv,
        pmt: cli.pmt,
        ear: cli.ear,
        yrs: cli.yrs,
        frequency: cli.frequency,
    };

    let inputs = fields.parse(cli.mode).context("Invalid calculator inputs")?;
    let solution = TvmSolver::new(config)
        .solve(&inputs, cli.mode)
        .with_context(|| format!("Failed to solve for {}", cli.mode))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution.report())?);
        return Ok(());
    }

    println!("TVM Calculator v{}", env!("CARGO_PKG_VERSION"));
    println!("====================\n");

    let solved = &solution.inputs;
    println!("Solved for: {}", solution.unknown);
    println!("  PV:        {:.2}", solved.present_value);
    println!("  FV:        {:.2}", solved.future_value);
    println!("  PMT:       {:.2}", solved.payment);
    println!("  EAR:       {:.4}%", solved.annual_rate * 100.0);
    println!("  YRS:       {:.4}", solved.years);
    println!("  Frequency: {}/year", solved.frequency);
    println!("  Periodic rate: {:.8}", solution.periodic_rate);
    println!("  Periods:       {:.4}", solution.period_count);
    println!();
    println!("{} = {}", solution.unknown, solution.display_value());
    println!();

    println!("{:>8} {:>10} {:>16}", "Period", "Label", "Balance");
    println!("{}", "-".repeat(36));
    for sample in solution.series() {
        println!(
            "{:>8} {:>10} {:>16.*}",
            sample.period_index,
            sample.label.to_string(),
            solution.series_decimals as usize,
            sample.balance
        );
    }

    Ok(())
}
