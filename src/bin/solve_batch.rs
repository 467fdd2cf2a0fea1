//! Solve every row of a CSV file of calculator inputs
//!
//! Input columns: Mode,PV,FV,PMT,EAR,YRS,Frequency (EAR in percent, the
//! unknown column may be blank). Output columns: Row,Mode,Value,Display,Error.
//! Row counts data rows from 1 below the header. Rows that fail to parse are
//! written with their error like rows that fail to solve.
//! Solver settings come from TVM_* environment variables.

use anyhow::{anyhow, Context};
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tvm_calculator::inputs::load_requests;
use tvm_calculator::ScenarioRunner;

#[derive(Parser, Debug)]
#[command(name = "solve_batch", about = "Solve a CSV batch of TVM requests")]
struct Args {
    /// Input CSV file
    input: PathBuf,

    /// Output CSV file
    #[arg(default_value = "tvm_batch_output.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    println!("Loading requests from {}...", args.input.display());
    let rows = load_requests(&args.input)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    println!("Loaded {} requests in {:?}", rows.len(), start.elapsed());

    let runner = ScenarioRunner::from_env();

    let solve_start = Instant::now();
    let results: Vec<_> = rows
        .par_iter()
        .map(|row| match &row.request {
            Ok(request) => runner.run(request),
            Err(e) => Err(e.clone()),
        })
        .collect();
    println!("Solved in {:?}", solve_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    writer.write_record(["Row", "Mode", "Value", "Display", "Error"])?;

    let mut failures = 0usize;
    for (row, result) in rows.iter().zip(&results) {
        match result {
            Ok(solution) => {
                writer.write_record([
                    row.row.to_string(),
                    row.mode.clone(),
                    format!("{:.10}", solution.value),
                    solution.display_value(),
                    String::new(),
                ])?;
            }
            Err(err) => {
                failures += 1;
                log::warn!("Row {} ({}) failed: {}", row.row, row.mode, err);
                writer.write_record([
                    row.row.to_string(),
                    row.mode.clone(),
                    String::new(),
                    String::new(),
                    format!("{}: {}", err.kind(), err),
                ])?;
            }
        }
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Requests: {}", rows.len());
    println!("  Solved:   {}", rows.len() - failures);
    println!("  Failed:   {}", failures);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
