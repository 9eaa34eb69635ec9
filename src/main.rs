use clap::Parser;
use indicatif::ProgressBar;
use ode_methods::{
  run_comparison, ComparisonParams, IntegratorType, Point, Problem, Run,
};
use std::error::Error;
use std::io::{self, Write};

#[derive(Parser)]
#[clap(version = "1.0", author = "Ryan G.")]
struct Opts {
  #[clap(short = 'p', long = "problem", value_enum, default_value = "square")]
  problem: Problem,

  #[clap(long = "x0", default_value = "0.0", allow_hyphen_values = true)]
  x_0: f64,

  #[clap(long = "y0", default_value = "1.0", allow_hyphen_values = true)]
  y_0: f64,

  #[clap(
    short = 't',
    long = "target",
    default_value = "1.0",
    allow_hyphen_values = true
  )]
  target: f64,

  #[clap(
    short = 'd',
    long = "delta-x",
    value_delimiter = ',',
    allow_hyphen_values = true,
    default_values = &["0.2", "0.1", "0.05"]
  )]
  delta_x: Vec<f64>,

  #[clap(long = "csv")]
  csv: bool,

  #[clap(short = 'q', long = "quiet")]
  quiet: bool,

  #[clap(subcommand)]
  integrator: Option<IntegratorType>,
}

fn write_csv(out: &mut impl Write, runs: &[Run<f64>]) -> io::Result<()> {
  writeln!(out, "label,delta_x,x,y")?;
  for run in runs {
    let series = run.series();
    for (x, y) in series.xs.iter().zip(&series.ys) {
      writeln!(out, "{},{},{},{}", series.label, series.delta_x, x, y)?;
    }
  }

  Ok(())
}

fn write_summary(out: &mut impl Write, runs: &[Run<f64>]) -> io::Result<()> {
  writeln!(
    out,
    "{:<24} {:>8} {:>6} {:>12} {:>20} {:>12}",
    "method", "delta_x", "steps", "x", "y", "abs error"
  )?;
  for run in runs {
    let last = run.trajectory.last();
    let error = run
      .final_error()
      .map(|error| format!("{:.6e}", error))
      .unwrap_or_else(|| "-".to_owned());
    writeln!(
      out,
      "{:<24} {:>8} {:>6} {:>12.6} {:>20.12} {:>12}",
      run.method.label(),
      run.delta_x,
      run.trajectory.len() - 1,
      last.x,
      last.y,
      error
    )?;
  }

  Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
  env_logger::init();

  let opts: Opts = Opts::parse();

  let params = ComparisonParams {
    problem: opts.problem,
    initial: Point::new(opts.x_0, opts.y_0),
    target: opts.target,
    step_sizes: opts.delta_x,
    methods: opts
      .integrator
      .map(|integrator| vec![integrator])
      .unwrap_or_else(IntegratorType::all),
  };

  let total = params.step_sizes.len() * params.methods.len();
  let p_bar = if opts.quiet {
    ProgressBar::hidden()
  } else {
    ProgressBar::new(total as u64)
  };

  let runs = run_comparison(&params, |_| p_bar.inc(1))?;

  p_bar.finish_and_clear();

  let stdout = io::stdout();
  let mut out = stdout.lock();

  if opts.csv {
    write_csv(&mut out, &runs)?;
  } else {
    write_summary(&mut out, &runs)?;
  }

  Ok(())
}
