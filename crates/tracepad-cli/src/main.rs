//! tracepad terminal front-end.
//!
//! Provides the `tracepad` binary. `run` drives the same
//! [`ExecutionController`] the HTTP server uses: it detects input calls,
//! collects values from flags or stdin, submits once, and then shows the
//! output, complexity projection and trace.

mod chart;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use tracepad_core::{ChartSlot, ComplexityReport, InputDetector, Navigation, Session, StepView};
use tracepad_server::backend::HttpExecutionBackend;
use tracepad_server::config::DEFAULT_EXECUTOR_URL;
use tracepad_server::controller::{ExecutionController, RunOutcome, RunStatus};

use crate::chart::TerminalChart;

/// Code playground with trace playback.
#[derive(Parser)]
#[command(name = "tracepad", about = "Code playground with trace playback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run a source file on the execution service.
    Run {
        /// Source file to run.
        #[arg(short, long)]
        file: PathBuf,

        /// Execution service endpoint.
        #[arg(long, env = "TRACEPAD_EXECUTOR_URL", default_value = DEFAULT_EXECUTOR_URL)]
        executor: String,

        /// Input values in order; missing ones are prompted for.
        #[arg(short, long = "input")]
        inputs: Vec<String>,

        /// Print every trace step.
        #[arg(long)]
        trace: bool,

        /// Step through the trace interactively.
        #[arg(short = 'i', long)]
        interactive: bool,
    },

    /// List the input calls detected in a source file.
    Detect {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Project an execution time across input sizes 1..5.
    Project {
        /// Complexity label, e.g. "O(n^2)".
        #[arg(short, long)]
        label: String,

        /// Measured execution time in seconds.
        #[arg(short, long)]
        time: f64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Run {
            file,
            executor,
            inputs,
            trace,
            interactive,
        } => run(&file, executor, inputs, trace, interactive).await,
        Commands::Detect { file } => detect(&file),
        Commands::Project { label, time } => project(&label, time),
    };
    process::exit(exit_code);
}

/// Execute the run subcommand.
///
/// Returns exit code: 0 = success, 1 = program error reported by the
/// sandbox, 2 = transport failure, 3 = I/O or usage error.
async fn run(
    file: &Path,
    executor: String,
    inputs: Vec<String>,
    print_trace: bool,
    interactive: bool,
) -> i32 {
    let code = match read_source(file) {
        Ok(code) => code,
        Err(code) => return code,
    };

    // Checked before dispatch: with no input calls the run never asks.
    let detected = InputDetector::default().detect(&code).len();
    if let Err(e) = assign_inputs(inputs.clone(), detected) {
        eprintln!("Error: {}", e);
        return 3;
    }

    let backend = Arc::new(HttpExecutionBackend::new(executor));
    let controller = ExecutionController::new(Session::default(), backend);

    let status = match controller.run(code).await {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 3;
        }
    };

    let status = match status {
        RunStatus::AwaitingInputs { count } => {
            eprintln!("{} input(s) needed.", count);
            if let Err(e) = collect_inputs(&controller, inputs).await {
                eprintln!("Error: failed to read input: {}", e);
                return 3;
            }
            match controller.submit_inputs().await {
                Ok(status) => status,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return 3;
                }
            }
        }
        settled => settled,
    };

    let (output, complexity, trace_len) = controller
        .read(|s| {
            (
                s.session.output().to_string(),
                s.session.complexity().cloned(),
                s.session.trace().len(),
            )
        })
        .await;

    println!("{}", output);
    if let Some(report) = &complexity {
        if let Err(e) = show_complexity(report) {
            eprintln!("Error: failed to draw chart: {}", e);
            return 3;
        }
    }

    if print_trace {
        let steps = controller.read(|s| s.session.trace().to_vec()).await;
        println!();
        for (i, step) in steps.iter().enumerate() {
            println!("[{}/{}] {}", i + 1, steps.len(), step.content);
        }
    }

    if interactive {
        if trace_len == 0 {
            println!("No trace available.");
        } else if let Err(e) = step_through(&controller).await {
            eprintln!("Error: {}", e);
            return 3;
        }
    }

    match status {
        RunStatus::Settled { outcome, .. } => match outcome {
            RunOutcome::Success => 0,
            RunOutcome::ProgramError => 1,
            RunOutcome::TransportFailure => 2,
        },
        RunStatus::AwaitingInputs { .. } => 3,
    }
}

/// Fills every slot, taking `provided` values in order and prompting on
/// stdin for the rest. Blank values are asked for again.
async fn collect_inputs(controller: &ExecutionController, provided: Vec<String>) -> io::Result<()> {
    let placeholders: Vec<String> = controller
        .read(|s| {
            s.session
                .gate()
                .map(|gate| gate.slots().iter().map(|slot| slot.placeholder.clone()).collect())
                .unwrap_or_default()
        })
        .await;

    let provided = assign_inputs(provided, placeholders.len())?;
    for (index, (placeholder, given)) in placeholders.iter().zip(provided).enumerate() {
        let mut value = given.unwrap_or_default();
        while value.trim().is_empty() {
            value = prompt(&format!("{}: ", placeholder))?;
        }
        if let Err(e) = controller.fill_input(index, value).await {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    }
    Ok(())
}

/// Pairs `--input` values with slots in order. More values than slots is a
/// usage error.
fn assign_inputs(provided: Vec<String>, slots: usize) -> io::Result<Vec<Option<String>>> {
    if provided.len() > slots {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} --input value(s) given but only {} input call(s) detected",
                provided.len(),
                slots
            ),
        ));
    }
    let mut values: Vec<Option<String>> = provided.into_iter().map(Some).collect();
    values.resize(slots, None);
    Ok(values)
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn show_complexity(report: &ComplexityReport) -> io::Result<()> {
    println!();
    println!("{}", report.summary);
    let mut chart = ChartSlot::new(TerminalChart::new(io::stdout()));
    chart.redraw(&report.dataset);
    match chart.host_mut().take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Interactive playback: s/b/f/e (or home/left/right/end), q to quit.
async fn step_through(controller: &ExecutionController) -> io::Result<()> {
    if let Some(view) = controller.read(|s| s.session.current_step()).await {
        print_step(&view);
    }
    loop {
        let line = match prompt("[s]tart [b]ack [f]orward [e]nd [q]uit > ") {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e),
        };
        let command = line.trim().to_ascii_lowercase();
        if command == "q" || command == "quit" {
            return Ok(());
        }
        match Navigation::from_control(&command) {
            Some(nav) => {
                if let Some(view) = controller.navigate(nav).await {
                    print_step(&view);
                }
            }
            None => println!("unknown command '{}'", command),
        }
    }
}

fn print_step(view: &StepView) {
    match &view.kind {
        Some(kind) => println!("{}  ({}) {}", view.indicator, kind, view.content),
        None => println!("{}  {}", view.indicator, view.content),
    }
}

/// Execute the detect subcommand.
fn detect(file: &Path) -> i32 {
    let code = match read_source(file) {
        Ok(code) => code,
        Err(code) => return code,
    };
    let slots = InputDetector::default().detect(&code);
    eprintln!("{}", tracepad_core::detect::summarize(&slots));
    match serde_json::to_string_pretty(&slots) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize slots: {}", e);
            3
        }
    }
}

/// Execute the project subcommand.
fn project(label: &str, time: f64) -> i32 {
    if !time.is_finite() || time < 0.0 {
        eprintln!("Error: time must be a non-negative number, got {}", time);
        return 3;
    }
    let report = ComplexityReport::new(label, time);
    match serde_json::to_string_pretty(&report.points) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize projection: {}", e);
            3
        }
    }
}

/// Reads a source file, mapping failure to exit code 3.
fn read_source(file: &Path) -> Result<String, i32> {
    std::fs::read_to_string(file).map_err(|e| {
        tracing::debug!(path = %file.display(), "source read failed");
        eprintln!("Error: failed to read '{}': {}", file.display(), e);
        3
    })
}
