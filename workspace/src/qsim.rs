use std::{
    collections::VecDeque,
    io::{ self, BufRead, Write },
};
use anyhow::{ bail, Context, Result };
use clap::Parser;
use itertools::Itertools;
use nqsim::{ Circuit, ParseMode, StateVector };
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulate a small qubit circuit given one row of gate symbols per qubit.
///
/// Rows use `H`, `X`, and `I`; a digit `d` in row `t` is a controlled-X on
/// qubit `t` with qubit `d` as control. Anything not given on the command
/// line is prompted for on stdin.
#[derive(Debug, Parser)]
#[command(name = "qsim", version)]
struct Cli {
    /// Number of qubits.
    #[arg(short = 'n', long)]
    qubits: Option<usize>,

    /// Initial value of each qubit, most significant first (e.g. `0010`).
    #[arg(short, long)]
    state: Option<String>,

    /// Gate row for one qubit; repeat once per qubit, in order.
    #[arg(short, long = "row", value_name = "ROW")]
    rows: Vec<String>,

    /// Read unknown symbols as `I` and keep only the last digit in a column.
    #[arg(long)]
    lenient: bool,
}

// whitespace-separated tokens from stdin, with a prompt printed before each
// read
struct Prompt<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Prompt<R> {
    fn new(input: R) -> Self { Self { input, pending: VecDeque::new() } }

    fn token(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                bail!("unexpected end of input");
            }
            self.pending.extend(line.split_whitespace().map(String::from));
        }
        Ok(self.pending.pop_front().unwrap_or_default())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = if cli.lenient { ParseMode::Lenient } else { ParseMode::Strict };
    let mut prompt = Prompt::new(io::stdin().lock());

    let n: usize =
        match cli.qubits {
            Some(n) => n,
            None => prompt.token("How many bits? n = ")?
                .parse()
                .context("qubit count must be a non-negative integer")?,
        };
    let init: String =
        match cli.state {
            Some(s) => s,
            None => prompt.token("Enter the value of qbit. = ")?,
        };
    let mut rows = cli.rows;
    if rows.len() < n {
        println!("Enter the circuit.");
        for k in rows.len()..n {
            rows.push(
                prompt.token(&format!("What is the circuit in the row {}? = ", k))?
            );
        }
    }

    let mut state = StateVector::from_bits(&init)
        .context("failed to read the initial state")?;
    if state.num_qubits() != n {
        bail!("initial state has {} qubits; expected {}", state.num_qubits(), n);
    }
    let circuit = Circuit::from_rows(n, rows.as_slice(), mode)
        .context("failed to read the circuit")?;
    info!(qubits = n, depth = circuit.depth(), "running circuit");
    circuit.run(&mut state).context("failed to run the circuit")?;

    println!("result:");
    for a in state.amplitudes().iter() {
        println!("({},{})", a.re, a.im);
    }
    println!("probability:");
    println!("{}", state.probabilities().iter().join(", "));
    Ok(())
}
