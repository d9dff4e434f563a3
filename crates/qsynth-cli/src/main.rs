//! CLI for qsynth: synthetic measurement data for Rabi, T1/T2 and Bell experiments.

mod commands;

use clap::{Args, Parser, Subcommand};
use commands::Format;
use qsynth_core::{BellParams, DecayParams, ExperimentParameters, RabiParams};

#[derive(Parser)]
#[command(name = "qsynth")]
#[command(about = "qsynth: synthetic quantum experiment datasets with shot noise")]
#[command(version = qsynth_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rabi oscillation scan: excited-state probability under a resonant drive
    Rabi {
        #[command(flatten)]
        params: RabiArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// T1 relaxation and T2 coherence decay series
    Decay {
        #[command(flatten)]
        params: DecayArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Bell-state correlations in XX, XY, YX, YY and the CHSH value
    Bell {
        #[command(flatten)]
        params: BellArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate a dataset and run the statistical consistency battery on it.
    /// Exits with status 1 if any check fails.
    Check {
        #[command(subcommand)]
        experiment: CheckExperiment,
    },

    /// Serve datasets over HTTP
    Server {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Reject requests with more time steps than this
        #[arg(long, default_value = "100000")]
        max_time_steps: usize,

        /// Reject requests with more shots than this
        #[arg(long, default_value = "10000000")]
        max_shots: u64,
    },
}

#[derive(Subcommand)]
enum CheckExperiment {
    /// Check a Rabi oscillation dataset
    Rabi {
        #[command(flatten)]
        params: RabiArgs,
        /// Write a markdown report to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Check a T1/T2 decay dataset
    Decay {
        #[command(flatten)]
        params: DecayArgs,
        /// Write a markdown report to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Check a Bell-state dataset
    Bell {
        #[command(flatten)]
        params: BellArgs,
        /// Write a markdown report to this path
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Args)]
struct RabiArgs {
    /// Rabi angular frequency [default: 1.0]
    #[arg(long)]
    omega: Option<f64>,
    /// End of the time grid [default: 10.0]
    #[arg(long)]
    time_max: Option<f64>,
    /// Number of grid points [default: 100]
    #[arg(long)]
    time_steps: Option<usize>,
    /// Gaussian noise standard deviation on the probability [default: 0.1]
    #[arg(long)]
    noise_rate: Option<f64>,
    /// Binomial trials per point [default: 1000]
    #[arg(long)]
    shots: Option<u64>,
    /// Seed for a reproducible dataset
    #[arg(long)]
    seed: Option<u64>,
}

impl From<RabiArgs> for ExperimentParameters {
    fn from(a: RabiArgs) -> Self {
        let d = RabiParams::default();
        RabiParams {
            omega: a.omega.unwrap_or(d.omega),
            time_max: a.time_max.unwrap_or(d.time_max),
            time_steps: a.time_steps.unwrap_or(d.time_steps),
            noise_rate: a.noise_rate.unwrap_or(d.noise_rate),
            shots: a.shots.unwrap_or(d.shots),
            seed: a.seed,
        }
        .into()
    }
}

#[derive(Args)]
struct DecayArgs {
    /// Energy relaxation time [default: 5.0]
    #[arg(long)]
    t1: Option<f64>,
    /// Phase coherence time [default: 3.0]
    #[arg(long)]
    t2: Option<f64>,
    /// End of the time grid [default: 15.0]
    #[arg(long)]
    time_max: Option<f64>,
    /// Number of grid points [default: 100]
    #[arg(long)]
    time_steps: Option<usize>,
    /// Gaussian noise standard deviation on the signal [default: 0.05]
    #[arg(long)]
    noise_rate: Option<f64>,
    /// Binomial trials per point [default: 1000]
    #[arg(long)]
    shots: Option<u64>,
    /// Seed for a reproducible dataset
    #[arg(long)]
    seed: Option<u64>,
}

impl From<DecayArgs> for ExperimentParameters {
    fn from(a: DecayArgs) -> Self {
        let d = DecayParams::default();
        DecayParams {
            t1: a.t1.unwrap_or(d.t1),
            t2: a.t2.unwrap_or(d.t2),
            time_max: a.time_max.unwrap_or(d.time_max),
            time_steps: a.time_steps.unwrap_or(d.time_steps),
            noise_rate: a.noise_rate.unwrap_or(d.noise_rate),
            shots: a.shots.unwrap_or(d.shots),
            seed: a.seed,
        }
        .into()
    }
}

#[derive(Args)]
struct BellArgs {
    /// Measurement phase offset in radians [default: 0.0]
    #[arg(long, allow_negative_numbers = true)]
    theta: Option<f64>,
    /// Gaussian noise standard deviation on each correlation [default: 0.1]
    #[arg(long)]
    noise_rate: Option<f64>,
    /// Joint measurements per basis [default: 10000]
    #[arg(long)]
    shots: Option<u64>,
    /// Seed for a reproducible dataset
    #[arg(long)]
    seed: Option<u64>,
}

impl From<BellArgs> for ExperimentParameters {
    fn from(a: BellArgs) -> Self {
        let d = BellParams::default();
        BellParams {
            theta: a.theta.unwrap_or(d.theta),
            noise_rate: a.noise_rate.unwrap_or(d.noise_rate),
            shots: a.shots.unwrap_or(d.shots),
            seed: a.seed,
        }
        .into()
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Print the dataset's SHA-256 fingerprint to stderr
    #[arg(long)]
    fingerprint: bool,
}

impl OutputArgs {
    fn options(&self) -> commands::OutputOptions<'_> {
        commands::OutputOptions {
            format: self.format,
            pretty: self.pretty,
            path: self.output.as_deref(),
            fingerprint: self.fingerprint,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rabi { params, output } => commands::generate::run(params.into(), &output.options()),
        Commands::Decay { params, output } => {
            commands::generate::run(params.into(), &output.options())
        }
        Commands::Bell { params, output } => commands::generate::run(params.into(), &output.options()),
        Commands::Check { experiment } => match experiment {
            CheckExperiment::Rabi { params, output } => {
                commands::check::run(params.into(), output.as_deref())
            }
            CheckExperiment::Decay { params, output } => {
                commands::check::run(params.into(), output.as_deref())
            }
            CheckExperiment::Bell { params, output } => {
                commands::check::run(params.into(), output.as_deref())
            }
        },
        Commands::Server {
            port,
            host,
            max_time_steps,
            max_shots,
        } => commands::server::run(qsynth_server::ServerConfig {
            host,
            port,
            max_time_steps,
            max_shots,
        }),
    }
}
