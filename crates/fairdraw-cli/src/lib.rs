//! Fairdraw command-line auditor.
//!
//! Exposes the draw engine to operators and auditors: compute a round's
//! result, publish a seed commitment, and check a revealed seed against it.
//!
//! ## Architecture
//!
//! ```text
//! fairdraw
//!   ├─ Cli / Command     (clap argument surface)
//!   ├─ run               (dispatch, output formatting)
//!   └─ Engine            (fairdraw-core, HMAC-SHA256)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

use std::{fmt, io::Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
pub use error::CliError;
use fairdraw_core::{CommitmentForm, Draw, Engine, Outcome, Round};
use serde::Serialize;

/// Fewest entropy bytes `new-seed` will produce.
pub const MIN_SEED_BYTES: u16 = 16;

/// Fairdraw verifiable draws
#[derive(Parser, Debug)]
#[command(name = "fairdraw")]
#[command(about = "Verifiable draws for games of chance")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `key: value` lines
    Text,
    /// One JSON document
    Json,
}

/// Commitment keying, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormArg {
    /// Key is seed followed by salt, message is empty
    #[default]
    Canonical,
    /// Key is seed, message is seed followed by salt
    SeedKeyed,
}

impl From<FormArg> for CommitmentForm {
    fn from(form: FormArg) -> Self {
        match form {
            FormArg::Canonical => Self::KeyedBySeedAndSalt,
            FormArg::SeedKeyed => Self::KeyedBySeed,
        }
    }
}

/// Server seed as given on the command line.
///
/// # Security
///
/// - **Debug Redaction**: The `Debug` impl prints only the length, so parsed
///   commands can be logged before the seed is revealed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretSeed(String);

impl SecretSeed {
    /// Seed text.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretSeed {
    fn from(seed: String) -> Self {
        Self(seed)
    }
}

impl fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted {} bytes>", self.0.len())
    }
}

/// Seeds shared by every round.
#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    /// Server seed (secret until revealed)
    #[arg(long, env = "FAIRDRAW_SERVER_SEED", hide_env_values = true)]
    pub server_seed: SecretSeed,

    /// Client seed
    #[arg(long, env = "FAIRDRAW_CLIENT_SEED")]
    pub client_seed: String,
}

/// Seeds plus the per-round nonce.
#[derive(Args, Debug, Clone)]
pub struct RoundArgs {
    /// Server and client seeds
    #[command(flatten)]
    pub seeds: SeedArgs,

    /// Round nonce
    #[arg(long, default_value_t = 0)]
    pub nonce: u64,
}

impl RoundArgs {
    fn round(&self) -> Round {
        Round::new(self.seeds.server_seed.expose(), self.seeds.client_seed.clone(), self.nonce)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw `count` distinct integers from `[lower, upper]`
    Unique {
        /// Round inputs
        #[command(flatten)]
        round: RoundArgs,
        /// Number of values to draw
        #[arg(long)]
        count: u64,
        /// Lower bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        lower: i64,
        /// Upper bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        upper: i64,
    },

    /// Draw one integer from `[lower, upper]`
    Number {
        /// Round inputs
        #[command(flatten)]
        round: RoundArgs,
        /// Lower bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        lower: i64,
        /// Upper bound (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        upper: i64,
    },

    /// Print the commitment of a seed
    Commit {
        /// Seed to commit to
        seed: SecretSeed,
        /// Commitment keying
        #[arg(long, value_enum, default_value_t)]
        form: FormArg,
    },

    /// Check a revealed seed against a published commitment
    Verify {
        /// Revealed seed
        seed: SecretSeed,
        /// Published commitment (hex)
        hash: String,
        /// Commitment keying
        #[arg(long, value_enum, default_value_t)]
        form: FormArg,
    },

    /// Roll dice in [0.00, 100.00]
    Dice {
        /// Round inputs
        #[command(flatten)]
        round: RoundArgs,
    },

    /// Spin a wheel (nonce is always 0)
    Wheel {
        /// Wheel seeds
        #[command(flatten)]
        seeds: SeedArgs,
        /// Number of sectors
        #[arg(long)]
        sectors: u32,
    },

    /// Place mines on a grid
    Mines {
        /// Round inputs
        #[command(flatten)]
        round: RoundArgs,
        /// Number of mines
        #[arg(long)]
        mines: u32,
        /// Number of grid cells
        #[arg(long)]
        grid: u32,
    },

    /// Open a case valued in [0, total]
    Cases {
        /// Round inputs
        #[command(flatten)]
        round: RoundArgs,
        /// Upper end of the case range
        #[arg(long)]
        total: i64,
    },

    /// Generate a fresh server seed from OS entropy
    NewSeed {
        /// Entropy bytes (hex-encoded on output)
        #[arg(
            long,
            default_value_t = 32,
            value_parser = clap::value_parser!(u16).range(i64::from(MIN_SEED_BYTES)..=1024)
        )]
        bytes: u16,
    },
}

/// Result of a command that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Command succeeded.
    Success,
    /// A revealed seed did not match its commitment.
    Mismatch,
}

#[derive(Serialize)]
struct Number {
    value: i64,
}

#[derive(Serialize)]
struct Commitment<'a> {
    commitment: &'a str,
}

#[derive(Serialize)]
struct Verification<'a> {
    valid: bool,
    expected: &'a str,
    published: &'a str,
}

#[derive(Serialize)]
struct NewSeed<'a> {
    server_seed: &'a str,
    commitment: &'a str,
}

/// Runs `cli`, writing the result to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<Status, CliError> {
    let engine = Engine::sha256();
    let format = cli.format;

    match &cli.command {
        Command::Unique { round, count, lower, upper } => {
            let round = round.round();
            let draw = engine.generate_unique_numbers_traced(
                *count,
                *lower..=*upper,
                &round.server_seed,
                round.nonce,
                &round.client_seed,
            )?;
            let outcome = engine.outcome(&round, draw)?;
            emit(out, format, &outcome, |out| {
                let Draw { values, stats } = &outcome.result;
                write_header(out, &outcome)?;
                writeln!(out, "values: {}", join(values))?;
                writeln!(out, "blocks: {}", stats.blocks)?;
                writeln!(out, "rejections: {}", stats.rejections)?;
                writeln!(out, "duplicates: {}", stats.duplicates)?;
                writeln!(out, "inverted: {}", stats.inverted)
            })?;
        },

        Command::Number { round, lower, upper } => {
            let round = round.round();
            let value = engine.generate_number(
                *lower..=*upper,
                &round.server_seed,
                round.nonce,
                &round.client_seed,
            )?;
            let outcome = engine.outcome(&round, Number { value })?;
            emit(out, format, &outcome, |out| {
                write_header(out, &outcome)?;
                writeln!(out, "value: {value}")
            })?;
        },

        Command::Commit { seed, form } => {
            let engine = engine.with_commitment_form((*form).into());
            let commitment = engine.commit_seed(seed.expose())?;
            emit(out, format, &Commitment { commitment: &commitment }, |out| {
                writeln!(out, "{commitment}")
            })?;
        },

        Command::Verify { seed, hash, form } => {
            let engine = engine.with_commitment_form((*form).into());
            let expected = engine.commit_seed(seed.expose())?;
            let valid = expected.eq_ignore_ascii_case(hash.trim());
            tracing::info!(valid, "verified revealed seed");

            let report = Verification { valid, expected: &expected, published: hash.trim() };
            emit(out, format, &report, |out| {
                if valid {
                    writeln!(out, "ok: commitment matches")
                } else {
                    writeln!(out, "mismatch: expected {expected}, published {}", hash.trim())
                }
            })?;

            if !valid {
                return Ok(Status::Mismatch);
            }
        },

        Command::Dice { round } => {
            let outcome = engine.dice(&round.round())?;
            emit(out, format, &outcome, |out| {
                write_header(out, &outcome)?;
                writeln!(out, "roll: {}", outcome.result)
            })?;
        },

        Command::Wheel { seeds, sectors } => {
            let outcome = engine.wheel(seeds.server_seed.expose(), &seeds.client_seed, *sectors)?;
            emit(out, format, &outcome, |out| {
                write_header(out, &outcome)?;
                writeln!(out, "sector: {} of {}", outcome.result.sector, outcome.result.sectors)
            })?;
        },

        Command::Mines { round, mines, grid } => {
            let outcome = engine.mines(&round.round(), *mines, *grid)?;
            emit(out, format, &outcome, |out| {
                write_header(out, &outcome)?;
                writeln!(out, "mines: {}", join(&outcome.result.sorted))
            })?;
        },

        Command::Cases { round, total } => {
            let outcome = engine.cases(&round.round(), *total)?;
            emit(out, format, &outcome, |out| {
                write_header(out, &outcome)?;
                writeln!(out, "value: {} of {}", outcome.result.value, outcome.result.total)
            })?;
        },

        Command::NewSeed { bytes } => {
            let mut entropy = vec![0u8; usize::from(*bytes)];
            getrandom::fill(&mut entropy)
                .map_err(|e| CliError::Entropy { reason: e.to_string() })?;

            let server_seed = hex::encode(entropy);
            let commitment = engine.commit_seed(&server_seed)?;
            let report = NewSeed { server_seed: &server_seed, commitment: &commitment };
            emit(out, format, &report, |out| {
                writeln!(out, "server_seed: {server_seed}")?;
                writeln!(out, "commitment: {commitment}")
            })?;
        },
    }

    Ok(Status::Success)
}

fn emit<T, F>(out: &mut dyn Write, format: Format, value: &T, text: F) -> Result<(), CliError>
where
    T: Serialize,
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, value)?;
            writeln!(out)?;
        },
        Format::Text => text(out)?,
    }
    Ok(())
}

fn write_header<T>(out: &mut dyn Write, outcome: &Outcome<T>) -> std::io::Result<()> {
    writeln!(out, "client_seed: {}", outcome.client_seed)?;
    writeln!(out, "nonce: {}", outcome.nonce)?;
    writeln!(out, "commitment: {}", outcome.commitment)
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}
