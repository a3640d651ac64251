//! Command-line surface of the benchmark driver (spec.md §6).

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Pure add/cancel/replace load with no fills (forces `cross` to 0),
    /// stressing the pool/index/ladder maintenance path in isolation.
    Maintenance,
    /// Honors `--cross` as given, exercising the full crossing path.
    Match,
}

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "Deterministic workload driver for the matching engine")]
pub struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Match)]
    pub mode: Mode,

    #[arg(long, default_value_t = 5_000_000)]
    pub ops: u64,

    #[arg(long, default_value_t = 12345)]
    pub seed: u64,

    /// Percentage (0..100) of submits generated to be immediately
    /// marketable against the opposite book.
    #[arg(long, default_value_t = 30)]
    pub cross: u8,

    #[arg(long, default_value_t = 60)]
    pub add: u8,

    #[arg(long, default_value_t = 25)]
    pub cancel: u8,

    #[arg(long, default_value_t = 15)]
    pub replace: u8,

    /// How often (in ops) to reconcile the driver's live-set tracker
    /// against the engine's own `live_orders()` count.
    #[arg(long, default_value_t = 10_000)]
    pub prune_every: u64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BenchConfigError {
    #[error("--add/--cancel/--replace must sum to 100, got {add} + {cancel} + {replace} = {sum}")]
    InvalidMix {
        add: u8,
        cancel: u8,
        replace: u8,
        sum: u32,
    },
    #[error("--cross must be in 0..=100, got {0}")]
    CrossOutOfRange(u8),
}

impl Args {
    pub fn validate(&self) -> Result<(), BenchConfigError> {
        let sum = self.add as u32 + self.cancel as u32 + self.replace as u32;
        if sum != 100 {
            return Err(BenchConfigError::InvalidMix {
                add: self.add,
                cancel: self.cancel,
                replace: self.replace,
                sum,
            });
        }
        if self.cross > 100 {
            return Err(BenchConfigError::CrossOutOfRange(self.cross));
        }
        Ok(())
    }

    /// Effective cross percentage for the configured mode: maintenance
    /// mode forces pure resting/cancel/replace load.
    pub fn effective_cross(&self) -> u8 {
        match self.mode {
            Mode::Maintenance => 0,
            Mode::Match => self.cross,
        }
    }
}
