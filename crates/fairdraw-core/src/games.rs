//! Game adapters.
//!
//! Each adapter maps one game onto a single selector call and pairs the
//! result with the server seed's commitment, so the round can be audited once
//! the seed is revealed.
//!
//! | Game  | Draw                                     |
//! |-------|------------------------------------------|
//! | Dice  | one value in `[0, 10000]`, read as `/100` |
//! | Wheel | one value in `[1, sectors]`, nonce `0`   |
//! | Mines | `mines` unique cells in `[1, grid]`      |
//! | Cases | one value in `[0, total]`                |

use std::{fmt, ops::RangeInclusive};

use fairdraw_crypto::Hmac256;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{engine::Engine, error::DrawError};

/// Largest dice value, in hundredths.
pub const DICE_MAX_HUNDREDTHS: i64 = 10_000;

/// Nonce used by every wheel spin.
pub const WHEEL_NONCE: u64 = 0;

/// Inputs shared by every game round.
///
/// # Security
///
/// - **Debug Redaction**: The `Debug` impl redacts `server_seed`, which stays
///   secret until the service reveals it.
#[derive(Clone, PartialEq, Eq)]
pub struct Round {
    /// Secret seed chosen by the service.
    pub server_seed: String,
    /// Seed chosen by the user.
    pub client_seed: String,
    /// Per-round counter.
    pub nonce: u64,
}

impl Round {
    /// Create a round from its three inputs.
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self { server_seed: server_seed.into(), client_seed: client_seed.into(), nonce }
    }
}

impl fmt::Debug for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Round")
            .field("server_seed", &format!("<redacted {} bytes>", self.server_seed.len()))
            .field("client_seed", &self.client_seed)
            .field("nonce", &self.nonce)
            .finish()
    }
}

/// Result of a game round, ready to publish.
///
/// Carries everything an auditor needs except the server seed itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome<T> {
    /// Seed chosen by the user.
    pub client_seed: String,
    /// Nonce the round was drawn with.
    pub nonce: u64,
    /// Commitment of the server seed.
    pub commitment: String,
    /// Game-specific result.
    #[serde(flatten)]
    pub result: T,
}

/// Dice roll in `[0.00, 100.00]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Roll value in hundredths.
    pub hundredths: u16,
}

impl DiceRoll {
    /// Roll value as a float, e.g. `42.17`.
    pub fn value(self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl Serialize for DiceRoll {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DiceRoll", 2)?;
        state.serialize_field("hundredths", &self.hundredths)?;
        state.serialize_field("roll", &self.to_string())?;
        state.end()
    }
}

/// Winning wheel sector, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WheelSpin {
    /// Winning sector.
    pub sector: u32,
    /// Number of sectors on the wheel.
    pub sectors: u32,
}

/// Mine placement on a grid of 1-based cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinesLayout {
    /// Mined cells in selector order.
    pub mines: Vec<u32>,
    /// Mined cells in ascending order, for display.
    pub sorted: Vec<u32>,
    /// Number of cells on the grid.
    pub grid: u32,
}

impl MinesLayout {
    /// Whether `cell` holds a mine.
    pub fn is_mine(&self, cell: u32) -> bool {
        self.sorted.binary_search(&cell).is_ok()
    }
}

/// Case value in `[0, total]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseOpen {
    /// Drawn value.
    pub value: i64,
    /// Upper end of the case range.
    pub total: i64,
}

impl<H: Hmac256> Engine<H> {
    /// Rolls a dice value in `[0.00, 100.00]`.
    pub fn dice(&self, round: &Round) -> Result<Outcome<DiceRoll>, DrawError> {
        let value = self.draw_one(0..=DICE_MAX_HUNDREDTHS, round)?;
        let hundredths = narrow(value)?;
        self.outcome(round, DiceRoll { hundredths })
    }

    /// Spins a wheel of `sectors` sectors.
    ///
    /// Wheel spins always use nonce [`WHEEL_NONCE`].
    pub fn wheel(
        &self,
        server_seed: &str,
        client_seed: &str,
        sectors: u32,
    ) -> Result<Outcome<WheelSpin>, DrawError> {
        let round = Round::new(server_seed, client_seed, WHEEL_NONCE);
        let sector = narrow(self.draw_one(1..=i64::from(sectors), &round)?)?;
        self.outcome(&round, WheelSpin { sector, sectors })
    }

    /// Places `mines` mines on a grid of `grid` cells.
    pub fn mines(
        &self,
        round: &Round,
        mines: u32,
        grid: u32,
    ) -> Result<Outcome<MinesLayout>, DrawError> {
        let cells = self.generate_unique_numbers(
            u64::from(mines),
            1..=i64::from(grid),
            &round.server_seed,
            round.nonce,
            &round.client_seed,
        )?;

        let mines = cells.into_iter().map(narrow).collect::<Result<Vec<u32>, _>>()?;
        let mut sorted = mines.clone();
        sorted.sort_unstable();

        self.outcome(round, MinesLayout { mines, sorted, grid })
    }

    /// Opens a case with a value in `[0, total]`.
    pub fn cases(&self, round: &Round, total: i64) -> Result<Outcome<CaseOpen>, DrawError> {
        let value = self.draw_one(0..=total, round)?;
        self.outcome(round, CaseOpen { value, total })
    }

    fn draw_one(&self, range: RangeInclusive<i64>, round: &Round) -> Result<i64, DrawError> {
        self.generate_number(range, &round.server_seed, round.nonce, &round.client_seed)
    }

    /// Pairs `result` with the round's public inputs and the server seed's
    /// commitment.
    pub fn outcome<T>(&self, round: &Round, result: T) -> Result<Outcome<T>, DrawError> {
        Ok(Outcome {
            client_seed: round.client_seed.clone(),
            nonce: round.nonce,
            commitment: self.commit_seed(&round.server_seed)?,
            result,
        })
    }
}

/// Narrows a drawn value to the adapter's integer type.
///
/// Adapter ranges are built from the target type, so this only fails if the
/// selector broke its range contract.
fn narrow<T: TryFrom<i64>>(value: i64) -> Result<T, DrawError> {
    T::try_from(value).map_err(|_| DrawError::Unrepresentable { value })
}
