use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Seed for deterministic piece sequencing.
///
/// A 128-bit (16-byte) seed for the bag generator's random number
/// generator. The same seed produces the same piece sequence, enabling
/// reproducible gameplay for debugging and deterministic tests.
///
/// Serializes as a 32-character hex string.
///
/// # Example
///
/// ```
/// use gridfall_engine::{BagSeed, SevenBagGenerator};
/// use rand::Rng as _;
///
/// let seed: BagSeed = rand::rng().random();
/// let mut first = SevenBagGenerator::with_seed(seed);
/// let mut second = SevenBagGenerator::with_seed(seed);
/// assert_eq!(first.take(), second.take());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BagSeed(pub(crate) [u8; 16]);

impl Serialize for BagSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        serializer.serialize_str(&format!("{num:032x}"))
    }
}

impl<'de> Deserialize<'de> for BagSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<BagSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BagSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BagSeed(seed)
    }
}

/// Randomized, repeating sequencer over the piece catalog (7-bag).
///
/// Keeps a shuffled working copy of the seven catalog keys and a cursor.
/// Within any single pass each kind is drawn exactly once; when the cursor
/// reaches the end of the bag, the whole bag is reshuffled in place
/// (Fisher-Yates) and the cursor resets. There is no ordering guarantee
/// across pass boundaries beyond each boundary starting a fresh uniform
/// permutation.
#[derive(Debug, Clone)]
pub struct SevenBagGenerator {
    rng: Pcg32,
    bag: [PieceKind; PieceKind::LEN],
    cursor: usize,
}

impl Default for SevenBagGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SevenBagGenerator {
    /// Creates a generator with a random seed. The bag is shuffled at
    /// construction, so [`SevenBagGenerator::peek`] is valid immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`SevenBagGenerator::new`], but deterministic.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            bag: PieceKind::ALL,
            cursor: 0,
        };
        this.refill();
        this
    }

    /// Reshuffles the bag in place and resets the cursor.
    fn refill(&mut self) {
        self.cursor = 0;
        self.bag.shuffle(&mut self.rng);
    }

    /// The kind the next [`SevenBagGenerator::take`] will return, without
    /// advancing. Used for the next-piece preview.
    #[must_use]
    pub fn peek(&self) -> PieceKind {
        self.bag[self.cursor]
    }

    /// Draws the kind at the cursor and advances, refilling the bag when
    /// the pass completes.
    pub fn take(&mut self) -> PieceKind {
        let kind = self.bag[self.cursor];
        self.cursor += 1;
        if self.cursor == self.bag.len() {
            self.refill();
        }
        kind
    }
}
