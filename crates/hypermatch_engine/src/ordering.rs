//! Total order over pending matches.
//!
//! An [`OrderingSpec`] is a chain of (function, direction) pairs applied
//! lexicographically. Ties left after the chain are broken by a key mixed
//! from the match content and the matcher's random seed, and finally by the
//! match content itself so the order is strict.

use std::cmp::Ordering;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hypermatch_foundation::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::match_set::{Match, MatchPtr};

// =============================================================================
// Ordering Spec
// =============================================================================

/// A sort key derived from a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderingFunction {
    /// Expression IDs sorted ascending, compared lexicographically.
    SortedExpressionIds,
    /// Expression IDs sorted descending, compared lexicographically.
    ReverseSortedExpressionIds,
    /// Expression IDs in input term order, compared lexicographically.
    ExpressionIds,
    /// The rule ID.
    RuleId,
}

impl TryFrom<i64> for OrderingFunction {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::SortedExpressionIds),
            1 => Ok(Self::ReverseSortedExpressionIds),
            2 => Ok(Self::ExpressionIds),
            3 => Ok(Self::RuleId),
            _ => Err(Error::invalid_ordering_function(code)),
        }
    }
}

/// Whether an ordering function sorts normally or inverted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderingDirection {
    /// Smallest key first.
    #[default]
    Normal,
    /// Largest key first.
    Reverse,
}

impl TryFrom<i64> for OrderingDirection {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Reverse),
            _ => Err(Error::invalid_ordering_direction(code)),
        }
    }
}

/// Ordered chain of ordering functions.
///
/// The seeded random tiebreak always follows the chain and is never listed
/// in it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderingSpec(Vec<(OrderingFunction, OrderingDirection)>);

impl OrderingSpec {
    /// Creates a spec from typed pairs.
    #[must_use]
    pub fn new(pairs: Vec<(OrderingFunction, OrderingDirection)>) -> Self {
        Self(pairs)
    }

    /// Parses a spec from raw `(function, direction)` codes.
    ///
    /// Function codes: 0 sorted IDs, 1 reverse-sorted IDs, 2 IDs, 3 rule.
    /// Direction codes: 0 normal, 1 reverse.
    ///
    /// # Errors
    /// Returns `InvalidOrderingFunction` or `InvalidOrderingDirection` for
    /// the first unknown code.
    pub fn from_codes(codes: &[(i64, i64)]) -> Result<Self> {
        codes
            .iter()
            .map(|&(function, direction)| {
                Ok((
                    OrderingFunction::try_from(function)?,
                    OrderingDirection::try_from(direction)?,
                ))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Appends a pair.
    #[must_use]
    pub fn then(mut self, function: OrderingFunction, direction: OrderingDirection) -> Self {
        self.0.push((function, direction));
        self
    }

    /// Iterates the pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &(OrderingFunction, OrderingDirection)> {
        self.0.iter()
    }

    /// Returns the number of explicit pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if only the random tiebreak applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Sort Keys
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
struct KeyPart {
    values: Vec<u64>,
    reverse: bool,
}

/// Precomputed position of a match in the total order.
///
/// Keys are only comparable with keys built by the same [`OrderingEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    parts: Vec<KeyPart>,
    tiebreak: u64,
    matched: MatchPtr,
}

impl SortKey {
    /// Returns the match this key orders.
    #[must_use]
    pub fn matched(&self) -> &MatchPtr {
        &self.matched
    }

    /// Returns the seeded random tiebreak value.
    #[must_use]
    pub fn tiebreak(&self) -> u64 {
        self.tiebreak
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.parts.iter().zip(&other.parts) {
            let ord = a.values.cmp(&b.values);
            let ord = if a.reverse { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.tiebreak
            .cmp(&other.tiebreak)
            .then_with(|| self.matched.cmp(&other.matched))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Ordering Engine
// =============================================================================

/// Builds sort keys for one ordering spec and random seed.
#[derive(Clone, Debug)]
pub struct OrderingEngine {
    spec: OrderingSpec,
    seed: u64,
    /// Mixing keys drawn from the seed.
    keys: [u64; 2],
}

impl OrderingEngine {
    /// Creates an engine, drawing the tiebreak mixing keys from `seed`.
    #[must_use]
    pub fn new(spec: OrderingSpec, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        // Odd multiplier keeps the mix a bijection per word
        let keys = [rng.next_u64(), rng.next_u64() | 1];
        Self { spec, seed, keys }
    }

    /// Returns the ordering chain.
    #[must_use]
    pub fn spec(&self) -> &OrderingSpec {
        &self.spec
    }

    /// Returns the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Builds the sort key of a match.
    #[must_use]
    pub fn sort_key(&self, matched: &MatchPtr) -> SortKey {
        let parts = self
            .spec
            .iter()
            .map(|&(function, direction)| KeyPart {
                values: key_values(function, matched),
                reverse: direction == OrderingDirection::Reverse,
            })
            .collect();

        SortKey {
            parts,
            tiebreak: self.tiebreak(matched),
            matched: MatchPtr::clone(matched),
        }
    }

    /// Compares two matches under this engine's total order.
    #[must_use]
    pub fn compare(&self, a: &MatchPtr, b: &MatchPtr) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Returns the seeded tiebreak value of a match.
    ///
    /// Depends only on the seed and the match content.
    #[must_use]
    pub fn tiebreak(&self, matched: &Match) -> u64 {
        let [start, multiplier] = self.keys;
        let words = std::iter::once(u64::from(matched.rule().raw()))
            .chain(std::iter::once(matched.input_expressions().len() as u64))
            .chain(matched.input_expressions().iter().map(|id| id.raw()));

        words.fold(start, |h, word| splitmix64(h ^ word.wrapping_mul(multiplier)))
    }
}

fn key_values(function: OrderingFunction, matched: &Match) -> Vec<u64> {
    let mut ids: Vec<u64> = matched.input_expressions().iter().map(|id| id.raw()).collect();
    match function {
        OrderingFunction::SortedExpressionIds => ids.sort_unstable(),
        OrderingFunction::ReverseSortedExpressionIds => ids.sort_unstable_by(|a, b| b.cmp(a)),
        OrderingFunction::ExpressionIds => {}
        OrderingFunction::RuleId => return vec![u64::from(matched.rule().raw())],
    }
    ids
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// =============================================================================
// Tests
// =============================================================================
