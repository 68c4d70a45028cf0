//! Temporal sequences and sequence sets.

use super::{BaseType, Flags, Interpolation, TInstant, TimestampTz};
use crate::util::{Error, Result};

/// Ordered, non-empty list of instants sharing one base type.
#[derive(Clone, Debug, PartialEq)]
pub struct TSequence {
    instants: Vec<TInstant>,
    lower_inc: bool,
    upper_inc: bool,
    interp: Interpolation,
}

impl TSequence {
    /// Build a sequence, validating its invariants.
    ///
    /// Timestamps must be strictly increasing; all instants must share the
    /// base type and the point dimensionality of the first one.
    pub fn make(
        instants: Vec<TInstant>,
        lower_inc: bool,
        upper_inc: bool,
        interp: Interpolation,
    ) -> Result<Self> {
        let first = instants
            .first()
            .ok_or_else(|| Error::invalid_temporal("a sequence must have at least one instant"))?;
        let base = first.base_type();
        let flags = first.flags();

        match interp {
            Interpolation::None => {
                return Err(Error::invalid_temporal("a sequence needs an interpolation"));
            }
            Interpolation::Linear if !base.is_continuous() => {
                return Err(Error::invalid_temporal(format!(
                    "linear interpolation is not valid for {}",
                    base
                )));
            }
            Interpolation::Discrete if !(lower_inc && upper_inc) => {
                return Err(Error::invalid_temporal("discrete sequences have inclusive bounds"));
            }
            _ => {}
        }
        if instants.len() == 1 && !(lower_inc && upper_inc) {
            return Err(Error::invalid_temporal("a single-instant sequence has inclusive bounds"));
        }

        for (i, inst) in instants.iter().enumerate().skip(1) {
            if inst.base_type() != base {
                return Err(Error::invalid_temporal(format!(
                    "instant {} is {}, sequence is {}",
                    i,
                    inst.base_type(),
                    base
                )));
            }
            if inst.flags() != flags {
                return Err(Error::invalid_temporal(format!(
                    "instant {} has different point dimensionality",
                    i
                )));
            }
            let prev = instants[i - 1].t();
            if inst.t() <= prev {
                return Err(Error::invalid_temporal(format!(
                    "timestamps must increase: {} after {}",
                    inst.t(),
                    prev
                )));
            }
        }

        Ok(Self { instants, lower_inc, upper_inc, interp })
    }

    /// Build a sequence from instants already known to be valid.
    pub(crate) fn from_instants_unchecked(
        instants: Vec<TInstant>,
        lower_inc: bool,
        upper_inc: bool,
        interp: Interpolation,
    ) -> Self {
        Self { instants, lower_inc, upper_inc, interp }
    }

    #[inline]
    pub fn instants(&self) -> &[TInstant] {
        &self.instants
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.instants.len()
    }

    #[inline]
    pub fn instant_n(&self, n: usize) -> Option<&TInstant> {
        self.instants.get(n)
    }

    #[inline]
    pub fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    #[inline]
    pub fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interp
    }

    pub fn base_type(&self) -> BaseType {
        self.instants[0].base_type()
    }

    pub fn flags(&self) -> Flags {
        self.instants[0].flags().with_interpolation(self.interp)
    }

    pub fn start_timestamp(&self) -> TimestampTz {
        self.instants[0].t()
    }

    pub fn end_timestamp(&self) -> TimestampTz {
        self.instants[self.instants.len() - 1].t()
    }
}

/// Ordered list of disjoint sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct TSequenceSet {
    sequences: Vec<TSequence>,
}

impl TSequenceSet {
    /// Build a sequence set; sequences must be ordered, disjoint and
    /// share base type and interpolation.
    pub fn make(sequences: Vec<TSequence>) -> Result<Self> {
        let first = sequences
            .first()
            .ok_or_else(|| Error::invalid_temporal("a sequence set must have at least one sequence"))?;
        let base = first.base_type();
        let flags = first.flags();

        for (i, pair) in sequences.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.base_type() != base || next.flags() != flags {
                return Err(Error::invalid_temporal(format!(
                    "sequence {} differs in base type or flags",
                    i + 1
                )));
            }
            let overlaps = next.start_timestamp() < prev.end_timestamp()
                || (next.start_timestamp() == prev.end_timestamp()
                    && prev.upper_inc()
                    && next.lower_inc());
            if overlaps {
                return Err(Error::invalid_temporal(format!(
                    "sequence {} overlaps its predecessor",
                    i + 1
                )));
            }
        }

        Ok(Self { sequences })
    }

    #[inline]
    pub fn sequences(&self) -> &[TSequence] {
        &self.sequences
    }

    #[inline]
    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Total instant count over all sequences.
    pub fn count(&self) -> usize {
        self.sequences.iter().map(TSequence::count).sum()
    }

    pub fn instant_n(&self, mut n: usize) -> Option<&TInstant> {
        for seq in &self.sequences {
            if n < seq.count() {
                return seq.instant_n(n);
            }
            n -= seq.count();
        }
        None
    }

    pub fn base_type(&self) -> BaseType {
        self.sequences[0].base_type()
    }

    pub fn flags(&self) -> Flags {
        self.sequences[0].flags()
    }
}
