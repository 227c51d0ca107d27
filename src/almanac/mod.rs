//! Interval remapping over the seed almanac.
//!
//! Every stage of the almanac translates blocks of ids from one category into the next. Instead of
//! mapping ids one by one, whole [`Interval`]s are pushed through a stage, splitting them where a
//! rule only covers part of an interval.

mod parse;

use std::fmt;

use indexmap::{map::Entry, IndexMap};
use rustc_hash::FxHashSet;
use thiserror::Error;

pub use parse::Almanac;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlmanacError {
    #[error("interval bounds are inverted ({lo} > {hi})")]
    InvertedInterval { lo: u64, hi: u64 },
    #[error("interval starting at {start} has length 0")]
    EmptyInterval { start: u64 },
    #[error("interval starting at {start} with length {len} overflows")]
    IntervalOverflow { start: u64, len: u64 },
    #[error("rule maps {from} onto {to} which has a different length")]
    MalformedRule { from: Interval, to: Interval },
    #[error("no stage maps from category `{0}`")]
    UnknownCategory(String),
    #[error("category `{0}` is declared more than once")]
    DuplicateCategory(String),
    #[error("category `{0}` is revisited before reaching the terminal category")]
    CategoryCycle(String),
    #[error("no data: range set is empty")]
    EmptyRangeSet,
    #[error("missing `seeds:` line")]
    MissingSeeds,
    #[error("seed list has an odd number of entries ({0})")]
    UnpairedSeeds(usize),
    #[error("invalid map header `{0}`")]
    InvalidHeader(String),
    #[error("invalid rule line `{0}`")]
    InvalidRuleLine(String),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
}

/// Closed range of ids `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    lo: u64,
    hi: u64,
}

impl Interval {
    pub fn new(lo: u64, hi: u64) -> Result<Self, AlmanacError> {
        if lo > hi {
            return Err(AlmanacError::InvertedInterval { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn singleton(value: u64) -> Self {
        Self { lo: value, hi: value }
    }

    /// The almanac describes ranges by their start and length.
    pub fn from_start_len(start: u64, len: u64) -> Result<Self, AlmanacError> {
        if len == 0 {
            return Err(AlmanacError::EmptyInterval { start });
        }
        let hi = start
            .checked_add(len - 1)
            .ok_or(AlmanacError::IntervalOverflow { start, len })?;
        Ok(Self { lo: start, hi })
    }

    pub fn lo(&self) -> u64 {
        self.lo
    }

    pub fn hi(&self) -> u64 {
        self.hi
    }

    /// Number of ids covered. `u128` so that `[0, u64::MAX]` is representable.
    pub fn size(&self) -> u128 {
        u128::from(self.hi - self.lo) + 1
    }

    fn width(&self) -> u64 {
        self.hi - self.lo
    }

    /// Overlap requires a shared id; `[1, 4]` and `[5, 9]` merely touch.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Intersects `self` with `other` and returns what is left of `self` outside of `other`.
    pub fn intersect_and_subtract(self, other: Interval) -> Split {
        if self.hi < other.lo {
            return Split {
                overlap: None,
                below: Some(self),
                above: None,
            };
        }
        if other.hi < self.lo {
            return Split {
                overlap: None,
                below: None,
                above: Some(self),
            };
        }

        let overlap = Interval {
            lo: self.lo.max(other.lo),
            hi: self.hi.min(other.hi),
        };
        let below = (self.lo < other.lo).then(|| Interval {
            lo: self.lo,
            hi: other.lo - 1,
        });
        let above = (self.hi > other.hi).then(|| Interval {
            lo: other.hi + 1,
            hi: self.hi,
        });
        Split {
            overlap: Some(overlap),
            below,
            above,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Result of [`Interval::intersect_and_subtract`]. `below` and `above` are the remainder pieces on
/// either side of the overlap; a non-overlapping interval ends up whole on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub overlap: Option<Interval>,
    pub below: Option<Interval>,
    pub above: Option<Interval>,
}

impl Split {
    /// Remainder pieces in ascending order.
    pub fn remainder(self) -> impl Iterator<Item = Interval> {
        self.below.into_iter().chain(self.above)
    }
}

/// Translation of the ids in `source` onto `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRule {
    source: Interval,
    target: Interval,
}

impl RangeRule {
    pub fn new(source: Interval, target: Interval) -> Result<Self, AlmanacError> {
        if source.width() != target.width() {
            return Err(AlmanacError::MalformedRule {
                from: source,
                to: target,
            });
        }
        Ok(Self { source, target })
    }

    /// Rule in the almanac's line order: `target_start source_start length`.
    pub fn from_starts(target_start: u64, source_start: u64, len: u64) -> Result<Self, AlmanacError> {
        Self::new(
            Interval::from_start_len(source_start, len)?,
            Interval::from_start_len(target_start, len)?,
        )
    }

    pub fn source(&self) -> Interval {
        self.source
    }

    pub fn target(&self) -> Interval {
        self.target
    }

    // `interval` has to lie within `self.source`.
    fn translate(&self, interval: Interval) -> Interval {
        Interval {
            lo: self.target.lo + (interval.lo - self.source.lo),
            hi: self.target.lo + (interval.hi - self.source.lo),
        }
    }
}

/// Disjoint intervals sorted by their lower bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    intervals: Vec<Interval>,
}

impl RangeSet {
    /// Sorts `intervals` and coalesces the overlapping ones.
    pub fn new(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut sorted: Vec<Interval> = intervals.into_iter().collect();
        sorted.sort_unstable();

        let mut intervals: Vec<Interval> = Vec::with_capacity(sorted.len());
        for interval in sorted {
            match intervals.last_mut() {
                Some(last) if interval.lo <= last.hi => last.hi = last.hi.max(interval.hi),
                _ => intervals.push(interval),
            }
        }
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total number of ids covered.
    pub fn size(&self) -> u128 {
        self.intervals.iter().map(Interval::size).sum()
    }

    pub fn min(&self) -> Option<u64> {
        self.intervals.first().map(Interval::lo)
    }

    /// Pushes every interval through `rules`. The first rule whose source covers an id decides
    /// where it goes; ids no rule covers keep their value.
    pub fn apply_rules(&self, rules: &[RangeRule]) -> RangeSet {
        let mut unmapped = self.intervals.clone();
        let mut mapped = Vec::new();

        for rule in rules {
            let mut remaining = Vec::with_capacity(unmapped.len());
            for interval in unmapped {
                let split = interval.intersect_and_subtract(rule.source);
                if let Some(overlap) = split.overlap {
                    mapped.push(rule.translate(overlap));
                }
                remaining.extend(split.remainder());
            }
            unmapped = remaining;
        }

        // Leftovers stay sorted since each split preserves order, but rules may translate in any
        // direction.
        mapped.sort_unstable();
        RangeSet {
            intervals: merge_ascending(mapped, unmapped),
        }
    }
}

impl FromIterator<Interval> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::new(iter)
    }
}

fn merge_ascending(left: Vec<Interval>, right: Vec<Interval>) -> Vec<Interval> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.lo <= r.lo,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }
    merged
}

/// Rules of one `<source>-to-<target>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    target: String,
    rules: Vec<RangeRule>,
}

impl Stage {
    pub fn new(target: impl Into<String>, rules: Vec<RangeRule>) -> Self {
        Self {
            target: target.into(),
            rules,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn rules(&self) -> &[RangeRule] {
        &self.rules
    }

    /// Returns the remapped set together with the category it now belongs to.
    pub fn apply(&self, ranges: &RangeSet) -> (RangeSet, &str) {
        (ranges.apply_rules(&self.rules), &self.target)
    }
}

/// Stages keyed by their source category, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGraph {
    stages: IndexMap<String, Stage>,
}

impl CategoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, stage: Stage) -> Result<(), AlmanacError> {
        match self.stages.entry(source.into()) {
            Entry::Occupied(entry) => Err(AlmanacError::DuplicateCategory(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(stage);
                Ok(())
            }
        }
    }

    pub fn stage(&self, source: &str) -> Result<&Stage, AlmanacError> {
        self.stages
            .get(source)
            .ok_or_else(|| AlmanacError::UnknownCategory(source.to_string()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Follows the stages from `start` until `terminal` and returns the final set.
    pub fn resolve(
        &self,
        initial: &RangeSet,
        start: &str,
        terminal: &str,
    ) -> Result<RangeSet, AlmanacError> {
        let mut visited = FxHashSet::default();
        let mut category = start;
        let mut ranges = initial.clone();
        while category != terminal {
            if !visited.insert(category) {
                return Err(AlmanacError::CategoryCycle(category.to_string()));
            }
            let (next, target) = self.stage(category)?.apply(&ranges);
            ranges = next;
            category = target;
        }
        Ok(ranges)
    }

    /// Lowest id in the `terminal` category reachable from `initial`.
    pub fn resolve_minimum(
        &self,
        initial: &RangeSet,
        start: &str,
        terminal: &str,
    ) -> Result<u64, AlmanacError> {
        if initial.is_empty() {
            return Err(AlmanacError::EmptyRangeSet);
        }
        self.resolve(initial, start, terminal)?
            .min()
            .ok_or(AlmanacError::EmptyRangeSet)
    }
}
