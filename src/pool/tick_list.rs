use crate::error::{Error, StateError};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};

/// An initialized liquidity boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub index: i32,
    /// Signed liquidity delta applied when the price crosses this tick
    /// moving upward (negated moving downward).
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
}

impl Tick {
    pub fn new(index: i32, liquidity_net: i128, liquidity_gross: u128) -> Self {
        Self {
            index,
            liquidity_net,
            liquidity_gross,
        }
    }
}

/// The pool's initialized ticks, strictly increasing by index.
///
/// The list is read-only for the lifetime of the owning pool snapshot; a
/// swap never adds or removes boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickList {
    ticks: Vec<Tick>,
}

impl TickList {
    /// Builds a validated tick list.
    ///
    /// Panics if the list is malformed: indices must be sorted, unique,
    /// multiples of `tick_spacing` inside the tick domain, and the
    /// `liquidity_net` values must sum to zero (liquidity added below must
    /// be removed above). A malformed list is a construction bug in the
    /// caller, not a recoverable runtime condition.
    pub fn new(ticks: Vec<Tick>, tick_spacing: i32) -> Self {
        assert!(tick_spacing > 0, "tick spacing must be positive");

        let mut net_sum: i128 = 0;
        for (i, tick) in ticks.iter().enumerate() {
            assert!(
                tick.index >= MIN_TICK && tick.index <= MAX_TICK,
                "tick index outside the valid tick domain"
            );
            assert!(
                tick.index % tick_spacing == 0,
                "tick index not a multiple of the tick spacing"
            );
            if i > 0 {
                assert!(
                    ticks[i - 1].index < tick.index,
                    "tick indices must be sorted and unique"
                );
            }
            net_sum = net_sum
                .checked_add(tick.liquidity_net)
                .expect("liquidity net sum overflow");
        }
        assert!(net_sum == 0, "tick net liquidity must sum to zero");

        Self { ticks }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Looks up the tick at exactly `index`.
    pub fn get_tick(&self, index: i32) -> Result<&Tick, Error> {
        self.ticks
            .binary_search_by_key(&index, |t| t.index)
            .map(|i| &self.ticks[i])
            .map_err(|_| StateError::TickNotFound(index).into())
    }

    /// Returns the nearest initialized tick in the search direction: with
    /// `lte` the greatest tick at or below `from` (price decreasing),
    /// otherwise the least tick strictly above `from` (price increasing).
    /// `None` means the list is exhausted in that direction.
    pub fn next_initialized_tick(&self, from: i32, lte: bool) -> Option<&Tick> {
        let partition = self.ticks.partition_point(|t| t.index <= from);
        if lte {
            partition.checked_sub(1).map(|i| &self.ticks[i])
        } else {
            self.ticks.get(partition)
        }
    }
}
