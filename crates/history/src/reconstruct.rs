//! Backward walk from the current reserves to the reserves at each past event.
//!
//! The only reserve pair known to be accurate is the current one, so events
//! are undone newest-first. Each step is checked: a pair that would go
//! negative means the event stream does not match the pool, and the walk
//! stops there instead of producing nonsense reserves.

use poolchart_domain::{BlockchainEvent, EventType, Side, TokenAmount};
use thiserror::Error;
use tracing::warn;

/// A reversal step that cannot be represented with unsigned reserves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructionError {
    /// Undoing the event would drive a reserve below zero.
    #[error("reserve {side:?} underflows undoing event {index} at {timestamp}")]
    Underflow {
        index: usize,
        timestamp: u64,
        side: Side,
    },
    /// Undoing the event would exceed 256-bit reserves.
    #[error("reserve {side:?} overflows undoing event {index} at {timestamp}")]
    Overflow {
        index: usize,
        timestamp: u64,
        side: Side,
    },
}

/// Reserve state as of one event's timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveSnapshot {
    pub timestamp: u64,
    pub volume: f64,
    pub reserves: [TokenAmount; 2],
}

/// Output of a backward walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReserveHistory {
    /// Ascending by timestamp. When the walk stopped early this only holds
    /// the events newer than the failing one.
    pub snapshots: Vec<ReserveSnapshot>,
    /// Why the walk stopped early, if it did.
    pub truncation: Option<ReconstructionError>,
}

impl ReserveHistory {
    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }
}

/// Asset sold into the pool by a swap.
///
/// An explicit tag from the feed wins. Untagged swaps are classified by
/// magnitude: a larger `amount_in` means slot 0 was sold.
pub fn swap_sold_side(event: &BlockchainEvent) -> Side {
    event.sold.unwrap_or(if event.amount_in > event.amount_out {
        Side::A
    } else {
        Side::B
    })
}

/// Undoes a single event, returning the reserve pair that held before it.
///
/// `index` is the event's position in the caller's slice, carried into
/// the error for diagnostics.
pub fn reverse_event(
    reserves: [TokenAmount; 2],
    event: &BlockchainEvent,
    index: usize,
) -> Result<[TokenAmount; 2], ReconstructionError> {
    let [r0, r1] = reserves;
    let add = |value: TokenAmount, delta: TokenAmount, side: Side| {
        value
            .checked_add(delta)
            .ok_or(ReconstructionError::Overflow {
                index,
                timestamp: event.timestamp,
                side,
            })
    };
    let sub = |value: TokenAmount, delta: TokenAmount, side: Side| {
        value
            .checked_sub(delta)
            .ok_or(ReconstructionError::Underflow {
                index,
                timestamp: event.timestamp,
                side,
            })
    };

    match event.event_type {
        EventType::Swap => match swap_sold_side(event) {
            Side::A => Ok([
                add(r0, event.amount_in, Side::A)?,
                sub(r1, event.amount_out, Side::B)?,
            ]),
            Side::B => Ok([
                sub(r0, event.amount_out, Side::A)?,
                add(r1, event.amount_in, Side::B)?,
            ]),
        },
        EventType::AddLiquidity => Ok([
            sub(r0, event.amount_in, Side::A)?,
            sub(r1, event.amount_out, Side::B)?,
        ]),
        EventType::RemoveLiquidity => Ok([
            add(r0, event.amount_in, Side::A)?,
            add(r1, event.amount_out, Side::B)?,
        ]),
    }
}

/// Reconstructs the reserve pair at every event, given the current pair.
///
/// `events` must be ascending by timestamp; they are undone from last to
/// first. The first failing step ends the walk and is reported in
/// [`ReserveHistory::truncation`].
pub fn reconstruct(current: [TokenAmount; 2], events: &[BlockchainEvent]) -> ReserveHistory {
    let mut working = current;
    let mut snapshots = Vec::with_capacity(events.len());
    let mut truncation = None;

    for (index, event) in events.iter().enumerate().rev() {
        match reverse_event(working, event, index) {
            Ok(prior) => {
                working = prior;
                snapshots.push(ReserveSnapshot {
                    timestamp: event.timestamp,
                    volume: event.volume,
                    reserves: working,
                });
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kept = snapshots.len(),
                    dropped = index + 1,
                    "Event stream inconsistent with current reserves, truncating history"
                );
                truncation = Some(e);
                break;
            }
        }
    }

    snapshots.reverse();
    ReserveHistory {
        snapshots,
        truncation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u64, b: u64) -> [TokenAmount; 2] {
        [TokenAmount::from(a), TokenAmount::from(b)]
    }

    #[test]
    fn test_swap_reversal_by_magnitude() {
        let events = vec![BlockchainEvent::swap(1_000, 100u64, 1u64)];
        let history = reconstruct(pair(1000, 10), &events);

        assert!(!history.is_truncated());
        assert_eq!(history.snapshots.len(), 1);
        assert_eq!(history.snapshots[0].reserves, pair(1100, 9));
        assert_eq!(history.snapshots[0].timestamp, 1_000);
    }

    #[test]
    fn test_swap_reversal_other_direction() {
        let events = vec![BlockchainEvent::swap(1_000, 1u64, 100u64)];
        let history = reconstruct(pair(1000, 10), &events);
        assert_eq!(history.snapshots[0].reserves, pair(900, 11));
    }

    #[test]
    fn test_explicit_side_overrides_magnitude() {
        // Magnitudes alone would say slot 0 was sold.
        let event = BlockchainEvent::swap(1_000, 100u64, 1u64).with_sold(Side::B);
        let prior = reverse_event(pair(1000, 10), &event, 0).unwrap();
        assert_eq!(prior, pair(999, 110));
    }

    #[test]
    fn test_tied_amounts_fall_to_slot_one() {
        let event = BlockchainEvent::swap(0, 5u64, 5u64);
        assert_eq!(swap_sold_side(&event), Side::B);
    }

    #[test]
    fn test_liquidity_reversal() {
        let add = vec![BlockchainEvent::add_liquidity(1, 100u64, 10u64)];
        assert_eq!(reconstruct(pair(500, 50), &add).snapshots[0].reserves, pair(400, 40));

        let remove = vec![BlockchainEvent::remove_liquidity(1, 100u64, 10u64)];
        assert_eq!(
            reconstruct(pair(500, 50), &remove).snapshots[0].reserves,
            pair(600, 60)
        );
    }

    #[test]
    fn test_walk_is_newest_first_and_output_ascending() {
        let events = vec![
            BlockchainEvent::add_liquidity(10, 100u64, 10u64),
            BlockchainEvent::remove_liquidity(20, 50u64, 5u64),
            BlockchainEvent::swap(30, 20u64, 2u64).with_volume(3.5),
        ];
        let history = reconstruct(pair(1000, 100), &events);

        let timestamps: Vec<u64> = history.snapshots.iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![10, 20, 30]);

        // 1000/100 -> undo swap -> 1020/98 -> undo remove -> 1070/103 -> undo add -> 970/93
        assert_eq!(history.snapshots[2].reserves, pair(1020, 98));
        assert_eq!(history.snapshots[1].reserves, pair(1070, 103));
        assert_eq!(history.snapshots[0].reserves, pair(970, 93));
        assert_eq!(history.snapshots[2].volume, 3.5);
    }

    #[test]
    fn test_underflow_truncates_older_history() {
        let events = vec![
            BlockchainEvent::add_liquidity(10, 5_000u64, 1u64),
            BlockchainEvent::swap(20, 10u64, 1u64),
            BlockchainEvent::swap(30, 10u64, 1u64),
        ];
        let history = reconstruct(pair(1000, 10), &events);

        assert_eq!(history.snapshots.len(), 2);
        assert_eq!(history.snapshots[0].timestamp, 20);
        assert_eq!(
            history.truncation,
            Some(ReconstructionError::Underflow {
                index: 0,
                timestamp: 10,
                side: Side::A,
            })
        );
    }

    #[test]
    fn test_empty_events() {
        let history = reconstruct(pair(1, 1), &[]);
        assert!(history.snapshots.is_empty());
        assert!(!history.is_truncated());
    }
}
