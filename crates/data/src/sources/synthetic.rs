use super::now_ms;
use poolchart_domain::{BlockchainEvent, Side, Timeframe, TokenAmount};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Raw units per whole unit of reported volume.
const VOLUME_SCALE: f64 = 1e7;
/// Rough ledger close time, for made-up block numbers.
const LEDGER_CLOSE_MS: u64 = 5_000;

/// Stable 64-bit FNV-1a hash.
fn fnv1a(input: &str) -> u64 {
    input
        .bytes()
        .fold(FNV_OFFSET, |hash, b| (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// SplitMix64 finalizer, spreads consecutive indices across the seed space.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Deterministic pool activity for running the pipeline without an indexer.
///
/// Event `i` of a pool depends only on the seed, the pool address and `i`,
/// so histories are reproducible and comparable across runs. Not meant to
/// resemble any real market.
#[derive(Debug, Clone)]
pub struct SyntheticEvents {
    seed: u64,
    anchor_ms: Option<u64>,
    min_amount: u64,
    max_amount: u64,
}

impl SyntheticEvents {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            anchor_ms: None,
            min_amount: 100_000,
            max_amount: 100_000_000,
        }
    }

    /// Pins the end of every window instead of using the wall clock.
    #[must_use]
    pub fn anchored_at(mut self, end_ms: u64) -> Self {
        self.anchor_ms = Some(end_ms);
        self
    }

    /// Bounds raw event amounts to `[min, max)`.
    #[must_use]
    pub fn with_amount_range(mut self, min: u64, max: u64) -> Self {
        self.min_amount = min.max(1);
        self.max_amount = max.max(self.min_amount + 1);
        self
    }

    /// Smallest reserve on either side that a full window of this source's
    /// events can never drive below zero.
    pub fn min_safe_reserve(&self, timeframe: Timeframe) -> TokenAmount {
        // swaps take out at most twice the largest amount in
        let per_event = u128::from(self.max_amount) * 2;
        TokenAmount::from(per_event * timeframe.event_count() as u128)
    }

    pub fn events(&self, pool_address: &str, timeframe: Timeframe) -> Vec<BlockchainEvent> {
        let end_ms = self.anchor_ms.unwrap_or_else(now_ms);
        self.generate(pool_address, timeframe, end_ms)
    }

    /// Events for the window `[end_ms - window, end_ms)`.
    pub fn generate(
        &self,
        pool_address: &str,
        timeframe: Timeframe,
        end_ms: u64,
    ) -> Vec<BlockchainEvent> {
        let pool_seed = self.seed ^ fnv1a(pool_address);
        let start_ms = end_ms.saturating_sub(timeframe.window_ms());
        let first_block = start_ms / LEDGER_CLOSE_MS;

        (0..timeframe.event_count())
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(pool_seed ^ mix(i as u64));
                let timestamp = start_ms + i as u64 * timeframe.spacing_ms();
                self.event_at(&mut rng, timestamp)
                    .with_tx(tx_hash(&mut rng), first_block + i as u64)
            })
            .collect()
    }

    fn event_at(&self, rng: &mut StdRng, timestamp: u64) -> BlockchainEvent {
        let amount_in = rng.random_range(self.min_amount..self.max_amount);
        let ratio: f64 = rng.random_range(0.5..2.0);
        let amount_out = ((amount_in as f64 * ratio) as u64).max(1);
        let volume = amount_in as f64 / VOLUME_SCALE;
        let impact: f64 = rng.random_range(-0.005..0.005);

        let event = match rng.random_range(0..100u8) {
            0..80 => {
                let sold = if rng.random_bool(0.5) { Side::A } else { Side::B };
                BlockchainEvent::swap(timestamp, amount_in, amount_out).with_sold(sold)
            }
            80..90 => BlockchainEvent::add_liquidity(timestamp, amount_in, amount_out),
            _ => BlockchainEvent::remove_liquidity(timestamp, amount_in, amount_out),
        };
        event.with_volume(volume).with_price_impact(impact)
    }
}

fn tx_hash(rng: &mut StdRng) -> String {
    (0..4).map(|_| format!("{:016x}", rng.random::<u64>())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolchart_domain::EventType;

    const END: u64 = 1_700_000_000_000;

    #[test]
    fn test_deterministic_per_pool() {
        let source = SyntheticEvents::new(11);
        let a = source.generate("CPOOLA", Timeframe::OneDay, END);
        let b = source.generate("CPOOLA", Timeframe::OneDay, END);
        let other = source.generate("CPOOLB", Timeframe::OneDay, END);

        assert_eq!(a, b);
        assert_ne!(a, other);
    }

    #[test]
    fn test_window_shape_matches_timeframe() {
        let source = SyntheticEvents::new(0);
        for tf in Timeframe::ALL {
            let events = source.generate("CPOOL", tf, END);
            assert_eq!(events.len(), tf.event_count());
            assert_eq!(events[0].timestamp, END - tf.window_ms());
            assert!(events.windows(2).all(|w| {
                w[1].timestamp - w[0].timestamp == tf.spacing_ms()
            }));
            assert!(events.last().unwrap().timestamp < END);
        }
    }

    #[test]
    fn test_amounts_and_tags() {
        let source = SyntheticEvents::new(5).with_amount_range(1_000, 2_000);
        let events = source.generate("CPOOL", Timeframe::OneWeek, END);

        let mut swaps = 0;
        for e in &events {
            assert!(e.amount_in >= TokenAmount::from(1_000u64));
            assert!(e.amount_in < TokenAmount::from(2_000u64));
            assert!(e.price_impact.abs() <= 0.005);
            assert!(e.tx_hash.as_ref().is_some_and(|h| h.len() == 64));
            if e.event_type == EventType::Swap {
                assert!(e.sold.is_some());
                swaps += 1;
            }
        }
        // 80% nominal share of swaps
        assert!(swaps > events.len() / 2);
        assert!(events.windows(2).all(|w| w[0].block_number < w[1].block_number));
    }

    #[test]
    fn test_event_amounts_depend_only_on_index() {
        let source = SyntheticEvents::new(1);
        let hour = source.generate("CPOOL", Timeframe::OneHour, END);
        let day = source.generate("CPOOL", Timeframe::OneDay, END - 1_000);
        assert_eq!(hour[42].amount_in, day[42].amount_in);
        assert_eq!(hour[42].event_type, day[42].event_type);
        assert_ne!(hour[42].timestamp, day[42].timestamp);
        assert_eq!(fnv1a(""), FNV_OFFSET);
    }

    #[test]
    fn test_min_safe_reserve_survives_reconstruction_walk() {
        let source = SyntheticEvents::new(8);
        let tf = Timeframe::OneWeek;
        let floor = source.min_safe_reserve(tf);
        let mut reserves = [floor, floor];
        for e in source.generate("CPOOL", tf, END).iter().rev() {
            let [r0, r1] = reserves;
            reserves = match e.event_type {
                EventType::RemoveLiquidity => [
                    r0.checked_add(e.amount_in).unwrap(),
                    r1.checked_add(e.amount_out).unwrap(),
                ],
                _ => [
                    r0.checked_sub(e.amount_in.max(e.amount_out)).unwrap(),
                    r1.checked_sub(e.amount_in.max(e.amount_out)).unwrap(),
                ],
            };
        }
    }

    #[test]
    fn test_anchor_pins_end() {
        let events = SyntheticEvents::new(2)
            .anchored_at(END)
            .events("CPOOL", Timeframe::FourHours);
        assert_eq!(events[0].timestamp, END - Timeframe::FourHours.window_ms());
    }
}
