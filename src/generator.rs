//! Synthetic fleet data: tiered rosters, time-gated network snapshots and
//! per-pubkey detail records.
//!
//! Every generator takes its random source as an argument. Roster and
//! snapshot generation are free to use any source; detail generation always
//! builds its own `StdRng` seeded from the pubkey so concurrent requests
//! never share or reseed a generator.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::models::{NetworkSnapshot, NodeDetail, NodeRecord, NodeStatus};

pub const SLOTS_PER_EPOCH: u64 = 432_000;
pub const BASE_EPOCH: u64 = 250;
pub const NETWORK_VERSION: &str = "1.2.0";

const BASE_SLOT_OFFSET: u64 = 1_520_000;
const SLOT_WINDOW: i64 = 10_000;
const SLOT_TIME_UNIT_SECS: i64 = 1_000;
const BLOCK_HEIGHT_LAG: u64 = 1_000;

const ACTIVE_PROBABILITY: f64 = 0.9;
const INACTIVE_MARKER: &str = "inactive";
const PUBKEY_HEX_LEN: usize = 44;
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
const MAX_LAST_SEEN_SECS: i64 = 300;

const STAKE_JITTER: i64 = 100_000;
const COMMISSION_JITTER: f64 = 0.5;
const PERFORMANCE_JITTER: f64 = 0.05;
const UPTIME_JITTER: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub name: &'static str,
    pub weight: usize,
    pub performance: f64,
    pub uptime: f64,
    pub stake: u64,
    pub commission: f64,
}

pub const TIERS: [Tier; 4] = [
    Tier {
        name: "elite",
        weight: 1,
        performance: 0.95,
        uptime: 99.9,
        stake: 5_000_000,
        commission: 1.5,
    },
    Tier {
        name: "high",
        weight: 2,
        performance: 0.85,
        uptime: 98.5,
        stake: 2_000_000,
        commission: 3.0,
    },
    Tier {
        name: "standard",
        weight: 2,
        performance: 0.75,
        uptime: 95.0,
        stake: 1_000_000,
        commission: 5.0,
    },
    Tier {
        name: "low",
        weight: 1,
        performance: 0.60,
        uptime: 88.0,
        stake: 500_000,
        commission: 8.0,
    },
];

const VERSIONS: [(&str, f64); 5] = [
    ("1.2.0", 0.6),
    ("1.1.5", 0.2),
    ("1.1.4", 0.1),
    ("1.1.3", 0.05),
    ("1.1.2", 0.05),
];

const PROVIDERS: [&str; 6] = [
    "AWS",
    "Google Cloud",
    "Microsoft Azure",
    "DigitalOcean",
    "Hetzner",
    "OVH",
];

const REGIONS: [&str; 5] = [
    "us-east-1",
    "us-west-2",
    "eu-west-1",
    "asia-southeast-1",
    "eu-central-1",
];

const LOCATIONS: [&str; 10] = [
    "New York, USA",
    "London, UK",
    "Singapore",
    "Tokyo, Japan",
    "Frankfurt, Germany",
    "Sydney, Australia",
    "Sao Paulo, Brazil",
    "Mumbai, India",
    "Paris, France",
    "Toronto, Canada",
];

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn pick_version<R: Rng + ?Sized>(rng: &mut R) -> String {
    VERSIONS
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(version, _)| *version)
        .unwrap_or(NETWORK_VERSION)
        .to_string()
}

fn pick_data_center<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, &PROVIDERS), pick(rng, &REGIONS))
}

fn pick_location<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, &LOCATIONS).to_string()
}

fn node_pubkey<R: Rng + ?Sized>(rng: &mut R, network: &str) -> String {
    let prefix: String = network.chars().take(3).collect();
    let suffix: String = (0..PUBKEY_HEX_LEN)
        .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
        .collect();
    format!("xnd_{}_{}", prefix, suffix)
}

fn node_ip<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(10..=200),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(1..=254)
    )
}

/// Splits `count` across [`TIERS`] by weight. Largest remainders get the
/// leftover slots, earlier tiers first on ties, so the parts always sum to
/// `count`.
pub fn tier_allocation(count: usize) -> Vec<usize> {
    let total_weight: usize = TIERS.iter().map(|tier| tier.weight).sum();
    let mut allocation = Vec::with_capacity(TIERS.len());
    let mut remainders = Vec::with_capacity(TIERS.len());

    for (index, tier) in TIERS.iter().enumerate() {
        let share = count * tier.weight;
        allocation.push(share / total_weight);
        remainders.push((share % total_weight, index));
    }

    let assigned: usize = allocation.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, index) in remainders.iter().take(count - assigned) {
        allocation[index] += 1;
    }
    allocation
}

fn tiered_record<R: Rng + ?Sized>(
    rng: &mut R,
    tier: &Tier,
    network: &str,
    pubkey: String,
    now: DateTime<Utc>,
) -> NodeRecord {
    let is_active = rng.gen_bool(ACTIVE_PROBABILITY);
    let last_seen = now - Duration::seconds(rng.gen_range(0..=MAX_LAST_SEEN_SECS));

    let stake = tier
        .stake
        .saturating_add_signed(rng.gen_range(-STAKE_JITTER..=STAKE_JITTER));
    let commission = tier.commission + rng.gen_range(-COMMISSION_JITTER..=COMMISSION_JITTER);
    let performance = tier.performance + rng.gen_range(-PERFORMANCE_JITTER..=PERFORMANCE_JITTER);
    let uptime = tier.uptime + rng.gen_range(-UPTIME_JITTER..=UPTIME_JITTER);

    NodeRecord {
        pubkey,
        network: network.to_string(),
        ip: node_ip(rng),
        version: pick_version(rng),
        is_active,
        status: NodeStatus::from_active(is_active),
        last_seen,
        stake,
        commission: commission.max(0.0),
        data_center: pick_data_center(rng),
        performance_score: performance.clamp(0.0, 1.0),
        uptime_24h: round_to(uptime.clamp(0.0, 100.0), 2),
        vote_success_rate: round_to(98.5 + rng.gen_range(-2.0..=1.0), 2),
        response_time_ms: rng.gen_range(80..=250),
        peer_count: rng.gen_range(30..=120),
        location: pick_location(rng),
        last_vote: if is_active {
            rng.gen_range(1_000_000..=2_000_000)
        } else {
            0
        },
        epoch_credits: if is_active {
            rng.gen_range(1_000..=10_000)
        } else {
            0
        },
    }
}

/// Builds `count` records stratified over [`TIERS`], sorted by stake descending.
pub fn generate_roster<R: Rng + ?Sized>(
    rng: &mut R,
    network: &str,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<NodeRecord> {
    let mut seen = HashSet::with_capacity(count);
    let mut records = Vec::with_capacity(count);

    for (tier, tier_count) in TIERS.iter().zip(tier_allocation(count)) {
        tracing::trace!(tier = tier.name, count = tier_count, "generating tier");
        for _ in 0..tier_count {
            let mut pubkey = node_pubkey(rng, network);
            while !seen.insert(pubkey.clone()) {
                pubkey = node_pubkey(rng, network);
            }
            records.push(tiered_record(rng, tier, network, pubkey, now));
        }
    }

    records.sort_by(|a, b| b.stake.cmp(&a.stake));
    tracing::debug!(network, count = records.len(), "generated roster");
    records
}

/// Slot for the 1000-second window containing `now`. Stable within a window.
pub fn slot_at(now: DateTime<Utc>) -> u64 {
    let window = now
        .timestamp()
        .div_euclid(SLOT_TIME_UNIT_SECS)
        .rem_euclid(SLOT_WINDOW) as u64;
    BASE_EPOCH * SLOTS_PER_EPOCH + BASE_SLOT_OFFSET + window
}

pub fn generate_network_snapshot<R: Rng + ?Sized>(
    rng: &mut R,
    network: &str,
    now: DateTime<Utc>,
) -> NetworkSnapshot {
    let slot = slot_at(now);
    let epoch = slot / SLOTS_PER_EPOCH;
    tracing::debug!(network, epoch, slot, "generated network snapshot");

    NetworkSnapshot {
        epoch,
        slot,
        absolute_slot: slot,
        block_height: slot - BLOCK_HEIGHT_LAG,
        transaction_count: rng.gen_range(5_000_000..=10_000_000),
        current_validators: rng.gen_range(20..=40),
        total_active_stake: rng.gen_range(500_000_000..=1_000_000_000),
        average_commission: round_to(rng.gen_range(3.0..=6.0), 2),
        network_version: NETWORK_VERSION.to_string(),
    }
}

/// Random source owned by a single detail computation, seeded from the
/// SHA-256 digest of the pubkey.
pub fn detail_rng(pubkey: &str) -> StdRng {
    let digest = Sha256::digest(pubkey.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    StdRng::from_seed(seed)
}

pub fn generate_detail(pubkey: &str) -> NodeDetail {
    let mut rng = detail_rng(pubkey);
    let is_active = !pubkey.contains(INACTIVE_MARKER);
    let total_stake = rng.gen_range(100_000..=10_000_000);

    NodeDetail {
        pubkey: pubkey.to_string(),
        status: NodeStatus::from_active(is_active),
        uptime_24h: round_to(rng.gen_range(85.0..=99.9), 1),
        uptime_7d: round_to(rng.gen_range(88.0..=99.5), 1),
        uptime_30d: round_to(rng.gen_range(90.0..=99.0), 1),
        vote_success_rate: round_to(rng.gen_range(95.0..=99.9), 1),
        response_time_ms: rng.gen_range(50..=300),
        peer_count: rng.gen_range(20..=150),
        total_stake,
        commission: round_to(rng.gen_range(0.5..=10.0), 2),
        version: pick_version(&mut rng),
        data_center: pick_data_center(&mut rng),
        location: pick_location(&mut rng),
        latency_ms: rng.gen_range(20..=200),
        reliability_score: round_to(rng.gen_range(0.7..=1.0), 3),
        epoch_credits: if is_active {
            rng.gen_range(1_000..=10_000)
        } else {
            0
        },
        last_vote: if is_active {
            rng.gen_range(1_000_000..=2_000_000)
        } else {
            0
        },
        root_slot: if is_active {
            rng.gen_range(1_000_000..=2_000_000)
        } else {
            0
        },
    }
}

/// Roster from the thread-local RNG, stamped with the current time.
pub fn roster(network: &str, count: usize) -> Vec<NodeRecord> {
    generate_roster(&mut rand::thread_rng(), network, count, Utc::now())
}

pub fn network_snapshot(network: &str) -> NetworkSnapshot {
    generate_network_snapshot(&mut rand::thread_rng(), network, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn default_roster_size_splits_into_cohorts() {
        assert_eq!(tier_allocation(30), vec![5, 10, 10, 5]);
    }

    #[test]
    fn allocation_always_sums_to_count() {
        for count in 0..200 {
            let allocation = tier_allocation(count);
            assert_eq!(allocation.iter().sum::<usize>(), count, "count {}", count);
        }
        assert_eq!(tier_allocation(1), vec![0, 1, 0, 0]);
    }

    #[test]
    fn roster_has_requested_length_sorted_by_stake() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [1, 7, 30, 50, 123] {
            let roster = generate_roster(&mut rng, "testnet", count, fixed_now());
            assert_eq!(roster.len(), count);
            assert!(roster.windows(2).all(|pair| pair[0].stake >= pair[1].stake));
        }
    }

    #[test]
    fn empty_roster_for_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_roster(&mut rng, "testnet", 0, fixed_now()).is_empty());
    }

    #[test]
    fn record_fields_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let now = fixed_now();
        let roster = generate_roster(&mut rng, "mainnet", 500, now);
        for node in &roster {
            assert!((0.0..=1.0).contains(&node.performance_score), "{:?}", node);
            assert!(node.commission >= 0.0);
            assert!((0.0..=100.0).contains(&node.uptime_24h), "{:?}", node);
            assert!((0.0..=100.0).contains(&node.vote_success_rate));
            assert!((80..=250).contains(&node.response_time_ms));
            assert!((30..=120).contains(&node.peer_count));
            assert!(node.last_seen <= now);
            assert!(now - node.last_seen <= Duration::seconds(MAX_LAST_SEEN_SECS));
            assert_eq!(node.network, "mainnet");
            assert_eq!(node.status, NodeStatus::from_active(node.is_active));
        }
    }

    #[test]
    fn thresholds_see_unrounded_scores() {
        let mut rng = StdRng::seed_from_u64(13);
        let roster = generate_roster(&mut rng, "testnet", 500, fixed_now());
        assert!(roster
            .iter()
            .any(|node| node.performance_score != round_to(node.performance_score, 3)));
        assert!(roster
            .iter()
            .any(|node| node.commission != round_to(node.commission, 2)));

        let raw_high = roster
            .iter()
            .filter(|node| node.is_active && node.performance_score > 0.9)
            .count();
        assert_eq!(crate::metrics::summarize(&roster).high_performers, raw_high);
    }

    #[test]
    fn pubkeys_are_unique_and_prefixed() {
        let mut rng = StdRng::seed_from_u64(3);
        let roster = generate_roster(&mut rng, "testnet", 300, fixed_now());
        let unique: HashSet<_> = roster.iter().map(|node| node.pubkey.as_str()).collect();
        assert_eq!(unique.len(), roster.len());
        for node in &roster {
            assert!(node.pubkey.starts_with("xnd_tes_"));
            assert_eq!(node.pubkey.len(), "xnd_tes_".len() + PUBKEY_HEX_LEN);
        }
    }

    #[test]
    fn short_network_tag_is_used_whole() {
        let mut rng = StdRng::seed_from_u64(3);
        let roster = generate_roster(&mut rng, "d", 3, fixed_now());
        assert!(roster.iter().all(|node| node.pubkey.starts_with("xnd_d_")));
    }

    #[test]
    fn inactive_records_have_no_vote_history() {
        let mut rng = StdRng::seed_from_u64(5);
        let roster = generate_roster(&mut rng, "testnet", 400, fixed_now());
        let inactive: Vec<_> = roster.iter().filter(|node| !node.is_active).collect();
        assert!(!inactive.is_empty());
        for node in inactive {
            assert_eq!(node.last_vote, 0);
            assert_eq!(node.epoch_credits, 0);
            assert_eq!(node.status, NodeStatus::Inactive);
        }
        assert!(roster
            .iter()
            .filter(|node| node.is_active)
            .all(|node| node.last_vote >= 1_000_000 && node.epoch_credits >= 1_000));
    }

    #[test]
    fn seeded_roster_is_reproducible() {
        let a = generate_roster(&mut StdRng::seed_from_u64(42), "testnet", 30, fixed_now());
        let b = generate_roster(&mut StdRng::seed_from_u64(42), "testnet", 30, fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn snapshot_epoch_follows_slot() {
        let mut rng = StdRng::seed_from_u64(9);
        for secs in (0..50_000_000i64).step_by(999_983) {
            let now = Utc.timestamp_opt(1_600_000_000 + secs, 0).unwrap();
            let snapshot = generate_network_snapshot(&mut rng, "testnet", now);
            assert_eq!(snapshot.epoch, snapshot.slot / SLOTS_PER_EPOCH);
            assert!(snapshot.epoch >= BASE_EPOCH);
            assert_eq!(snapshot.block_height, snapshot.slot - BLOCK_HEIGHT_LAG);
            assert!((20..=40).contains(&snapshot.current_validators));
            assert!((3.0..=6.0).contains(&snapshot.average_commission));
        }
    }

    #[test]
    fn slot_is_stable_within_a_time_window() {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(slot_at(start), slot_at(start + Duration::seconds(999)));
        assert_eq!(
            slot_at(start) + 1,
            slot_at(start + Duration::seconds(1_000))
        );

        let mut rng = StdRng::seed_from_u64(1);
        let a = generate_network_snapshot(&mut rng, "testnet", start);
        let b = generate_network_snapshot(&mut rng, "testnet", start + Duration::seconds(10));
        assert_eq!(a.slot, b.slot);
        assert_eq!(a.epoch, b.epoch);
    }

    #[test]
    fn detail_is_reproducible_per_pubkey() {
        let first = generate_detail("xnd_tes_abc123");
        let second = generate_detail("xnd_tes_abc123");
        assert_eq!(first, second);
        assert_ne!(first, generate_detail("xnd_tes_abc124"));
    }

    #[test]
    fn detail_is_unaffected_by_other_generation() {
        let before = generate_detail("xnd_main_node");
        let _ = roster("testnet", 30);
        let _ = generate_detail("some_other_pubkey");
        assert_eq!(before, generate_detail("xnd_main_node"));
    }

    #[test]
    fn inactive_marker_zeroes_vote_fields() {
        let detail = generate_detail("xnd_tes_inactive_01");
        assert_eq!(detail.status, NodeStatus::Inactive);
        assert_eq!(detail.epoch_credits, 0);
        assert_eq!(detail.last_vote, 0);
        assert_eq!(detail.root_slot, 0);

        let active = generate_detail("xnd_tes_01");
        assert_eq!(active.status, NodeStatus::Active);
        assert!(active.epoch_credits >= 1_000);
        assert!(active.root_slot >= 1_000_000);
    }

    #[test]
    fn detail_fields_stay_in_range() {
        for index in 0..100 {
            let detail = generate_detail(&format!("node-{}", index));
            assert!((85.0..=99.9).contains(&detail.uptime_24h));
            assert!((88.0..=99.5).contains(&detail.uptime_7d));
            assert!((90.0..=99.0).contains(&detail.uptime_30d));
            assert!((0.5..=10.0).contains(&detail.commission));
            assert!((0.7..=1.0).contains(&detail.reliability_score));
            assert!((100_000..=10_000_000).contains(&detail.total_stake));
            assert!(VERSIONS
                .iter()
                .any(|(version, _)| *version == detail.version));
        }
    }

    #[test]
    fn detail_computations_on_separate_threads_agree() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| generate_detail("xnd_tes_shared")))
            .collect();
        let expected = generate_detail("xnd_tes_shared");
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
