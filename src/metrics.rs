use crate::generator::round_to;
use crate::models::{NodeRecord, SummaryStatistics};

const HIGH_PERFORMANCE_THRESHOLD: f64 = 0.9;
const LOW_COMMISSION_THRESHOLD: f64 = 3.0;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Reduces a roster to fleet-wide statistics. Only active nodes count
/// towards stake, averages and the derived counts.
pub fn summarize(roster: &[NodeRecord]) -> SummaryStatistics {
    let active: Vec<&NodeRecord> = roster.iter().filter(|node| node.is_active).collect();

    if active.is_empty() {
        return SummaryStatistics {
            total_pnodes: roster.len(),
            active_pnodes: 0,
            inactive_pnodes: roster.len(),
            total_stake: 0,
            avg_commission: 0.0,
            avg_performance: 0.0,
            high_performers: 0,
            low_commission_nodes: 0,
        };
    }

    let total_stake: u64 = active.iter().map(|node| node.stake).sum();

    // Commission only means something for nodes that actually hold stake.
    let commissions: Vec<f64> = active
        .iter()
        .filter(|node| node.stake > 0)
        .map(|node| node.commission)
        .collect();
    let performances: Vec<f64> = active.iter().map(|node| node.performance_score).collect();

    let high_performers = active
        .iter()
        .filter(|node| node.performance_score > HIGH_PERFORMANCE_THRESHOLD)
        .count();
    let low_commission_nodes = active
        .iter()
        .filter(|node| node.commission < LOW_COMMISSION_THRESHOLD)
        .count();

    SummaryStatistics {
        total_pnodes: roster.len(),
        active_pnodes: active.len(),
        inactive_pnodes: roster.len() - active.len(),
        total_stake,
        avg_commission: round_to(mean(&commissions), 2),
        avg_performance: round_to(mean(&performances), 3),
        high_performers,
        low_commission_nodes,
    }
}
