use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Active,
    Inactive,
}

impl NodeStatus {
    pub fn from_active(is_active: bool) -> Self {
        if is_active {
            NodeStatus::Active
        } else {
            NodeStatus::Inactive
        }
    }
}

/// One simulated pNode in a generated roster.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NodeRecord {
    pub pubkey: String,
    pub network: String,
    pub ip: String,
    pub version: String,
    pub is_active: bool,
    pub status: NodeStatus,
    pub last_seen: DateTime<Utc>,
    pub stake: u64,
    pub commission: f64,
    pub data_center: String,
    pub performance_score: f64,
    pub uptime_24h: f64,
    pub vote_success_rate: f64,
    pub response_time_ms: u32,
    pub peer_count: u32,
    pub location: String,
    pub last_vote: u64,
    pub epoch_credits: u64,
}

/// Per-identifier detail. Everything here is a pure function of the pubkey.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NodeDetail {
    pub pubkey: String,
    pub status: NodeStatus,
    pub uptime_24h: f64,
    pub uptime_7d: f64,
    pub uptime_30d: f64,
    pub vote_success_rate: f64,
    pub response_time_ms: u32,
    pub peer_count: u32,
    pub total_stake: u64,
    pub commission: f64,
    pub version: String,
    pub data_center: String,
    pub location: String,
    pub latency_ms: u32,
    pub reliability_score: f64,
    pub epoch_credits: u64,
    pub last_vote: u64,
    pub root_slot: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkSnapshot {
    pub epoch: u64,
    pub slot: u64,
    pub absolute_slot: u64,
    pub block_height: u64,
    pub transaction_count: u64,
    pub current_validators: u32,
    pub total_active_stake: u64,
    pub average_commission: f64,
    pub network_version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub total_pnodes: usize,
    pub active_pnodes: usize,
    pub inactive_pnodes: usize,
    pub total_stake: u64,
    pub avg_commission: f64,
    pub avg_performance: f64,
    pub high_performers: usize,
    pub low_commission_nodes: usize,
}

// Response envelopes

#[derive(Debug, Serialize)]
pub struct NodePage {
    pub network: String,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub count: usize,
    pub active_only: bool,
    pub is_real_data: bool,
    pub note: &'static str,
    pub pnodes: Vec<NodeRecord>,
}

#[derive(Debug, Serialize)]
pub struct NodeDetailResponse {
    pub network: String,
    #[serde(flatten)]
    pub detail: NodeDetail,
    pub last_updated: DateTime<Utc>,
    pub is_real_data: bool,
    pub notes: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub network: String,
    #[serde(flatten)]
    pub stats: SummaryStatistics,
    pub current_epoch: u64,
    pub current_slot: u64,
    pub block_height: u64,
    pub network_version: String,
    pub is_real_data: bool,
    pub demo_note: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NetworkInfoResponse {
    pub network: String,
    #[serde(flatten)]
    pub snapshot: NetworkSnapshot,
    pub is_real_data: bool,
    pub timestamp: DateTime<Utc>,
    pub note: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct EndpointMap {
    pub health: &'static str,
    pub pnodes: &'static str,
    pub pnode_detail: &'static str,
    pub pnodes_summary: &'static str,
    pub network_info: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    pub mode: &'static str,
    pub note: &'static str,
    pub endpoints: EndpointMap,
}
