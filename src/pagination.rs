use serde::Deserialize;

use crate::error::ApiError;
use crate::models::NodeRecord;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 500;

/// Raw query parameters for the node listing. Signed so that negative
/// values reach validation instead of failing deserialization.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub network: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub limit: usize,
    pub active_only: bool,
}

impl PageRequest {
    pub fn from_query(query: &ListQuery) -> Result<Self, ApiError> {
        let skip = query.skip.unwrap_or(0);
        if skip < 0 {
            return Err(ApiError::InvalidParameter {
                name: "skip",
                reason: "must be greater than or equal to 0".to_string(),
            });
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::InvalidParameter {
                name: "limit",
                reason: format!("must be between 1 and {}", MAX_LIMIT),
            });
        }

        Ok(PageRequest {
            skip: skip as usize,
            limit: limit as usize,
            active_only: query.active_only,
        })
    }
}

#[derive(Debug)]
pub struct Page {
    /// Records left after filtering, before slicing.
    pub total: usize,
    pub items: Vec<NodeRecord>,
}

pub fn paginate(roster: Vec<NodeRecord>, request: &PageRequest) -> Page {
    let filtered: Vec<NodeRecord> = if request.active_only {
        roster.into_iter().filter(|node| node.is_active).collect()
    } else {
        roster
    };

    let total = filtered.len();
    let items = filtered
        .into_iter()
        .skip(request.skip)
        .take(request.limit)
        .collect();

    Page { total, items }
}
