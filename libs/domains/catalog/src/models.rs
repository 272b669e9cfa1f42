use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Number of items per page when the request does not specify a limit.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Item entity - a single catalog record persisted in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier, assigned at creation as the creation timestamp
    /// in milliseconds
    pub id: i64,
    /// Item name
    pub name: String,
    /// Optional category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Price
    pub price: f64,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub description: Option<String>,
}

impl Item {
    /// Create a new item from a CreateItem DTO.
    ///
    /// The id is the current wall-clock time in milliseconds. Two creates
    /// within the same millisecond would collide; the service layer's
    /// unique-name check is the only guard against duplicates.
    pub fn new(input: CreateItem) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            name: input.name,
            category: input.category,
            price: input.price,
            description: input.description,
        }
    }
}

/// Query parameters for listing items.
///
/// `page` and `limit` arrive as raw strings and are parsed leniently:
/// missing, malformed, or zero values degrade to the defaults (page 1,
/// limit 10) instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ItemQuery {
    /// Case-insensitive substring filter against name and category
    pub q: Option<String>,
    /// 1-based page number (default 1)
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
    /// Maximum number of items per page (default 10)
    #[param(value_type = Option<u64>)]
    pub limit: Option<String>,
}

impl ItemQuery {
    /// Effective page number, defaulting to 1 on missing or invalid input.
    pub fn page(&self) -> u64 {
        Self::parse_positive(self.page.as_deref()).unwrap_or(1)
    }

    /// Effective page size, defaulting to 10 on missing or invalid input.
    pub fn limit(&self) -> u64 {
        Self::parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    fn parse_positive(raw: Option<&str>) -> Option<u64> {
        raw.and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|v| *v >= 1)
    }
}

/// A single page of query results.
///
/// `total` is the number of matches before slicing, not the unfiltered
/// store size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Cached aggregate statistics over the full item collection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of items in the store
    pub total: u64,
    /// Mean price across all items; 0 for an empty store
    pub average_price: f64,
    /// Backing file mtime recorded at computation time
    #[serde(skip)]
    #[schema(ignore)]
    pub modified: Option<SystemTime>,
}

impl StatsSnapshot {
    /// Compute a snapshot from the full item collection.
    pub fn compute(items: &[Item], modified: Option<SystemTime>) -> Self {
        let total = items.len() as u64;
        let average_price = if items.is_empty() {
            0.0
        } else {
            items.iter().map(|i| i.price).sum::<f64>() / items.len() as f64
        };

        Self {
            total,
            average_price,
            modified,
        }
    }
}
