use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Marketplace listing lifecycle. Only `Active` listings are visible on the
/// public surface and eligible for recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "listing_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ListingStatus {
    Active,
    Reserved,
    Sold,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListingRow {
    pub listing_id: i64,
    pub owner_id: i64,
    pub animal_id: i64,
    pub status: ListingStatus,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&ListingStatus::Active).unwrap();
        assert_eq!(json, "\"ACTIVE\"");
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let parsed: Result<ListingStatus, _> = serde_json::from_str("\"PENDING\"");
        assert!(parsed.is_err());
    }
}
