use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRow {
    pub animal_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub sex: String,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub animal_type: String,
    pub species: String,
    pub breed: Option<String>,
    pub located_name: Option<String>,
}
