use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unified record shape produced by every transformer.
///
/// The flush engine never looks inside it; only sinks map its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street_name: String,
    pub street_address: String,
    pub zip_code: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}
