use chrono::NaiveDate;
use serde::Deserialize;
use tracing::trace;

use super::record::{Address, User};
use super::transformer::Transformer;
use super::types::TransformError;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Only the fields we keep are declared; everything else in the document is ignored.
#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    date_of_birth: Option<String>,
    #[serde(default)]
    address: AddressResponse,
}

#[derive(Debug, Default, Deserialize)]
struct AddressResponse {
    #[serde(default)]
    city: String,
    #[serde(default)]
    street_name: String,
    #[serde(default)]
    street_address: String,
    #[serde(default)]
    zip_code: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    coordinates: Coordinates,
}

#[derive(Debug, Default, Deserialize)]
struct Coordinates {
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lng: f64,
}

/// Transformer for the `random-data-api` user document.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDataApiTransformer;

impl RandomDataApiTransformer {
    pub const NAME: &'static str = "random-data-api";

    pub fn new() -> Self {
        Self
    }
}

impl Transformer for RandomDataApiTransformer {
    type Output = User;

    fn transform(&self, raw: &[u8]) -> Result<User, TransformError> {
        trace!(bytes = raw.len(), "transforming random-data-api payload");

        let response: UserResponse = serde_json::from_slice(raw)?;

        let raw_date = response
            .date_of_birth
            .ok_or(TransformError::MissingField("date_of_birth"))?;
        let date_of_birth = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|source| {
            TransformError::InvalidDate {
                field: "date_of_birth",
                value: raw_date,
                source,
            }
        })?;

        let address = response.address;
        Ok(User {
            first_name: response.first_name,
            last_name: response.last_name,
            date_of_birth,
            address: Address {
                city: address.city,
                street_name: address.street_name,
                street_address: address.street_address,
                zip_code: address.zip_code,
                state: address.state,
                country: address.country,
                latitude: address.coordinates.lat,
                longitude: address.coordinates.lng,
            },
        })
    }
}
