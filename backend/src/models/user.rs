//! The user record and the request shapes that feed it.
//!
//! JSON uses lower camel case (`firstName`, `trafficSource`, ...). Request
//! bodies additionally accept the snake_case column names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

crate::define_id_type!(i32, UserId);

/// A stored user row.
///
/// `id` and `created_at` are owned by the server: they are assigned on insert
/// and never touched by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub state: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub traffic_source: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Client-supplied user fields, used for both create and update.
///
/// There is no `id` or `createdAt` field; those keys are dropped during
/// deserialization. Missing keys deserialize to `None`, so an update
/// with a partial body clears the omitted columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(alias = "first_name")]
    pub first_name: Option<String>,
    #[serde(alias = "last_name")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub state: Option<String>,
    #[serde(alias = "street_address")]
    pub street_address: Option<String>,
    #[serde(alias = "postal_code")]
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(alias = "traffic_source")]
    pub traffic_source: Option<String>,
}

/// A user ready to be inserted: client fields plus the server timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub fields: UserInput,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(fields: UserInput, created_at: DateTime<Utc>) -> Self {
        Self { fields, created_at }
    }

    /// Stamp `fields` with the current UTC time.
    pub fn stamped_now(fields: UserInput) -> Self {
        Self::new(fields, Utc::now())
    }
}

impl User {
    /// Build the stored form of `new` under the id the store assigned.
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        let mut user = Self {
            id,
            first_name: None,
            last_name: None,
            email: None,
            age: None,
            gender: None,
            state: None,
            street_address: None,
            postal_code: None,
            city: None,
            country: None,
            latitude: None,
            longitude: None,
            traffic_source: None,
            created_at: Some(new.created_at),
        };
        user.apply(new.fields);
        user
    }

    /// Overwrite every mutable field with `input`, leaving `id` and
    /// `created_at` untouched.
    pub fn apply(&mut self, input: UserInput) {
        self.first_name = input.first_name;
        self.last_name = input.last_name;
        self.email = input.email;
        self.age = input.age;
        self.gender = input.gender;
        self.state = input.state;
        self.street_address = input.street_address;
        self.postal_code = input.postal_code;
        self.city = input.city;
        self.country = input.country;
        self.latitude = input.latitude;
        self.longitude = input.longitude;
        self.traffic_source = input.traffic_source;
    }
}
