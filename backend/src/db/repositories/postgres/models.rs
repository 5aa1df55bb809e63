use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;
use crate::models::{NewUser, User, UserId, UserInput};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
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

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
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

/// Full-row overwrite of the mutable columns. `None` is written as NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChangeset {
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
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            age: row.age,
            gender: row.gender,
            state: row.state,
            street_address: row.street_address,
            postal_code: row.postal_code,
            city: row.city,
            country: row.country,
            latitude: row.latitude,
            longitude: row.longitude,
            traffic_source: row.traffic_source,
            created_at: row.created_at,
        }
    }
}

impl From<&NewUser> for NewUserRow {
    fn from(new: &NewUser) -> Self {
        let f = new.fields.clone();
        NewUserRow {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.email,
            age: f.age,
            gender: f.gender,
            state: f.state,
            street_address: f.street_address,
            postal_code: f.postal_code,
            city: f.city,
            country: f.country,
            latitude: f.latitude,
            longitude: f.longitude,
            traffic_source: f.traffic_source,
            created_at: Some(new.created_at),
        }
    }
}

impl From<UserInput> for UserChangeset {
    fn from(f: UserInput) -> Self {
        UserChangeset {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.email,
            age: f.age,
            gender: f.gender,
            state: f.state,
            street_address: f.street_address,
            postal_code: f.postal_code,
            city: f.city,
            country: f.country,
            latitude: f.latitude,
            longitude: f.longitude,
            traffic_source: f.traffic_source,
        }
    }
}
