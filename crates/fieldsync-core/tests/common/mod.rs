//! Shared DTO fixtures for synchronization and paging tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use fieldsync_core::{field_enumerable, primitive_field_type, PatchFields, Patchable};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

/// Installs a test-writer subscriber so `RUST_LOG=trace` shows skip decisions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Pending,
    Active,
    Closed,
}

primitive_field_type!(Status);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geo {
    pub lat: f64,
    pub lng: f64,
}

field_enumerable!(Geo { lat: f64, lng: f64 });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
    pub geo: Geo,
}

field_enumerable!(Address {
    street: String,
    city: String,
    zip: String,
    geo: Geo,
});

/// Domain entity used as the source in most tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub count: i32,
    pub status: Status,
    pub address: Address,
    pub billing: Option<Address>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

field_enumerable!(Customer {
    id: Uuid,
    name: String,
    email: String,
    count: i32,
    status: Status,
    address: Address,
    billing: Option<Address>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
});

/// Flat read model: nested address fields appear as prefixed fields, and
/// `count` is declared wider than on the entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub count: i64,
    pub status: Status,
    pub address_city: String,
    pub address_zip: String,
    pub address_geo_lat: f64,
    pub billing_city: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

field_enumerable!(CustomerDto {
    id: Uuid,
    name: String,
    email: String,
    count: i64,
    status: Status,
    address_city: String,
    address_zip: String,
    address_geo_lat: f64,
    billing_city: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
});

/// Copy of the entity shape, used for whole-value and patch tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRecord {
    pub name: String,
    pub email: String,
    pub count: i32,
    pub status: Status,
    pub address: Address,
}

field_enumerable!(CustomerRecord {
    name: String,
    email: String,
    count: i32,
    status: Status,
    address: Address,
});

/// Incoming partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCustomerCommand {
    pub name: String,
    pub email: String,
    pub address: Address,
    pub patch_fields: Option<PatchFields>,
}

field_enumerable!(UpdateCustomerCommand {
    name: String,
    email: String,
    address: Address,
});

impl Patchable for UpdateCustomerCommand {
    fn patch_fields(&self) -> Option<&PatchFields> {
        self.patch_fields.as_ref()
    }
}

/// Profile with collection fields and a shared address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub labels: HashMap<String, String>,
    pub roles: BTreeSet<String>,
    pub address: Arc<Address>,
}

field_enumerable!(Profile {
    labels: HashMap<String, String>,
    roles: BTreeSet<String>,
    address: Arc<Address>,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileView {
    pub labels: HashMap<String, String>,
    pub roles: BTreeSet<String>,
    pub address_city: String,
}

field_enumerable!(ProfileView {
    labels: HashMap<String, String>,
    roles: BTreeSet<String>,
    address_city: String,
});

/// Singly linked chain for depth-guard tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

field_enumerable!(Node {
    value: i32,
    next: Option<Box<Node>>,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Holder {
    pub head: Node,
}

field_enumerable!(Holder { head: Node });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainView {
    pub head_value: i32,
    pub head_next_value: i32,
    pub head_next_next_value: i32,
    pub head_next_next_next_value: i32,
}

field_enumerable!(ChainView {
    head_value: i32,
    head_next_value: i32,
    head_next_next_value: i32,
    head_next_next_next_value: i32,
});

pub fn chain(values: &[i32]) -> Node {
    values
        .iter()
        .rev()
        .fold(None, |next: Option<Box<Node>>, value| {
            Some(Box::new(Node { value: *value, next }))
        })
        .map(|head| *head)
        .unwrap_or_default()
}

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn customer() -> Customer {
    Customer {
        id: Uuid::from_u128(0x1234),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        count: 42,
        status: Status::Active,
        address: Address {
            street: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            zip: "N1 9GU".to_string(),
            geo: Geo {
                lat: 51.5,
                lng: -0.12,
            },
        },
        billing: None,
        tags: vec!["vip".to_string(), "early".to_string()],
        created_at: created_at(),
    }
}
