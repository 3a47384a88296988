//! Customer domain entity
//!
//! A customer has a required name, an optional address and an optional
//! reference to the city they live in.

use serde::{Deserialize, Serialize};

use super::city::{City, CityId, NewCity};
use crate::error::{DomainError, FieldViolation};

/// Unique identifier for a customer, generated by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub i64);

impl CustomerId {
    /// Interpret a free-text search token as an identifier.
    ///
    /// Tokens that are not a valid integer yield `None`; this is not an error,
    /// it just disables identifier matching for that search.
    pub fn from_token(token: &str) -> Option<Self> {
        token.parse::<i64>().ok().map(Self)
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted customer with its city resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<City>,
}

/// Data written to the store on create or replace.
///
/// `city` is already resolved: a reference that did not resolve has been
/// dropped before this value is built.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<City>,
}

impl NewCustomer {
    pub fn city_id(&self) -> Option<CityId> {
        self.city.as_ref().map(|c| c.id)
    }
}

/// A new customer stored together with the new city they live in
#[derive(Debug, Clone)]
pub struct NewResident {
    pub name: String,
    pub address: Option<String>,
    pub city: NewCity,
}

/// Unvalidated customer input as received from a client
#[derive(Debug, Clone, Default)]
pub struct CustomerDraft {
    pub name: String,
    pub address: Option<String>,
    pub city_id: Option<CityId>,
}

impl CustomerDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "must not be blank"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(violations))
        }
    }

    /// Build the record to persist, attaching the city only if it resolved
    pub fn resolve(self, city: Option<City>) -> NewCustomer {
        NewCustomer {
            name: self.name,
            address: self.address,
            city,
        }
    }
}

/// Structured identifier-or-name search.
///
/// A `None` name means "no name filter", never "match the empty string".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerSearch {
    pub id: Option<CustomerId>,
    pub name: Option<String>,
}

impl CustomerSearch {
    /// Search built from a single token: the token is always a name fragment
    /// and, when it parses as an integer, also an identifier.
    pub fn from_token(token: &str) -> Self {
        Self {
            id: CustomerId::from_token(token),
            name: Some(token.to_string()),
        }
        .normalized()
    }

    /// Blank names are treated as absent
    pub fn normalized(self) -> Self {
        Self {
            id: self.id,
            name: self.name.filter(|n| !n.trim().is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}
