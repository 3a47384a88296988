//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{City, CityId, Customer, CustomerDraft, CustomerId, StateCode};

/// Create a test city
pub fn test_city(id: i64, name: &str, state: StateCode) -> City {
    City {
        id: CityId(id),
        name: name.to_string(),
        state,
    }
}

pub fn sao_paulo() -> City {
    test_city(1, "São Paulo", StateCode::Sp)
}

pub fn salvador() -> City {
    test_city(2, "Salvador", StateCode::Ba)
}

/// Create a test customer with no address
pub fn test_customer(id: i64, name: &str, city: Option<City>) -> Customer {
    Customer {
        id: CustomerId(id),
        name: name.to_string(),
        address: None,
        city,
    }
}

/// Customer input with a name, address and optional city reference
pub fn draft(name: &str, address: Option<&str>, city_id: Option<i64>) -> CustomerDraft {
    CustomerDraft {
        name: name.to_string(),
        address: address.map(str::to_string),
        city_id: city_id.map(CityId),
    }
}
