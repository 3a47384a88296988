//! City domain entity
//!
//! A named location inside one of the Brazilian federative units.
//! Cities are referenced (never owned) by customers.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, FieldViolation};

/// Unique identifier for a city, generated by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub i64);

impl From<i64> for CityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Brazilian federative unit (26 states plus the Federal District)
///
/// Serialized as the upper-case code; deserialized case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}

impl StateCode {
    pub const ALL: [StateCode; 27] = [
        StateCode::Ac,
        StateCode::Al,
        StateCode::Ap,
        StateCode::Am,
        StateCode::Ba,
        StateCode::Ce,
        StateCode::Df,
        StateCode::Es,
        StateCode::Go,
        StateCode::Ma,
        StateCode::Mt,
        StateCode::Ms,
        StateCode::Mg,
        StateCode::Pa,
        StateCode::Pb,
        StateCode::Pr,
        StateCode::Pe,
        StateCode::Pi,
        StateCode::Rj,
        StateCode::Rn,
        StateCode::Rs,
        StateCode::Ro,
        StateCode::Rr,
        StateCode::Sc,
        StateCode::Sp,
        StateCode::Se,
        StateCode::To,
    ];

    /// Two-letter code as stored and serialized
    pub fn code(&self) -> &'static str {
        match self {
            StateCode::Ac => "AC",
            StateCode::Al => "AL",
            StateCode::Ap => "AP",
            StateCode::Am => "AM",
            StateCode::Ba => "BA",
            StateCode::Ce => "CE",
            StateCode::Df => "DF",
            StateCode::Es => "ES",
            StateCode::Go => "GO",
            StateCode::Ma => "MA",
            StateCode::Mt => "MT",
            StateCode::Ms => "MS",
            StateCode::Mg => "MG",
            StateCode::Pa => "PA",
            StateCode::Pb => "PB",
            StateCode::Pr => "PR",
            StateCode::Pe => "PE",
            StateCode::Pi => "PI",
            StateCode::Rj => "RJ",
            StateCode::Rn => "RN",
            StateCode::Rs => "RS",
            StateCode::Ro => "RO",
            StateCode::Rr => "RR",
            StateCode::Sc => "SC",
            StateCode::Sp => "SP",
            StateCode::Se => "SE",
            StateCode::To => "TO",
        }
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for StateCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        StateCode::ALL
            .iter()
            .find(|state| state.code() == upper)
            .copied()
            .ok_or_else(|| format!("Unknown state code: {}", s))
    }
}

impl<'de> Deserialize<'de> for StateCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A persisted city
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub state: StateCode,
}

/// Data needed to create a new city
#[derive(Debug, Clone)]
pub struct NewCity {
    pub name: String,
    pub state: StateCode,
}

/// Unvalidated city input as received from a client
#[derive(Debug, Clone, Default)]
pub struct CityDraft {
    pub name: String,
    pub state: Option<StateCode>,
}

impl CityDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "must not be blank"));
        }
        if self.state.is_none() {
            violations.push(FieldViolation::new("state", "is required"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(violations))
        }
    }
}
