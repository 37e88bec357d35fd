//! User records and typed listing filters.

use serde::{Deserialize, Serialize};
use userlist_core::query::QueryParams;
use userlist_core::{FilterField, FilterForm};

/// A user as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Employer.
    pub company: String,
    /// Contact address.
    pub email: String,
}

/// Typed filters for listing users.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserFilter {
    /// Only users with exactly this age.
    pub age: Option<u32>,
    /// Only users working for this company.
    pub company: Option<String>,
}

impl UserFilter {
    /// Convert the filter into URL query pairs, age before company.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();

        params.push_opt(FilterField::Age.name(), self.age);
        params.push_opt(FilterField::Company.name(), self.company.as_deref());

        params.into_pairs()
    }
}

impl From<&UserFilter> for FilterForm {
    fn from(filter: &UserFilter) -> Self {
        FilterForm::new()
            .with_value(
                FilterField::Age,
                filter.age.map(|age| age.to_string()).unwrap_or_default(),
            )
            .with_value(
                FilterField::Company,
                filter.company.clone().unwrap_or_default(),
            )
    }
}
