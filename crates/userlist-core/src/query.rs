//! Filter fields and request-URL construction.
//!
//! A [`FilterForm`] carries one string value per [`FilterField`]. Building a
//! [`RequestUrl`] appends `&name=value` for every non-empty field, in the
//! fixed declaration order, to the collection path followed by `?`:
//!
//! ```
//! use userlist_core::{FilterField, FilterForm, RequestUrl};
//!
//! let form = FilterForm::new()
//!     .with_value(FilterField::Age, "30")
//!     .with_value(FilterField::Company, "Acme");
//! let url = RequestUrl::build("/api/users", &form);
//! assert_eq!(url.as_str(), "/api/users?&age=30&company=Acme");
//! ```

use std::fmt::{self, Display};
use url::form_urlencoded;

/// A named filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Exact age match.
    Age,
    /// Exact company match.
    Company,
}

impl FilterField {
    /// All fields, in the order they are appended to a query.
    pub const ALL: [Self; 2] = [Self::Age, Self::Company];

    /// Query parameter name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Company => "company",
        }
    }
}

impl Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current values of the filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    age: String,
    company: String,
}

impl FilterForm {
    /// Create a form with every field empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a field.
    #[must_use]
    pub fn with_value(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Replace the value of a field in place.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::Age => &mut self.age,
            FilterField::Company => &mut self.company,
        };
        *slot = value.into();
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Age => &self.age,
            FilterField::Company => &self.company,
        }
    }

    /// Non-empty fields in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ALL
            .into_iter()
            .map(|field| (field, self.value(field)))
            .filter(|(_, value)| !value.is_empty())
    }
}

/// Path and query of a filtered user listing, relative to the backend root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestUrl(String);

impl RequestUrl {
    /// Build the request URL for `form` under the collection `path`.
    ///
    /// Values are form-urlencoded; empty fields are skipped. The result keeps
    /// the `?&` shape even when no field is set (`/api/users?`).
    #[must_use]
    pub fn build(path: &str, form: &FilterForm) -> Self {
        let mut url = String::with_capacity(path.len() + 32);
        url.push_str(path);
        url.push('?');

        for (field, value) in form.active_fields() {
            url.push('&');
            url.push_str(field.name());
            url.push('=');
            url.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        }

        Self(url)
    }

    /// The URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for RequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RequestUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builder for assembling query parameter pairs for typed requests.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
