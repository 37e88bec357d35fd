//! Command-line arguments.

use clap::Parser;
use userlist_core::config::{UserListConfig, DEFAULT_API_PATH};
use userlist_core::{FilterField, FilterForm};

/// Fetch users from the user API, filtered by age and company.
#[derive(Debug, Parser)]
#[command(name = "userlist", version, about)]
pub struct Args {
    /// Backend base URL.
    #[arg(long, env = "USERLIST_BASE_URL", default_value = "http://localhost:4567")]
    pub base_url: String,

    /// Collection path filters are appended to.
    #[arg(long, default_value = DEFAULT_API_PATH)]
    pub api_path: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Only users of this age. Empty means no filter.
    #[arg(long, default_value = "")]
    pub age: String,

    /// Only users working for this company. Empty means no filter.
    #[arg(long, default_value = "")]
    pub company: String,

    /// Print pretty-printed JSON instead of highlighted markup.
    #[arg(long)]
    pub plain: bool,
}

impl Args {
    /// Filter values as a form.
    #[must_use]
    pub fn form(&self) -> FilterForm {
        FilterForm::new()
            .with_value(FilterField::Age, self.age.as_str())
            .with_value(FilterField::Company, self.company.as_str())
    }

    /// Validated endpoint configuration.
    pub fn config(&self) -> userlist_core::Result<UserListConfig> {
        UserListConfig::new(self.base_url.as_str())?
            .with_api_path(self.api_path.as_str())
            .with_timeout(self.timeout)
            .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unfiltered_local_backend() {
        let args = Args::try_parse_from(["userlist"]).unwrap();
        assert_eq!(args.api_path, "/api/users");
        assert_eq!(args.form(), FilterForm::new());
        assert!(!args.plain);
    }

    #[test]
    fn filters_become_form_values() {
        let args = Args::try_parse_from([
            "userlist",
            "--base-url",
            "http://users.local",
            "--age",
            "30",
            "--company",
            "Acme",
        ])
        .unwrap();

        let form = args.form();
        assert_eq!(form.value(FilterField::Age), "30");
        assert_eq!(form.value(FilterField::Company), "Acme");
        assert_eq!(args.config().unwrap().base_url, "http://users.local");
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        let args = Args::try_parse_from(["userlist", "--timeout", "0"]).unwrap();
        assert!(args.config().is_err());
    }
}
