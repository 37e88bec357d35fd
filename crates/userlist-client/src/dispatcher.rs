//! Filtered-query dispatch and result rendering.
//!
//! A [`Dispatcher`] owns the GET collaborator and the two output regions.
//! Each [`Dispatcher::run`] builds the request URL from the form, awaits the
//! response and then overwrites both regions. Overlapping runs are not
//! coordinated: each writes on completion, so the last to finish wins.

use crate::render::OutputRegion;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use userlist_core::config::DEFAULT_API_PATH;
use userlist_core::highlight::highlight_value;
use userlist_core::{FilterForm, RequestUrl};

/// Source of JSON payloads for filtered requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Issue a GET for `request` and return the parsed body.
    async fn fetch_json(&self, request: &RequestUrl) -> Result<Value>;
}

/// What a successful run wrote into the regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    /// URL written to the echo region.
    pub request_url: RequestUrl,
    /// Highlighted markup written to the result region.
    pub result_markup: String,
}

/// Builds filtered requests and renders their responses.
#[derive(Clone)]
pub struct Dispatcher {
    source: Arc<dyn UserSource>,
    api_path: String,
    echo: Arc<dyn OutputRegion>,
    result: Arc<dyn OutputRegion>,
}

impl Dispatcher {
    /// Create a dispatcher writing into `echo` and `result`.
    pub fn new(
        source: Arc<dyn UserSource>,
        echo: Arc<dyn OutputRegion>,
        result: Arc<dyn OutputRegion>,
    ) -> Self {
        Self {
            source,
            api_path: DEFAULT_API_PATH.to_string(),
            echo,
            result,
        }
    }

    /// Override the collection path (defaults to `/api/users`).
    #[must_use]
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }

    /// Fetch the users matching `form` and render the response.
    ///
    /// On failure neither region is touched and the error is returned.
    pub async fn run(&self, form: &FilterForm) -> Result<Rendering> {
        let request = RequestUrl::build(&self.api_path, form);
        debug!(url = %request, "Getting users");

        let payload = match self.source.fetch_json(&request).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(url = %request, code = err.error_code(), "user request failed: {err}");
                return Err(err);
            }
        };

        let result_markup = highlight_value(&payload)?;

        self.echo.write(request.as_str());
        self.result.write(&result_markup);
        debug!(
            echo = self.echo.id(),
            result = self.result.id(),
            "rendered user response"
        );

        Ok(Rendering {
            request_url: request,
            result_markup,
        })
    }
}
