//! Shared environment state of the fetcher.
//!
//! [`FetchEnv`] owns the persistent HTTP client used for every Horizons
//! query of a run. It is cheaply cloneable and passed by reference to the
//! components that need the network.

use std::time::Duration;

use ureq::Agent;

use crate::errors::OrbitsError;

/// This object is passed to the various functions of the crate to provide
/// access to the HTTP client.
#[derive(Debug, Clone)]
pub struct FetchEnv {
    pub http_client: Agent,
}

impl Default for FetchEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchEnv {
    /// Create a new environment with an HTTP client using default settings
    /// and a global request timeout.
    pub fn new() -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();
        let agent: Agent = config.into();

        FetchEnv { http_client: agent }
    }

    /// Perform a GET request with query parameters and return the body text.
    ///
    /// Argument
    /// --------
    /// * `url`: the endpoint to query
    /// * `params`: the query parameters, appended in order
    ///
    /// Return
    /// ------
    /// * The response body, or an error on transport failure or a non-2xx
    ///   status.
    pub fn get_with_query(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<String, OrbitsError> {
        let mut request = self.http_client.get(url);
        for (key, value) in params {
            request = request.query(*key, value);
        }
        let body = request.call()?.body_mut().read_to_string()?;
        Ok(body)
    }
}
