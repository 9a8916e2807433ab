//! # Weather Adapter
//!
//! File: cli/src/delegation/weather.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Resolves a place name to a one-line weather description by calling an
//! HTTP endpoint. The endpoint is a URL template containing `{place}`; the
//! default points at wttr.in's one-line format.
//!
//! The call is blocking. The session loop waits for it, and the only timeout
//! is the one configured on the agent.
//!
use crate::core::config::WeatherConfig;
use crate::core::error::{ChatbotError, Result};
use crate::delegation::{DelegationAdapter, DelegationRequest};
use std::time::Duration;
use tracing::{debug, info};
use url::form_urlencoded::byte_serialize;

pub struct WeatherAdapter {
    agent: ureq::Agent,
    endpoint: String,
}

impl WeatherAdapter {
    pub fn new(config: &WeatherConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("simplebot/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
        }
    }

    /// Builds the request URL for `place`.
    ///
    /// Runs of whitespace collapse to one space, then the place is
    /// form-encoded so reserved characters (`?`, `#`, `/`, `&`) stay inside
    /// the path segment.
    pub fn url_for(&self, place: &str) -> String {
        let place = place.split_whitespace().collect::<Vec<_>>().join(" ");
        let encoded: String = byte_serialize(place.as_bytes()).collect();
        self.endpoint.replace("{place}", &encoded)
    }

    /// Looks up the weather for `place`.
    pub fn resolve_weather(&self, place: &str) -> Result<String> {
        if place.trim().is_empty() {
            return Err(ChatbotError::Weather("no place was given".to_string()).into());
        }
        let url = self.url_for(place);
        info!("Requesting weather for '{}' from {}", place, url);

        let response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                ChatbotError::Weather(format!("the service answered with HTTP status {}", code))
            }
            ureq::Error::Transport(transport) => ChatbotError::Weather(transport.to_string()),
        })?;

        let body = response
            .into_string()
            .map_err(|e| ChatbotError::Weather(format!("could not read the response: {}", e)))?;
        let body = body.trim();
        if body.is_empty() {
            return Err(ChatbotError::Weather("the service returned an empty answer".into()).into());
        }
        debug!("Weather service answered: {}", body);
        Ok(body.to_string())
    }
}

impl DelegationAdapter for WeatherAdapter {
    fn resolve(&self, request: &DelegationRequest) -> Result<String> {
        self.resolve_weather(&request.raw_argument)
    }
}
