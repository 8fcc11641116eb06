//! One submission in, one card out.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    icons::{self, IconAsset},
    model::{QueryOutcome, WeatherQuery},
    provider::{self, WeatherProvider},
    view::{ViewModel, to_view_model},
};

/// Runs the fetch-then-map pipeline. Holds no state between submissions.
#[derive(Debug, Clone)]
pub struct WeatherCard {
    provider: Arc<dyn WeatherProvider>,
    icons: &'static IconAsset,
}

impl WeatherCard {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, icons: icons::icons() }
    }

    pub fn from_boxed(provider: Box<dyn WeatherProvider>) -> Self {
        Self::new(Arc::from(provider))
    }

    /// Classify raw form input. Blank input never reaches the provider.
    pub async fn outcome(&self, raw_city: &str) -> QueryOutcome {
        let Some(query) = WeatherQuery::parse(raw_city) else {
            debug!("empty city submitted");
            return QueryOutcome::EmptyInput;
        };

        let outcome = provider::fetch(self.provider.as_ref(), &query).await;
        info!(city = %query, outcome = outcome_kind(&outcome), "weather query finished");
        outcome
    }

    pub async fn submit(&self, raw_city: &str) -> ViewModel {
        let outcome = self.outcome(raw_city).await;
        to_view_model(&outcome, self.icons)
    }
}

fn outcome_kind(outcome: &QueryOutcome) -> &'static str {
    match outcome {
        QueryOutcome::Success(_) => "success",
        QueryOutcome::NotFound => "not_found",
        QueryOutcome::NetworkError => "network_error",
        QueryOutcome::OtherError(_) => "other_error",
        QueryOutcome::EmptyInput => "empty_input",
    }
}
