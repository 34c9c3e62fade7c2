//! AI ritual suggestions.
//!
//! An external text-generation service proposes three
//! title/description/difficulty triples for a goal. The service is never
//! load-bearing: any failure degrades to [`local_fallback`], which is
//! deterministic and derived from the goal text alone.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{SuggestError, ValidationError};
use crate::model::Difficulty;
use crate::storage::Config;

/// Maximum accepted goal length.
pub const MAX_GOAL_LEN: usize = 200;

/// One proposed ritual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RitualSuggestion {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
}

/// Anything that can answer a goal with ritual suggestions.
pub trait SuggestionProvider: Send + Sync {
    fn suggest(&self, goal: &str) -> Result<Vec<RitualSuggestion>, SuggestError>;
}

/// Validate a goal before sending it anywhere.
pub fn validate_goal(goal: &str) -> Result<(), ValidationError> {
    if goal.trim().is_empty() {
        return Err(ValidationError::MissingField("goal".to_string()));
    }
    if goal.len() > MAX_GOAL_LEN {
        return Err(ValidationError::invalid(
            "goal",
            format!("must be at most {MAX_GOAL_LEN} characters"),
        ));
    }
    Ok(())
}

/// The deterministic offline suggestion list: three tiers built from the
/// goal text. This is part of the core contract, not a stub.
pub fn local_fallback(goal: &str) -> Vec<RitualSuggestion> {
    let goal = goal.trim();
    let short = if goal.chars().count() > 20 {
        let head: String = goal.chars().take(20).collect();
        format!("{head}...")
    } else {
        goal.to_string()
    };
    vec![
        RitualSuggestion {
            title: format!("Path of the {short}"),
            description: format!("Small consistent steps towards {goal}."),
            difficulty: Difficulty::Novice,
        },
        RitualSuggestion {
            title: format!("Protocol: {short}"),
            description: format!("Daily rigorous training focused on {goal}. No excuses."),
            difficulty: Difficulty::Adept,
        },
        RitualSuggestion {
            title: format!("Mastery of {short}"),
            description: format!("Extreme immersion in {goal}."),
            difficulty: Difficulty::Master,
        },
    ]
}

/// HTTP-backed provider: POSTs the goal as JSON and expects a JSON array
/// of `{title, description, difficulty}` objects.
pub struct HttpSuggestionProvider {
    endpoint: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl HttpSuggestionProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout_secs: 10,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.suggest.endpoint.clone(),
            api_key: config.suggest.api_key.clone(),
            timeout_secs: config.suggest.timeout_secs,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn request(&self, goal: &str) -> Result<Vec<RitualSuggestion>, SuggestError> {
        let client = reqwest::Client::new();
        let body = json!({
            "goal": goal,
            "count": 3,
            "tone": "stoic",
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SuggestError::BadResponse(e.to_string()))?;

        runtime.block_on(async {
            let mut request = client
                .post(&self.endpoint)
                .timeout(std::time::Duration::from_secs(self.timeout_secs))
                .json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SuggestError::BadStatus {
                    status: status.as_u16(),
                    body,
                });
            }
            let suggestions: Vec<RitualSuggestion> = response
                .json()
                .await
                .map_err(|e| SuggestError::BadResponse(e.to_string()))?;
            if suggestions.is_empty() {
                return Err(SuggestError::BadResponse("empty suggestion list".to_string()));
            }
            Ok(suggestions)
        })
    }
}

impl SuggestionProvider for HttpSuggestionProvider {
    fn suggest(&self, goal: &str) -> Result<Vec<RitualSuggestion>, SuggestError> {
        if self.endpoint.is_empty() {
            return Err(SuggestError::NotConfigured);
        }
        self.request(goal)
    }
}

/// Ask the provider, falling back to the local list on any failure. This
/// path never blocks on a dead service beyond the configured timeout and
/// never errors.
pub fn suggest_or_fallback(provider: &dyn SuggestionProvider, goal: &str) -> Vec<RitualSuggestion> {
    provider.suggest(goal).unwrap_or_else(|_| local_fallback(goal))
}
