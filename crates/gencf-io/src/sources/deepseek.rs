//! Chat-completions client that labels capacity factors in batches.
//!
//! Speaks the OpenAI-style `/v1/chat/completions` protocol used by DeepSeek.
//! The model is asked for a bare JSON object mapping plant names to labels;
//! the first balanced `{...}` span of the reply is taken as that object.

use gencf_core::{AiLabel, BatchClassifier, BatchOutcome, ClassificationFailure, PlantSummary};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typical capacity-factor range quoted to the model for one fuel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeGuidance {
    pub fuel: &'static str,
    pub range: &'static str,
}

/// Ranges stated in the prompt. These are looser-worded than the
/// deterministic rule table and are kept separate from it.
pub const DEFAULT_GUIDANCE: [RangeGuidance; 6] = [
    RangeGuidance { fuel: "Nuclear plants", range: "90%+ (highest)" },
    RangeGuidance { fuel: "Natural gas", range: "50-70%" },
    RangeGuidance { fuel: "Coal", range: "40-60%" },
    RangeGuidance { fuel: "Hydroelectric", range: "30-60%" },
    RangeGuidance { fuel: "Wind", range: "20-40% (intermittent)" },
    RangeGuidance { fuel: "Solar PV", range: "20-30% (intermittent)" },
];

#[derive(Debug, Clone)]
pub struct ChatClassifierConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout: Duration,
}

impl Default for ChatClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Remote classifier over a chat-completions endpoint.
pub struct ChatClassifier {
    api_key: String,
    config: ChatClassifierConfig,
    /// Human-readable month named in the prompt, e.g. "February 2025"
    period_label: String,
    agent: ureq::Agent,
}

impl ChatClassifier {
    pub fn new(
        api_key: impl Into<String>,
        period_label: impl Into<String>,
        config: ChatClassifierConfig,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self {
            api_key: api_key.into(),
            config,
            period_label: period_label.into(),
            agent,
        }
    }

    pub fn config(&self) -> &ChatClassifierConfig {
        &self.config
    }

    fn request_body(&self, prompt: String) -> Value {
        json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl BatchClassifier for ChatClassifier {
    fn classify_batch(&self, batch: &[PlantSummary]) -> BatchOutcome {
        let prompt = build_prompt(batch, &self.period_label, &DEFAULT_GUIDANCE)?;
        let response = self
            .agent
            .post(&self.config.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(self.request_body(prompt))
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => ClassificationFailure::Status(code),
                ureq::Error::Transport(transport) => {
                    ClassificationFailure::Transport(transport.to_string())
                }
            })?;

        let reply: ChatResponse = response
            .into_json()
            .map_err(|err| ClassificationFailure::Unparseable(err.to_string()))?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClassificationFailure::Unparseable("reply has no choices".into()))?;

        debug!(plants = batch.len(), reply_len = content.len(), "classifier replied");
        parse_label_map(&content)
    }
}

/// The natural-language request for one batch.
pub fn build_prompt(
    batch: &[PlantSummary],
    period_label: &str,
    guidance: &[RangeGuidance],
) -> Result<String, ClassificationFailure> {
    let plants = serde_json::to_string_pretty(batch)
        .map_err(|err| ClassificationFailure::Unparseable(err.to_string()))?;
    let ranges: Vec<String> = guidance
        .iter()
        .map(|g| format!("- {}: {}", g.fuel, g.range))
        .collect();

    Ok(format!(
        "Analyze these power plants' capacity factors for {period_label}.\n\
         Flag unusual variations based on these typical ranges:\n\n\
         {ranges}\n\n\
         Plants to analyze:\n{plants}\n\n\
         For each plant, respond with ONLY a JSON object mapping plant names to flags:\n\
         - \"Normal\" - within expected range\n\
         - \"High_[FuelType]\" - unusually high for fuel type\n\
         - \"Low_[FuelType]\" - unusually low for fuel type\n\
         - \"Extreme_[FuelType]\" - extremely unusual\n\
         - \"Mixed_Fuel_Unusual\" - for mixed fuel plants with odd performance\n\n\
         Example response format:\n\
         {{\"Plant Name 1\": \"Normal\", \"Plant Name 2\": \"High_Nuclear\", \"Plant Name 3\": \"Low_Solar\"}}\n",
        ranges = ranges.join("\n"),
    ))
}

/// First balanced `{...}` span in `text`, ignoring braces inside strings.
pub fn extract_first_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a model reply into plant-name → label.
pub fn parse_label_map(reply: &str) -> BatchOutcome {
    let object = extract_first_object(reply)
        .ok_or_else(|| ClassificationFailure::Unparseable("no JSON object in reply".into()))?;
    let raw: HashMap<String, Value> = serde_json::from_str(object)
        .map_err(|err| ClassificationFailure::Unparseable(err.to_string()))?;
    if raw.is_empty() {
        return Err(ClassificationFailure::Empty);
    }

    raw.into_iter()
        .map(|(plant, value)| {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            match text.parse::<AiLabel>() {
                Ok(label) => Ok((plant, label)),
                Err(_) => Err(ClassificationFailure::UnknownLabel { plant, label: text }),
            }
        })
        .collect()
}
