//! Configuration for gencf runs.
//! Read from `~/.gencf/config.toml` unless `--config` names another file.

use anyhow::{anyhow, Context, Result};
use gencf_algo::AiPassConfig;
use gencf_io::{sources::deepseek, sources::eia, ChatClassifierConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main gencf configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GencfConfig {
    /// Generation API settings
    #[serde(default)]
    pub eia: EiaConfig,
    /// Plant attributes table
    #[serde(default)]
    pub reference: ReferenceConfig,
    /// Remote classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Where dumps are written
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EiaConfig {
    #[serde(default = "default_eia_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_length")]
    pub page_length: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EiaConfig {
    fn default() -> Self {
        Self {
            base_url: default_eia_base_url(),
            page_length: default_page_length(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_eia_base_url() -> String {
    eia::DEFAULT_BASE_URL.to_string()
}

fn default_page_length() -> usize {
    eia::DEFAULT_PAGE_LENGTH
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceConfig {
    #[serde(default = "default_reference_csv")]
    pub csv_path: PathBuf,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            csv_path: default_reference_csv(),
        }
    }
}

fn default_reference_csv() -> PathBuf {
    PathBuf::from(gencf_io::DEFAULT_REFERENCE_PATH)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause after each batch (0 = none)
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
            pacing_ms: default_pacing_ms(),
        }
    }
}

fn default_endpoint() -> String {
    deepseek::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    deepseek::DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    deepseek::DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f64 {
    deepseek::DEFAULT_TEMPERATURE
}

fn default_batch_size() -> usize {
    gencf_algo::ai_review::DEFAULT_BATCH_SIZE
}

fn default_pacing_ms() -> u64 {
    2000
}

impl ClassifierConfig {
    pub fn client_config(&self) -> ChatClassifierConfig {
        ChatClassifierConfig {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Batch policy with optional command-line overrides applied.
    pub fn pass_config(&self, batch_size: Option<usize>, pacing_ms: Option<u64>) -> AiPassConfig {
        AiPassConfig {
            batch_size: batch_size.unwrap_or(self.batch_size),
            pacing: Duration::from_millis(pacing_ms.unwrap_or(self.pacing_ms)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_raw_dump")]
    pub raw_dump: PathBuf,
    #[serde(default = "default_merged_dump")]
    pub merged_dump: PathBuf,
    #[serde(default = "default_enriched_dump")]
    pub enriched_dump: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            raw_dump: default_raw_dump(),
            merged_dump: default_merged_dump(),
            enriched_dump: default_enriched_dump(),
        }
    }
}

fn default_raw_dump() -> PathBuf {
    PathBuf::from(gencf_io::RAW_DUMP_PATH)
}

fn default_merged_dump() -> PathBuf {
    PathBuf::from(gencf_io::MERGED_DUMP_PATH)
}

fn default_enriched_dump() -> PathBuf {
    PathBuf::from(gencf_io::ENRICHED_DUMP_PATH)
}

/// Location: ~/.gencf/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
    Ok(home.join(".gencf").join("config.toml"))
}

/// Load `explicit` if given (it must exist), else the default file if present,
/// else built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<GencfConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Ok(path) if path.exists() => path,
            _ => return Ok(GencfConfig::default()),
        },
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<GencfConfig> {
    let config: GencfConfig = toml::from_str(contents)?;
    Ok(config)
}
