//! Runtime configuration, read once from the environment at startup.
//!
//! The resulting [`GaiConfig`] is passed by reference into every component;
//! nothing in the action pipeline reads the environment directly.

pub mod prompts;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::error::{ConfigError, PreconditionError};

pub use prompts::{PromptSet, PromptSource, PromptTemplate};

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV_VAR: &str = "OPENAI_MODEL";
pub const MAX_TOKENS_ENV_VAR: &str = "OPENAI_MAX_TOKENS";
pub const TEMPERATURE_ENV_VAR: &str = "OPENAI_TEMPERATURE";
pub const TOP_P_ENV_VAR: &str = "OPENAI_TOP_P";
pub const MAIN_BRANCH_ENV_VAR: &str = "MAIN_BRANCH";
pub const REMOTE_ENV_VAR: &str = "GAI_REMOTE";
pub const VERBOSE_ENV_VAR: &str = "VERBOSE";
pub const CONFIG_DIR_ENV_VAR: &str = "GAI_CONFIG";

/// Editor preference, most specific first.
pub const EDITOR_ENV_VARS: [&str; 3] = ["GAI_EDITOR", "VISUAL", "EDITOR"];

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 16384;
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_MAIN_BRANCH: &str = "main";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_EDITOR: &str = "vim";

/// Sampling parameters for the text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

/// Everything the pipeline needs to know about its environment.
#[derive(Debug, Clone)]
pub struct GaiConfig {
    pub api_key: Option<String>,
    pub model: ModelSettings,
    pub main_branch: String,
    pub remote: String,
    /// Editor command line, possibly with arguments (`code --wait`).
    pub editor: String,
    pub verbose: bool,
    pub prompt_dir: PathBuf,
    pub prompts: PromptSet,
}

impl GaiConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let model = ModelSettings {
            base_url: get(BASE_URL_ENV_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: parse_or_default(MAX_TOKENS_ENV_VAR, get(MAX_TOKENS_ENV_VAR), DEFAULT_MAX_TOKENS),
            temperature: parse_or_default(TEMPERATURE_ENV_VAR, get(TEMPERATURE_ENV_VAR), DEFAULT_TEMPERATURE),
            top_p: parse_or_default(TOP_P_ENV_VAR, get(TOP_P_ENV_VAR), DEFAULT_TOP_P),
        };

        let editor = EDITOR_ENV_VARS
            .iter()
            .find_map(|name| get(*name))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        let prompt_dir = resolve_prompt_dir(get(CONFIG_DIR_ENV_VAR), get("XDG_CONFIG_HOME"))?;
        let prompts = PromptSet::load(&prompt_dir);

        Ok(Self {
            api_key: get(API_KEY_ENV_VAR),
            model,
            main_branch: get(MAIN_BRANCH_ENV_VAR).unwrap_or_else(|| DEFAULT_MAIN_BRANCH.to_string()),
            remote: get(REMOTE_ENV_VAR).unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
            editor,
            verbose: get(VERBOSE_ENV_VAR).is_some_and(|v| parse_bool(&v)),
            prompt_dir,
            prompts,
        })
    }

    /// The API key, or the precondition failure that stops every action.
    pub fn require_api_key(&self) -> Result<&str, PreconditionError> {
        self.api_key
            .as_deref()
            .ok_or(PreconditionError::MissingApiKey)
    }
}

/// Whether `VERBOSE` asks for debug logging.
///
/// Read separately from [`GaiConfig::from_env`] so logging can be set up
/// before configuration warnings are emitted.
pub fn verbose_from_env() -> bool {
    env::var(VERBOSE_ENV_VAR).is_ok_and(|v| parse_bool(&v))
}

/// `GAI_CONFIG`, then `$XDG_CONFIG_HOME/gai`, then `~/.config/gai`.
fn resolve_prompt_dir(
    explicit: Option<String>,
    xdg_config_home: Option<String>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = xdg_config_home {
        return Ok(PathBuf::from(xdg).join("gai"));
    }
    dirs::home_dir()
        .map(|home| home.join(".config").join("gai"))
        .ok_or(ConfigError::NoHomeDir)
}

/// Parse `value`, logging a warning and using `default` when it is invalid.
fn parse_or_default<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match value {
        Some(v) => match v.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}", name, v, default);
                default
            }
        },
        None => default,
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
