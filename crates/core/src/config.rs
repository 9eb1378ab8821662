use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub ocr: OcrConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `RECAP_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("RECAP_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            ocr: OcrConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:  {}:{}, max_upload={}MB", self.server.host, self.server.port, self.server.max_upload_mb);
        tracing::info!("  llm:     provider={}, model={}, configured={}", self.llm.provider, self.llm.model(), self.llm.is_configured());
        tracing::info!("  ocr:     command={}, lang={}", self.ocr.command, self.ocr.language);
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "max_upload_mb": self.server.max_upload_mb,
            },
            "llm": {
                "provider": self.llm.provider,
                "model": self.llm.model(),
                "temperature": self.llm.temperature,
                "max_tokens": self.llm.max_tokens,
                "timeout_secs": self.llm.timeout_secs,
                "configured": self.llm.is_configured(),
            },
            "ocr": { "command": self.ocr.command, "language": self.ocr.language },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub max_upload_mb: u32,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8501),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_upload_mb: profiled_env_u32(p, "MAX_UPLOAD_MB", 50),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb as usize * 1024 * 1024
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            cors_origin: "*".to_string(),
            max_upload_mb: 50,
        }
    }
}

// ── LLM (Groq / OpenAI-compatible) ────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "groq" or "openai"
    pub provider: String,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub temperature: f32,
    /// Completion cap; `None` leaves the length to the provider.
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "groq"),
            groq_api_key: profiled_env_opt(p, "GROQ_API_KEY"),
            groq_model: profiled_env_or(p, "GROQ_MODEL", "llama-3.1-8b-instant"),
            groq_base_url: profiled_env_opt(p, "GROQ_BASE_URL"),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_model: profiled_env_or(p, "OPENAI_MODEL", "gpt-4o-mini"),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0.5")
                .parse()
                .unwrap_or(0.5),
            max_tokens: profiled_env_opt(p, "LLM_MAX_TOKENS").and_then(|v| v.parse().ok()),
            timeout_secs: profiled_env_u64(p, "LLM_TIMEOUT_SECS", 60),
        }
    }

    /// Model name for the active provider.
    pub fn model(&self) -> &str {
        match self.provider.as_str() {
            "openai" => &self.openai_model,
            _ => &self.groq_model,
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "groq" => self.groq_api_key.is_some(),
            "openai" => self.openai_api_key.is_some(),
            _ => false,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            groq_api_key: None,
            groq_model: "llama-3.1-8b-instant".to_string(),
            groq_base_url: None,
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: None,
            temperature: 0.5,
            max_tokens: None,
            timeout_secs: 60,
        }
    }
}

// ── OCR ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract executable (name on PATH or absolute path).
    pub command: String,
    /// Tesseract language code.
    pub language: String,
}

impl OcrConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            command: profiled_env_or(p, "OCR_COMMAND", "tesseract"),
            language: profiled_env_or(p, "OCR_LANG", "eng"),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}
