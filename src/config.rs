use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use url::Url;

use crate::ledger::{ExplorerConfig, SourceMode};
use crate::proofs::RegisterLayout;

/// Largest page the explorer serves for box searches
const MAX_PAGE_SIZE: u32 = 500;

/// Configuration for the reputation proof service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofsConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Record source selection
    pub source: SourceConfig,
    /// Ergo explorer access
    pub explorer: ExplorerConfig,
    /// Register roles inside proof boxes
    pub registers: RegisterLayout,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Explorer for real data, demo for generated boxes
    pub mode: SourceMode,
    /// Boxes generated per request in demo mode
    pub demo_records: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Explorer,
            demo_records: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Emit span open/close events for requests
    pub log_requests: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_requests: false,
        }
    }
}

impl ProofsConfig {
    /// Load configuration from environment variables and validate it
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Server configuration
        if let Some(host) = lookup("PROOFS_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PROOFS_PORT")? {
            config.server.port = port;
        }

        // Record source
        if let Some(mode) = lookup("PROOFS_SOURCE_MODE") {
            config.source.mode = SourceMode::from_str(&mode)
                .map_err(|e| anyhow::anyhow!("Invalid PROOFS_SOURCE_MODE value: {}", e))?;
        }
        if let Some(records) = parse_var(&lookup, "PROOFS_DEMO_RECORDS")? {
            config.source.demo_records = records;
        }

        // Explorer configuration
        if let Some(url) = lookup("PROOFS_EXPLORER_URL") {
            config.explorer.url = url;
        }
        if let Some(hash) = lookup("PROOFS_CONTRACT_TEMPLATE_HASH") {
            config.explorer.contract_template_hash = hash;
        }
        if let Some(timeout) = parse_var(&lookup, "PROOFS_EXPLORER_TIMEOUT_SECS")? {
            config.explorer.timeout_secs = timeout;
        }
        if let Some(retries) = parse_var(&lookup, "PROOFS_EXPLORER_MAX_RETRIES")? {
            config.explorer.max_retries = retries;
        }
        if let Some(delay) = parse_var(&lookup, "PROOFS_EXPLORER_RETRY_DELAY_MS")? {
            config.explorer.retry_delay_ms = delay;
        }
        if let Some(page_size) = parse_var(&lookup, "PROOFS_EXPLORER_PAGE_SIZE")? {
            config.explorer.page_size = page_size;
        }
        if let Some(max_records) = parse_var(&lookup, "PROOFS_EXPLORER_MAX_RECORDS")? {
            config.explorer.max_records = max_records;
        }
        if let Some(require_https) = parse_var(&lookup, "PROOFS_REQUIRE_HTTPS")? {
            config.explorer.require_https = require_https;
        }

        // Register layout
        if let Some(register) = lookup("PROOFS_OWNER_REGISTER") {
            config.registers.owner_register = register.trim().to_uppercase();
        }
        if let Some(register) = lookup("PROOFS_EXPENDED_REGISTER") {
            config.registers.expended_register = register.trim().to_uppercase();
        }
        if let Some(registers) = lookup("PROOFS_ASSIGNMENT_REGISTERS") {
            config.registers.assignment_registers = registers
                .split(',')
                .map(|r| r.trim().to_uppercase())
                .filter(|r| !r.is_empty())
                .collect();
        }

        // Logging configuration
        if let Some(level) = lookup("PROOFS_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(log_requests) = parse_var(&lookup, "PROOFS_LOG_REQUESTS")? {
            config.logging.log_requests = log_requests;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration for security and consistency
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(anyhow::anyhow!("Server host cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port must be non-zero"));
        }

        let explorer_url = Url::parse(&self.explorer.url)
            .with_context(|| format!("Invalid explorer URL: {}", self.explorer.url))?;

        if self.explorer.require_https && explorer_url.scheme() != "https" {
            return Err(anyhow::anyhow!(
                "HTTPS is required but explorer URL is not HTTPS: {}",
                self.explorer.url
            ));
        }

        if self.explorer.contract_template_hash.trim().is_empty() {
            return Err(anyhow::anyhow!("Contract template hash cannot be empty"));
        }

        if self.explorer.max_retries == 0 {
            return Err(anyhow::anyhow!("Explorer max retries must be at least 1"));
        }

        if self.explorer.page_size == 0 || self.explorer.page_size > MAX_PAGE_SIZE {
            return Err(anyhow::anyhow!(
                "Explorer page size must be between 1 and {}",
                MAX_PAGE_SIZE
            ));
        }

        if self.explorer.max_records == 0 {
            return Err(anyhow::anyhow!("Explorer max records must be non-zero"));
        }

        self.registers
            .validate()
            .context("Invalid register layout")?;

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {} value", key))
        })
        .transpose()
}
