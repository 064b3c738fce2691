//! 应用运行配置加载。

use domain::DeviceCategory;
use std::collections::HashSet;
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub device_host: String,
    pub device_port: u16,
    pub poll_interval_secs: u64,
    pub cycle_timeout_ms: u64,
    pub connect_max_retries: u32,
    pub device_categories: HashSet<DeviceCategory>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let device_host = env::var("HEATLINK_DEVICE_HOST")
            .map_err(|_| ConfigError::Missing("HEATLINK_DEVICE_HOST".to_string()))?;
        let device_port = read_u16_with_default("HEATLINK_DEVICE_PORT", 502)?;
        let poll_interval_secs = read_u64_with_default("HEATLINK_POLL_INTERVAL_SECONDS", 20)?;
        let cycle_timeout_ms = read_u64_with_default("HEATLINK_CYCLE_TIMEOUT_MS", 5000)?;
        let connect_max_retries = read_u32_with_default("HEATLINK_CONNECT_MAX_RETRIES", 5)?;
        let device_categories = read_categories("HEATLINK_DEVICE_CATEGORIES")?;

        Ok(Self {
            device_host,
            device_port,
            poll_interval_secs,
            cycle_timeout_ms,
            connect_max_retries,
            device_categories,
        })
    }
}

fn read_u16_with_default(key: &str, default: u16) -> Result<u16, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

/// 读取逗号分隔的设备类别标签集合（缺省为空集）。
fn read_categories(key: &str) -> Result<HashSet<DeviceCategory>, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(HashSet::new()),
    };

    let mut categories = HashSet::new();
    for tag in value.split(',').filter(|tag| !tag.trim().is_empty()) {
        let category = tag
            .parse::<DeviceCategory>()
            .map_err(|_| ConfigError::Invalid(key.to_string(), tag.trim().to_string()))?;
        categories.insert(category);
    }
    Ok(categories)
}
