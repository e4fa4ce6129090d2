//! 服务配置
//!
//! 从 YAML 文件加载，缺失字段使用默认值；文件不存在时整体使用默认配置。

use paramware::ParamOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("无效的日志级别: {0}")]
    InvalidLogLevel(String),
}

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 日志级别（trace / debug / info / warn / error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 参数提取器配置
    #[serde(default)]
    pub params: ParamOptions,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            params: ParamOptions::default(),
        }
    }
}

impl ServerConfig {
    /// 从 YAML 文件加载
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// 未指定路径或文件不存在时返回默认配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!("配置文件 {} 不存在，使用默认配置", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// 监听地址 `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramware::DuplicatePolicy;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.level().unwrap(), tracing::Level::INFO);
        assert_eq!(config.params.duplicates, DuplicatePolicy::First);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ServerConfig::from_yaml("port: 9000\nparams:\n  duplicates: reject\n").unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.params.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = ServerConfig::from_yaml("log_level: loud\n").unwrap();
        assert!(matches!(config.level(), Err(ConfigError::InvalidLogLevel(level)) if level == "loud"));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = ServerConfig::from_yaml("port: not-a-port\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: 0.0.0.0\nport: 3000\nlog_level: debug").unwrap();

        let config = ServerConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let config = ServerConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.port, 8080);

        let config = ServerConfig::load_or_default(None).unwrap();
        assert_eq!(config.port, 8080);
    }
}
