//! 配置模块
//! Configuration module
//!
//! 定义了 broker 的配置选项
//! Defines configuration options for brokers

use crate::base::constants::{DEFAULT_NAMESPACE, DEFAULT_TASK_TTL, ENV_NAMESPACE, ENV_TASK_TTL};
use crate::error::{Error, Result};
use std::time::Duration;

/// Broker 配置
/// Broker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
  /// 元数据记录的 TTL（秒）。0 表示记录不过期
  /// TTL of metadata records in seconds. 0 means records never expire
  pub task_ttl: u64,
  /// 键命名空间
  /// Key namespace
  pub namespace: String,
}

impl Default for BrokerConfig {
  fn default() -> Self {
    Self {
      task_ttl: DEFAULT_TASK_TTL,
      namespace: DEFAULT_NAMESPACE.to_string(),
    }
  }
}

impl BrokerConfig {
  /// 创建新的 broker 配置
  /// Create a new broker configuration
  pub fn new() -> Self {
    Self::default()
  }

  /// 从环境变量读取配置，未设置的项使用默认值
  /// Read configuration from environment variables, falling back to defaults
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();
    if let Some(raw) = lookup(ENV_TASK_TTL) {
      config.task_ttl = raw.trim().parse().map_err(|e| {
        Error::config(format!("{ENV_TASK_TTL} must be a non-negative integer: {e}"))
      })?;
    }
    if let Some(namespace) = lookup(ENV_NAMESPACE) {
      config.namespace = namespace;
    }
    config.validate()?;
    Ok(config)
  }

  /// 设置任务 TTL（秒）- 对应 Go 的 WithRedisTaskTTL
  /// Set the task TTL in seconds - Corresponds to Go's WithRedisTaskTTL
  pub fn task_ttl(mut self, seconds: u64) -> Self {
    self.task_ttl = seconds;
    self
  }

  /// 设置键命名空间
  /// Set the key namespace
  pub fn namespace<S: Into<String>>(mut self, namespace: S) -> Self {
    self.namespace = namespace.into();
    self
  }

  /// 元数据记录过期时间，`None` 表示不过期
  /// Expiry of metadata records, `None` means no expiry
  pub fn ttl(&self) -> Option<Duration> {
    (self.task_ttl > 0).then(|| Duration::from_secs(self.task_ttl))
  }

  /// 验证配置
  /// Validate configuration
  pub fn validate(&self) -> Result<()> {
    if self.namespace.trim().is_empty() {
      return Err(Error::config("Namespace must not be empty"));
    }
    if self.namespace.contains(char::is_whitespace) {
      return Err(Error::config("Namespace must not contain whitespace"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key| map.get(key).cloned()
  }

  #[test]
  fn test_broker_config_default() {
    let config = BrokerConfig::default();
    assert_eq!(config.task_ttl, 0);
    assert_eq!(config.namespace, "gt");
    assert_eq!(config.ttl(), None);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_broker_config_builder() {
    let config = BrokerConfig::new().task_ttl(3600).namespace("jobs");
    assert_eq!(config.ttl(), Some(Duration::from_secs(3600)));
    assert_eq!(config.namespace, "jobs");
  }

  #[test]
  fn test_broker_config_validation() {
    assert!(BrokerConfig::new().namespace("").validate().is_err());
    assert!(BrokerConfig::new().namespace("a b").validate().is_err());
    assert!(BrokerConfig::new().namespace("a:b").validate().is_ok());
  }

  #[test]
  fn test_broker_config_from_lookup() {
    let config = BrokerConfig::from_lookup(lookup_from(&[
      (ENV_TASK_TTL, "120"),
      (ENV_NAMESPACE, "prod"),
    ]))
    .unwrap();
    assert_eq!(config.task_ttl, 120);
    assert_eq!(config.namespace, "prod");

    let config = BrokerConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config, BrokerConfig::default());
  }

  #[test]
  fn test_broker_config_from_lookup_rejects_bad_ttl() {
    let err = BrokerConfig::from_lookup(lookup_from(&[(ENV_TASK_TTL, "-5")])).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(BrokerConfig::from_lookup(lookup_from(&[(ENV_NAMESPACE, " ")])).is_err());
  }
}
