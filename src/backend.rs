//! 后端模块
//! Backend module
//!
//! 根据连接 URL 构造 broker。进程启动时调用一次，把返回的 `Arc<dyn Broker>`
//! 传给生产者和工作者。
//! Builds a broker from a connection URL. Call it once at startup and hand the returned
//! `Arc<dyn Broker>` to producers and workers.
//!
//! ```rust,no_run
//! use taskbroker::backend;
//! use taskbroker::config::BrokerConfig;
//!
//! # async fn run() -> taskbroker::error::Result<()> {
//! let broker = backend::open("redis://127.0.0.1:6379", BrokerConfig::new().task_ttl(3600)).await?;
//! broker.ping().await?;
//! # Ok(())
//! # }
//! ```

use crate::base::Broker;
use crate::config::BrokerConfig;
use crate::error::{Error, Result};
use crate::memdb::MemoryBroker;
use crate::rdb::RedisBroker;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// 后端类型
/// Backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
  /// Redis 后端（`redis://`、`unix://`、`redis+unix://`）
  /// Redis backend (`redis://`, `unix://`, `redis+unix://`)
  Redis,
  /// 进程内后端（`memory://`）
  /// In-process backend (`memory://`)
  Memory,
}

impl BackendKind {
  /// 从连接 URL 的 scheme 推断后端类型
  /// Infer the backend type from the scheme of a connection URL
  pub fn from_url(url: &str) -> Result<Self> {
    let (scheme, _) = url
      .split_once("://")
      .ok_or_else(|| Error::config(format!("Broker URL has no scheme: {url}")))?;
    scheme.parse()
  }
}

impl FromStr for BackendKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "redis" | "unix" | "redis+unix" => Ok(Self::Redis),
      "memory" => Ok(Self::Memory),
      other => Err(Error::config(format!("Unsupported broker URL scheme: {other}"))),
    }
  }
}

impl fmt::Display for BackendKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Redis => write!(f, "redis"),
      Self::Memory => write!(f, "memory"),
    }
  }
}

/// 根据 URL 和配置打开 broker
/// Open a broker from a URL and configuration
pub async fn open(url: &str, config: BrokerConfig) -> Result<Arc<dyn Broker>> {
  let kind = BackendKind::from_url(url)?;
  tracing::debug!("Opening {} broker", kind);
  let broker: Arc<dyn Broker> = match kind {
    BackendKind::Redis => Arc::new(RedisBroker::connect(url, config).await?),
    BackendKind::Memory => Arc::new(MemoryBroker::with_config(config)?),
  };
  Ok(broker)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::Task;

  #[test]
  fn test_backend_kind_from_url() {
    assert_eq!(
      BackendKind::from_url("redis://127.0.0.1:6379/0").unwrap(),
      BackendKind::Redis
    );
    assert_eq!(
      BackendKind::from_url("unix:///tmp/redis.sock").unwrap(),
      BackendKind::Redis
    );
    assert_eq!(BackendKind::from_url("memory://").unwrap(), BackendKind::Memory);
    assert_eq!(BackendKind::from_url("MEMORY://local").unwrap(), BackendKind::Memory);
  }

  #[test]
  fn test_backend_kind_rejects_unknown() {
    assert!(matches!(
      BackendKind::from_url("amqp://localhost"),
      Err(Error::Config { .. })
    ));
    assert!(matches!(
      BackendKind::from_url("localhost:6379"),
      Err(Error::Config { .. })
    ));
  }

  #[tokio::test]
  async fn test_open_memory_broker() {
    let broker = open("memory://", BrokerConfig::default()).await.unwrap();
    broker.ping().await.unwrap();
    let task = Task::new("t1", "q", "hi").unwrap();
    assert_eq!(broker.enqueue(&task).await.unwrap(), "t1");
    assert_eq!(broker.queue_len("q").await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_open_rejects_invalid_config() {
    let result = open("memory://", BrokerConfig::new().namespace("")).await;
    assert!(matches!(result, Err(Error::Config { .. })));
  }
}
