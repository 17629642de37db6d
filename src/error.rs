//! 错误处理模块
//! Error handling module
//!
//! 定义了 taskbroker 库中使用的错误类型。所有错误都作为值返回给调用方，
//! 由调用方决定重试、降级还是终止进程。
//! Defines the error types used in the taskbroker library. Every error is returned
//! to the caller as a value; the caller decides whether to retry, degrade or exit.

use thiserror::Error;

/// taskbroker 库的结果类型
/// Result type for the taskbroker library
pub type Result<T> = std::result::Result<T, Error>;

/// taskbroker 错误类型
/// taskbroker error type
#[derive(Error, Debug)]
pub enum Error {
  /// Redis 传输或连接错误
  /// Redis transport or connection error
  #[error("Redis connection error: {0}")]
  Redis(#[from] redis::RedisError),

  /// 任务记录的序列化或反序列化错误
  /// Serialization or deserialization error of a task record
  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// 配置错误
  /// Configuration error
  #[error("Configuration error: {message}")]
  Config { message: String },

  /// 其他错误
  /// Other error
  #[error("Other error: {message}")]
  Other { message: String },
}

impl Error {
  /// 创建配置错误
  /// Create a configuration error
  pub fn config<S: Into<String>>(message: S) -> Self {
    Self::Config {
      message: message.into(),
    }
  }

  /// 创建其他错误
  /// Create another type of error
  pub fn other<S: Into<String>>(message: S) -> Self {
    Self::Other {
      message: message.into(),
    }
  }

  /// 检查是否为可重试错误
  /// Check if the error is retriable
  ///
  /// 只有传输层错误可能在重试后成功；损坏的记录和错误的配置不会自行恢复。
  /// Only transport errors may succeed on retry; malformed records and bad
  /// configuration do not heal themselves.
  pub fn is_retriable(&self) -> bool {
    match self {
      Error::Redis(e) => e.is_io_error() || e.is_connection_dropped() || e.is_timeout(),
      Error::Serialization(_) | Error::Config { .. } | Error::Other { .. } => false,
    }
  }

  /// 检查是否为致命错误
  /// Check if the error is fatal
  pub fn is_fatal(&self) -> bool {
    !self.is_retriable()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_creation() {
    let err = Error::config("test config error");
    assert!(matches!(err, Error::Config { .. }));
    assert_eq!(err.to_string(), "Configuration error: test config error");

    let err = Error::other("test other error");
    assert!(matches!(err, Error::Other { .. }));
  }

  #[test]
  fn test_serialization_error_is_fatal() {
    let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
      .unwrap_err()
      .into();
    assert!(matches!(err, Error::Serialization(_)));
    assert!(err.is_fatal());
    assert!(!err.is_retriable());
  }

  #[test]
  fn test_io_redis_error_is_retriable() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = Error::from(redis::RedisError::from(io));
    assert!(err.is_retriable());
  }
}
