//! Redis 配置模块
//! Redis configuration module

use crate::error::{Error, Result};
use redis::{ConnectionInfo, IntoConnectionInfo};

/// Redis 连接配置
/// Redis connection configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
  /// Redis 连接信息
  /// Redis connection info
  pub connection_info: ConnectionInfo,
}

impl RedisConfig {
  /// 创建新的 Redis 配置
  /// Create a new Redis configuration
  pub fn new<T: IntoConnectionInfo>(connection_info: T) -> Result<Self> {
    let connection_info = connection_info
      .into_connection_info()
      .map_err(|e| Error::config(format!("Invalid Redis connection info: {}", e)))?;
    Ok(Self { connection_info })
  }

  /// 从 Redis URL 创建配置
  /// Create configuration from Redis URL
  pub fn from_url(url: &str) -> Result<Self> {
    Self::new(url)
  }
}
