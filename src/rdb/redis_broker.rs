//! Redis 经纪人实现
//! Redis broker implementation
//!
//! 负责连接管理、键名映射和元数据记录写入
//! Handles connection management, key mapping and metadata record writes

use crate::base::keys;
use crate::config::BrokerConfig;
use crate::error::Result;
use crate::redis::RedisConfig;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

/// Redis 经纪人实现
/// Redis broker implementation
///
/// 请求/响应命令共享一个多路复用连接；每次阻塞获取使用独立连接，
/// 避免挂起的 BRPOP 阻塞其他调用方的管道。
/// Request/response commands share one multiplexed connection; each blocking acquire
/// runs on its own connection so a pending BRPOP never stalls other callers' pipeline.
pub struct RedisBroker {
  client: Client,
  conn: MultiplexedConnection,
  config: BrokerConfig,
}

impl RedisBroker {
  /// 创建新的 Redis 经纪人实例 - 对应 Go 的 UseRedisBroker
  /// Create a new Redis broker instance - Corresponds to Go's UseRedisBroker
  pub async fn new(redis_config: RedisConfig, config: BrokerConfig) -> Result<Self> {
    config.validate()?;
    let addr = redis_config.connection_info.addr.to_string();
    let client = Client::open(redis_config.connection_info)?;
    let conn = client.get_multiplexed_tokio_connection().await?;
    tracing::info!(
      "Redis broker connected to {} (namespace: {}, task ttl: {}s)",
      addr,
      config.namespace,
      config.task_ttl
    );
    Ok(Self {
      client,
      conn,
      config,
    })
  }

  /// 从 Redis URL 创建经纪人
  /// Create a broker from a Redis URL
  pub async fn connect(url: &str, config: BrokerConfig) -> Result<Self> {
    Self::new(RedisConfig::from_url(url)?, config).await
  }

  pub fn config(&self) -> &BrokerConfig {
    &self.config
  }

  pub(crate) fn task_key(&self, task_id: &str) -> String {
    keys::task_key(&self.config.namespace, task_id)
  }

  pub(crate) fn queue_key(&self, queue_name: &str) -> String {
    keys::queue_key(&self.config.namespace, queue_name)
  }

  /// 获取共享连接
  /// Get the shared connection
  pub(crate) fn connection(&self) -> MultiplexedConnection {
    self.conn.clone()
  }

  /// 为阻塞命令打开独立连接
  /// Open a dedicated connection for blocking commands
  pub(crate) async fn blocking_connection(&self) -> Result<MultiplexedConnection> {
    Ok(self.client.get_multiplexed_tokio_connection().await?)
  }

  /// 写入元数据记录，TTL 为 0 时不设置过期时间
  /// Write a metadata record, without expiry when the TTL is 0
  pub(crate) async fn write_task_record(
    &self,
    conn: &mut MultiplexedConnection,
    task_id: &str,
    record: &[u8],
  ) -> Result<()> {
    let key = self.task_key(task_id);
    match self.config.ttl() {
      Some(ttl) => {
        let _: () = conn.set_ex(&key, record, ttl.as_secs()).await?;
      }
      None => {
        let _: () = conn.set(&key, record).await?;
      }
    }
    Ok(())
  }
}
