//! 内存经纪人实现
//! Memory broker implementation
//!
//! 使用内存数据结构模拟 Redis 列表和带过期时间的键值记录
//! Emulates Redis lists and expiring key-value records with in-memory data structures

use crate::base::keys;
use crate::config::BrokerConfig;
use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};
use tokio::time::Instant;

/// 带过期时间的元数据记录
/// Metadata record with an optional expiry
#[derive(Clone, Debug)]
pub struct TaskRecord {
  /// 编码后的任务
  /// Encoded task
  pub data: Vec<u8>,
  /// 过期时刻，`None` 表示不过期
  /// Expiry instant, `None` means the record never expires
  pub expires_at: Option<Instant>,
}

impl TaskRecord {
  pub fn is_expired(&self, now: Instant) -> bool {
    self.expires_at.is_some_and(|at| at <= now)
  }
}

/// 队列数据结构
/// Queue data structure
///
/// `ready` 的许可数始终等于 `items` 的长度，每个许可对应一个待弹出的条目。
/// The permit count of `ready` always equals the length of `items`; each permit
/// stands for one item waiting to be popped.
pub struct QueueData {
  /// 按入队顺序排列的编码任务
  /// Encoded tasks in enqueue order
  pub items: VecDeque<Vec<u8>>,
  pub(crate) ready: Arc<Semaphore>,
}

impl Default for QueueData {
  fn default() -> Self {
    Self {
      items: VecDeque::new(),
      ready: Arc::new(Semaphore::new(0)),
    }
  }
}

/// 内存存储，键与 Redis 实现使用相同的命名规则
/// Memory storage, keyed with the same naming rules as the Redis implementation
#[derive(Default)]
pub struct MemoryStorage {
  /// 队列数据 - key: `<namespace>:queue:<name>`
  /// Queue data - key: `<namespace>:queue:<name>`
  pub queues: HashMap<String, QueueData>,
  /// 元数据记录 - key: `<namespace>:task:<id>`
  /// Metadata records - key: `<namespace>:task:<id>`
  pub records: HashMap<String, TaskRecord>,
}

impl MemoryStorage {
  /// 获取或创建队列数据
  /// Get or create queue data
  pub fn get_or_create_queue(&mut self, key: &str) -> &mut QueueData {
    self.queues.entry(key.to_string()).or_default()
  }

  /// 读取未过期的记录，顺带清除已过期的记录
  /// Read a live record, evicting it if it has expired
  pub fn live_record(&mut self, key: &str, now: Instant) -> Option<&TaskRecord> {
    if self.records.get(key).is_some_and(|r| r.is_expired(now)) {
      self.records.remove(key);
    }
    self.records.get(key)
  }

  /// 清除所有过期记录
  /// Evict all expired records
  pub fn purge_expired(&mut self, now: Instant) {
    self.records.retain(|_, record| !record.is_expired(now));
  }
}

/// 内存经纪人实现
/// Memory broker implementation
pub struct MemoryBroker {
  /// 内存存储
  /// Memory storage
  pub(crate) storage: Arc<RwLock<MemoryStorage>>,
  pub(crate) config: BrokerConfig,
}

impl Default for MemoryBroker {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryBroker {
  /// 使用默认配置创建内存经纪人
  /// Create a memory broker with the default configuration
  pub fn new() -> Self {
    Self {
      storage: Arc::new(RwLock::new(MemoryStorage::default())),
      config: BrokerConfig::default(),
    }
  }

  /// 使用指定配置创建内存经纪人
  /// Create a memory broker with the given configuration
  pub fn with_config(config: BrokerConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      storage: Arc::new(RwLock::new(MemoryStorage::default())),
      config,
    })
  }

  /// 获取存储的引用
  /// Get storage reference
  pub fn storage(&self) -> &Arc<RwLock<MemoryStorage>> {
    &self.storage
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

  /// 写入元数据记录并重新开始 TTL 倒计时
  /// Write a metadata record and restart its TTL countdown
  pub(crate) fn write_task_record(&self, storage: &mut MemoryStorage, task_id: &str, data: Vec<u8>) {
    let now = Instant::now();
    storage.purge_expired(now);
    let expires_at = self.config.ttl().map(|ttl| now + ttl);
    storage
      .records
      .insert(self.task_key(task_id), TaskRecord { data, expires_at });
  }
}
