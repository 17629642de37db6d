//! 经纪人模块
//! Broker module
//!
//! 定义了生产者、工作者与任务存储后端之间的抽象层
//! Defines the abstraction layer between producers, workers and the task storage backend

use crate::error::Result;
use crate::task::Task;
use async_trait::async_trait;

pub mod constants;
pub mod keys;

/// 经纪人特性，定义了与任务存储后端交互的接口
/// Broker trait, defines the interface for interacting with the task storage backend
///
/// 实现在进程启动时构造一次，以 `Arc<dyn Broker>` 的形式注入到生产者和工作者中。
/// Implementations are constructed once at startup and injected into producers and
/// workers as `Arc<dyn Broker>`.
///
/// 投递语义为至多一次：任务一旦被 [`Broker::acquire`] 弹出就从队列中永久移除，
/// 没有重新投递，也没有可见性超时。
/// Delivery is at-most-once: once [`Broker::acquire`] pops a task it is gone from
/// the queue for good, with no redelivery and no visibility timeout.
#[async_trait]
pub trait Broker: Send + Sync {
  /// 测试后端连接
  /// Ping the backend
  async fn ping(&self) -> Result<()>;

  /// 将任务加入队列 - Go: Enqueue
  /// Enqueue a task - Go: Enqueue
  ///
  /// 先以配置的 TTL 写入元数据记录，再推入队列尾部。返回任务自身的 ID。
  /// Writes the metadata record with the configured TTL, then pushes onto the
  /// queue tail. Returns the task's own ID.
  async fn enqueue(&self, task: &Task) -> Result<String>;

  /// 从队列头部阻塞获取下一个任务 - Go: Acquire
  /// Block-acquire the next task from the queue head - Go: Acquire
  ///
  /// 无限期等待，直到队列中有任务为止。丢弃返回的 future 是取消等待的唯一方式。
  /// Waits indefinitely until the queue has an item. Dropping the returned future is
  /// the only way to stop waiting.
  async fn acquire(&self, queue_name: &str) -> Result<Task>;

  /// 确认任务完成 - Go: Ack
  /// Acknowledge task completion - Go: Ack
  ///
  /// 对列表队列来说是空操作，始终返回 `true`。
  /// A no-op for list queues, always returns `true`.
  async fn ack(&self, task: &Task) -> Result<bool>;

  /// 更新任务元数据 - Go: Update
  /// Update task metadata - Go: Update
  ///
  /// 将 UpdatedAt 设为当前时间并以新的 TTL 覆盖元数据记录，不触及队列。
  /// Stamps UpdatedAt with the current time and overwrites the metadata record with a
  /// fresh TTL, never touching the queue.
  async fn update(&self, task: &mut Task) -> Result<()>;

  /// 获取队列长度 - Go: QueueLen
  /// Get queue length - Go: QueueLen
  ///
  /// 并发推入或弹出时只是近似值。
  /// Only approximate under concurrent pushes or pops.
  async fn queue_len(&self, queue_name: &str) -> Result<i64>;

  /// 读取任务的元数据记录，过期或不存在时返回 `None`
  /// Read the metadata record of a task, `None` if it expired or never existed
  async fn task_state(&self, task_id: &str) -> Result<Option<Task>>;
}
