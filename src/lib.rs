//! # taskbroker
//!
//! 基于 Redis 的最小任务经纪人
//! A minimal task broker backed by Redis
//!
//! taskbroker 通过共享的外部队列存储在任务生产者与工作者之间传递任务。
//! taskbroker mediates between task producers and task workers through a shared
//! external queue store.
//!
//! ## 模型
//! ## Model
//!
//! - 入队时先写入带 TTL 的元数据记录 `<namespace>:task:<id>`，再把任务推入列表
//!   `<namespace>:queue:<name>`
//!   - Enqueue writes the TTL'd metadata record `<namespace>:task:<id>`, then pushes the
//!     task onto the list `<namespace>:queue:<name>`
//! - 获取任务会阻塞直到队列中有任务，同一队列内先进先出
//!   - Acquire blocks until the queue has an item; tasks within a queue are FIFO
//! - 投递至多一次：确认是空操作，弹出的任务不会被重新投递
//!   - Delivery is at-most-once: ack is a no-op and popped tasks are never redelivered
//! - 元数据记录是任务最新状态的唯一可靠来源
//!   - The metadata record is the only reliable source of a task's latest state
//!
//! ## 快速开始
//! ## Quick Start
//!
//! ```rust,no_run
//! use taskbroker::{backend, config::BrokerConfig, task::Task};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 启动时构造一次 broker，然后注入到生产者和工作者
//!     // Construct the broker once at startup, then inject it into producers and workers
//!     let broker = backend::open("redis://127.0.0.1:6379", BrokerConfig::new().task_ttl(3600)).await?;
//!
//!     let task = Task::new("t1", "emails", "hello, 世界")?;
//!     broker.enqueue(&task).await?;
//!
//!     let mut task = broker.acquire("emails").await?;
//!     broker.update(&mut task).await?;
//!     broker.ack(&task).await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod base;
pub mod client;
pub mod config;
pub mod error;
pub mod memdb;
pub mod rdb;
pub mod redis;
pub mod task;

pub use base::Broker;
pub use task::Task;
