//! 客户端模块
//! Client module
//!
//! 生产者和工作者共用的门面，持有注入的 broker
//! Facade shared by producers and workers, holding an injected broker

use crate::backend;
use crate::base::Broker;
use crate::config::BrokerConfig;
use crate::error::Result;
use crate::task::Task;
use serde::Serialize;
use std::sync::Arc;

/// 任务客户端
/// Task client
#[derive(Clone)]
pub struct Client {
  broker: Arc<dyn Broker>,
}

impl Client {
  /// 使用已构造的 broker 创建客户端
  /// Create a client around an already constructed broker
  pub fn new(broker: Arc<dyn Broker>) -> Self {
    Self { broker }
  }

  /// 根据 URL 打开 broker 并创建客户端
  /// Open a broker from a URL and create a client around it
  pub async fn connect(url: &str, config: BrokerConfig) -> Result<Self> {
    Ok(Self::new(backend::open(url, config).await?))
  }

  /// 获取 broker 实例
  /// Get the broker instance
  pub fn broker(&self) -> Arc<dyn Broker> {
    self.broker.clone()
  }

  /// 将任务加入队列
  /// Enqueue a task
  pub async fn enqueue(&self, task: &Task) -> Result<String> {
    self.broker.enqueue(task).await.inspect_err(|e| {
      tracing::error!("Failed to enqueue task {}: {}", task.id(), e);
    })
  }

  /// 以生成的 ID 把负载加入队列
  /// Enqueue a payload under a generated ID
  pub async fn enqueue_payload<P: Serialize + ?Sized>(
    &self,
    queue_name: &str,
    payload: &P,
  ) -> Result<String> {
    let task = Task::with_generated_id(queue_name, payload)?;
    self.enqueue(&task).await
  }

  /// 阻塞获取下一个任务
  /// Block until the next task is available
  pub async fn acquire(&self, queue_name: &str) -> Result<Task> {
    self.broker.acquire(queue_name).await.inspect_err(|e| {
      tracing::error!("Failed to acquire task from {}: {}", queue_name, e);
    })
  }

  /// 记录进度：替换负载并刷新元数据记录
  /// Record progress: replace the payload and refresh the metadata record
  pub async fn checkpoint<P: Serialize + ?Sized>(&self, task: &mut Task, progress: &P) -> Result<()> {
    task.set_payload(progress)?;
    self.update(task).await
  }

  /// 刷新元数据记录
  /// Refresh the metadata record
  pub async fn update(&self, task: &mut Task) -> Result<()> {
    self.broker.update(task).await.inspect_err(|e| {
      tracing::error!("Failed to update task {}: {}", task.id(), e);
    })
  }

  /// 确认任务完成
  /// Acknowledge task completion
  pub async fn ack(&self, task: &Task) -> Result<bool> {
    self.broker.ack(task).await
  }

  /// 获取队列长度
  /// Get queue length
  pub async fn queue_len(&self, queue_name: &str) -> Result<i64> {
    self.broker.queue_len(queue_name).await
  }

  /// 读取任务的最新状态
  /// Read the latest state of a task
  pub async fn task_state(&self, task_id: &str) -> Result<Option<Task>> {
    self.broker.task_state(task_id).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::memdb::MemoryBroker;
  use serde::Deserialize;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Resize {
    src: String,
    width: u32,
  }

  #[tokio::test]
  async fn test_client_shares_injected_broker() {
    let broker: Arc<dyn Broker> = Arc::new(MemoryBroker::new());
    let producer = Client::new(broker.clone());
    let worker = Client::new(broker);

    let payload = Resize {
      src: "a.png".to_string(),
      width: 640,
    };
    let id = producer.enqueue_payload("images", &payload).await.unwrap();
    assert_eq!(worker.queue_len("images").await.unwrap(), 1);

    let mut task = worker.acquire("images").await.unwrap();
    assert_eq!(task.id(), id);
    assert_eq!(task.payload_as::<Resize>().unwrap(), payload);

    worker.checkpoint(&mut task, &serde_json::json!({"done": true})).await.unwrap();
    assert!(worker.ack(&task).await.unwrap());

    let state = producer.task_state(&id).await.unwrap().unwrap();
    assert_eq!(state.payload()["done"], serde_json::json!(true));
    assert_eq!(producer.queue_len("images").await.unwrap(), 0);
  }

  #[tokio::test]
  async fn test_client_connect_memory() {
    let client = Client::connect("memory://", BrokerConfig::default()).await.unwrap();
    client.broker().ping().await.unwrap();
    assert!(client.task_state("nope").await.unwrap().is_none());
  }
}
