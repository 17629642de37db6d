use crate::base::Broker;
use crate::error::Result;
use crate::rdb::RedisBroker;
use crate::task::Task;
use async_trait::async_trait;
use redis::AsyncCommands;

/// RedisBroker 实现 Broker trait：LPUSH 入队，BRPOP 出队，因此同一队列内先进先出。
/// RedisBroker implements the Broker trait: LPUSH to enqueue and BRPOP to dequeue, so
/// tasks within a queue are served first-in-first-out.
#[async_trait]
impl Broker for RedisBroker {
  async fn ping(&self) -> Result<()> {
    let mut conn = self.connection();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(())
  }

  async fn enqueue(&self, task: &Task) -> Result<String> {
    let record = task.encode()?;
    let mut conn = self.connection();

    // 先写元数据，再推入队列；两步之间没有事务
    // Metadata first, then the push; there is no transaction between the two
    self.write_task_record(&mut conn, task.id(), &record).await?;
    let queue_key = self.queue_key(task.queue_name());
    let _: i64 = conn.lpush(&queue_key, &record).await?;

    tracing::debug!("Enqueued task {} onto {}", task.id(), queue_key);
    Ok(task.id().to_string())
  }

  async fn acquire(&self, queue_name: &str) -> Result<Task> {
    let queue_key = self.queue_key(queue_name);
    let mut conn = self.blocking_connection().await?;

    // 超时 0 表示无限等待
    // A timeout of 0 waits forever
    let record = loop {
      let popped: Option<(String, Vec<u8>)> = conn.brpop(&queue_key, 0.0).await?;
      if let Some((_, record)) = popped {
        break record;
      }
    };

    let task = Task::decode(&record).map_err(|e| {
      tracing::error!("Malformed task record popped from {}: {}", queue_key, e);
      e
    })?;
    tracing::debug!("Acquired task {} from {}", task.id(), queue_key);
    Ok(task)
  }

  async fn ack(&self, _task: &Task) -> Result<bool> {
    // Redis 列表不支持确认
    // Redis lists do not support acknowledgement
    Ok(true)
  }

  async fn update(&self, task: &mut Task) -> Result<()> {
    task.touch();
    let record = task.encode()?;
    let mut conn = self.connection();
    self.write_task_record(&mut conn, task.id(), &record).await?;
    tracing::debug!("Updated task {}", task.id());
    Ok(())
  }

  async fn queue_len(&self, queue_name: &str) -> Result<i64> {
    let mut conn = self.connection();
    let len: i64 = conn.llen(self.queue_key(queue_name)).await?;
    Ok(len)
  }

  async fn task_state(&self, task_id: &str) -> Result<Option<Task>> {
    let mut conn = self.connection();
    let record: Option<Vec<u8>> = conn.get(self.task_key(task_id)).await?;
    let Some(record) = record else {
      return Ok(None);
    };
    let task = Task::decode(&record).map_err(|e| {
      tracing::warn!("Malformed metadata record for task {}: {}", task_id, e);
      e
    })?;
    Ok(Some(task))
  }
}
