use crate::base::Broker;
use crate::error::{Error, Result};
use crate::memdb::MemoryBroker;
use crate::task::Task;
use async_trait::async_trait;
use tokio::time::Instant;

/// MemoryBroker 实现 Broker trait
/// MemoryBroker implements the Broker trait
#[async_trait]
impl Broker for MemoryBroker {
  async fn ping(&self) -> Result<()> {
    Ok(())
  }

  async fn enqueue(&self, task: &Task) -> Result<String> {
    let record = task.encode()?;
    let queue_key = self.queue_key(task.queue_name());

    let mut storage = self.storage.write().await;
    self.write_task_record(&mut storage, task.id(), record.clone());
    let queue = storage.get_or_create_queue(&queue_key);
    queue.items.push_back(record);
    queue.ready.add_permits(1);

    tracing::debug!("Enqueued task {} onto {}", task.id(), queue_key);
    Ok(task.id().to_string())
  }

  async fn acquire(&self, queue_name: &str) -> Result<Task> {
    let queue_key = self.queue_key(queue_name);
    let ready = {
      let mut storage = self.storage.write().await;
      storage.get_or_create_queue(&queue_key).ready.clone()
    };

    let permit = ready
      .acquire()
      .await
      .map_err(|_| Error::other(format!("Queue {} was closed", queue_key)))?;
    let mut storage = self.storage.write().await;
    // 拿到锁之后才消耗许可，等待锁时被取消会把许可还回去
    // The permit is consumed only once the lock is held; cancelling while waiting
    // for the lock hands the permit back
    permit.forget();
    let record = storage
      .get_or_create_queue(&queue_key)
      .items
      .pop_front()
      .ok_or_else(|| Error::other(format!("Queue {} lost an item", queue_key)))?;
    drop(storage);

    let task = Task::decode(&record)?;
    tracing::debug!("Acquired task {} from {}", task.id(), queue_key);
    Ok(task)
  }

  async fn ack(&self, _task: &Task) -> Result<bool> {
    Ok(true)
  }

  async fn update(&self, task: &mut Task) -> Result<()> {
    task.touch();
    let record = task.encode()?;
    let mut storage = self.storage.write().await;
    self.write_task_record(&mut storage, task.id(), record);
    tracing::debug!("Updated task {}", task.id());
    Ok(())
  }

  async fn queue_len(&self, queue_name: &str) -> Result<i64> {
    let storage = self.storage.read().await;
    let len = storage
      .queues
      .get(&self.queue_key(queue_name))
      .map_or(0, |q| q.items.len());
    Ok(len as i64)
  }

  async fn task_state(&self, task_id: &str) -> Result<Option<Task>> {
    let key = self.task_key(task_id);
    let mut storage = self.storage.write().await;
    match storage.live_record(&key, Instant::now()) {
      Some(record) => Ok(Some(Task::decode(&record.data)?)),
      None => Ok(None),
    }
  }
}
