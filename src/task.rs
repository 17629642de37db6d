//! 任务模块
//! Task module
//!
//! 定义了在生产者与工作者之间交换的任务实体及其记录格式
//! Defines the task entity exchanged between producers and workers, and its record format

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 任务
/// Task
///
/// 序列化为自描述的 JSON 文档，字段名 `ID`、`QueueName`、`Payload`、`CreatedAt`、
/// `UpdatedAt` 与 Go 版生产者写入的记录一致。元数据记录与队列条目使用同一编码。
/// Serialized as a self-describing JSON document whose field names `ID`, `QueueName`,
/// `Payload`, `CreatedAt` and `UpdatedAt` match the records written by Go producers.
/// The metadata record and the queue entry share this encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
  /// 任务 ID，由生产者在入队前分配，之后不可变
  /// Task ID, assigned by the producer before enqueue and immutable afterwards
  #[serde(rename = "ID")]
  id: String,
  /// 队列名称，在任务生命周期内固定
  /// Queue name, fixed for the lifetime of the task
  #[serde(rename = "QueueName")]
  queue_name: String,
  /// 不透明负载，仅由生产者和工作者解释
  /// Opaque payload, interpreted only by the producer and the worker
  #[serde(rename = "Payload", default)]
  payload: serde_json::Value,
  #[serde(rename = "CreatedAt")]
  created_at: DateTime<Utc>,
  #[serde(rename = "UpdatedAt")]
  updated_at: DateTime<Utc>,
}

impl Task {
  /// 创建新任务
  /// Create a new task
  ///
  /// 负载无法序列化时返回 [`crate::error::Error::Serialization`]。
  /// Returns [`crate::error::Error::Serialization`] if the payload cannot be serialized.
  pub fn new<P: Serialize + ?Sized>(
    id: impl Into<String>,
    queue_name: impl Into<String>,
    payload: &P,
  ) -> Result<Self> {
    let now = Utc::now();
    Ok(Self {
      id: id.into(),
      queue_name: queue_name.into(),
      payload: serde_json::to_value(payload)?,
      created_at: now,
      updated_at: now,
    })
  }

  /// 使用随机生成的 UUID 作为 ID 创建任务
  /// Create a task with a randomly generated UUID as its ID
  pub fn with_generated_id<P: Serialize + ?Sized>(
    queue_name: impl Into<String>,
    payload: &P,
  ) -> Result<Self> {
    Self::new(Uuid::new_v4().to_string(), queue_name, payload)
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn queue_name(&self) -> &str {
    &self.queue_name
  }

  /// 原始 JSON 负载
  /// Raw JSON payload
  pub fn payload(&self) -> &serde_json::Value {
    &self.payload
  }

  /// 将负载反序列化为指定类型
  /// Deserialize the payload into the given type
  pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
    Ok(T::deserialize(&self.payload)?)
  }

  /// 替换负载，通常在调用 `Broker::update` 之前记录进度
  /// Replace the payload, usually to record progress before calling `Broker::update`
  pub fn set_payload<P: Serialize + ?Sized>(&mut self, payload: &P) -> Result<()> {
    self.payload = serde_json::to_value(payload)?;
    Ok(())
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  pub fn updated_at(&self) -> DateTime<Utc> {
    self.updated_at
  }

  /// 将 UpdatedAt 更新为当前时间
  /// Stamp UpdatedAt with the current time
  pub(crate) fn touch(&mut self) {
    self.updated_at = Utc::now();
  }

  /// 编码为记录字节
  /// Encode into record bytes
  pub fn encode(&self) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(self)?)
  }

  /// 从记录字节解码
  /// Decode from record bytes
  pub fn decode(data: &[u8]) -> Result<Self> {
    Ok(serde_json::from_slice(data)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;
  use serde::ser::Error as _;
  use std::collections::HashMap;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct EmailPayload {
    to: String,
    subject: String,
  }

  struct Unserializable;

  impl Serialize for Unserializable {
    fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
      Err(S::Error::custom("payload refuses to serialize"))
    }
  }

  #[test]
  fn test_task_creation() {
    let before = Utc::now();
    let task = Task::new("t1", "q1", "hello, 世界").unwrap();
    assert_eq!(task.id(), "t1");
    assert_eq!(task.queue_name(), "q1");
    assert_eq!(task.payload(), &serde_json::json!("hello, 世界"));
    assert!(task.created_at() >= before);
    assert_eq!(task.created_at(), task.updated_at());
  }

  #[test]
  fn test_generated_ids_are_unique() {
    let a = Task::with_generated_id("q", &()).unwrap();
    let b = Task::with_generated_id("q", &()).unwrap();
    assert_ne!(a.id(), b.id());
    assert!(Uuid::parse_str(a.id()).is_ok());
  }

  #[test]
  fn test_typed_payload() {
    let payload = EmailPayload {
      to: "user@example.com".to_string(),
      subject: "Welcome".to_string(),
    };
    let mut task = Task::new("t2", "email", &payload).unwrap();
    assert_eq!(task.payload_as::<EmailPayload>().unwrap(), payload);

    let mut progress = HashMap::new();
    progress.insert("sent", true);
    task.set_payload(&progress).unwrap();
    assert_eq!(task.payload()["sent"], serde_json::json!(true));
    assert!(matches!(
      task.payload_as::<EmailPayload>(),
      Err(Error::Serialization(_))
    ));
  }

  #[test]
  fn test_unserializable_payload() {
    let result = Task::new("t3", "q", &Unserializable);
    assert!(matches!(result, Err(Error::Serialization(_))));
  }

  #[test]
  fn test_record_field_names() {
    let task = Task::new("t1", "q1", "x").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&task.encode().unwrap()).unwrap();
    let obj = value.as_object().unwrap();
    for field in ["ID", "QueueName", "Payload", "CreatedAt", "UpdatedAt"] {
      assert!(obj.contains_key(field), "missing field {field}");
    }
    assert_eq!(obj.len(), 5);
  }

  #[test]
  fn test_decode_go_record() {
    // Go 的 time.Time 以带时区偏移和纳秒的 RFC 3339 编码
    // Go encodes time.Time as RFC 3339 with a zone offset and nanoseconds
    let record = br#"{"ID":"go-1","QueueName":"default","Payload":{"n":1},
      "CreatedAt":"2020-03-01T12:00:00.123456789+08:00",
      "UpdatedAt":"2020-03-01T12:00:01.5+08:00"}"#;
    let task = Task::decode(record).unwrap();
    assert_eq!(task.id(), "go-1");
    assert_eq!(task.queue_name(), "default");
    assert_eq!(task.payload()["n"], serde_json::json!(1));
    assert_eq!(task.created_at().timestamp(), 1583035200);
    assert!(task.updated_at() > task.created_at());
  }

  #[test]
  fn test_decode_malformed_record() {
    assert!(matches!(
      Task::decode(b"not a task"),
      Err(Error::Serialization(_))
    ));
    assert!(matches!(
      Task::decode(br#"{"ID":"x"}"#),
      Err(Error::Serialization(_))
    ));
  }

  #[test]
  fn test_touch_moves_updated_at_forward() {
    let mut task = Task::new("t1", "q1", &1).unwrap();
    let created = task.created_at();
    std::thread::sleep(std::time::Duration::from_millis(2));
    task.touch();
    assert!(task.updated_at() > created);
    assert_eq!(task.created_at(), created);
  }
}
