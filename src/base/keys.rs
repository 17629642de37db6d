//! Redis 键名生成 - 与 Go 版本保持兼容
//! Redis key name generation - Compatible with Go version
//!
//! 两个逻辑命名空间（任务元数据与命名队列）映射到互不相交的固定前缀上：
//! Two logical namespaces (task metadata and named queues) map onto disjoint fixed prefixes:
//!
//! - `<namespace>:task:<task_id>`
//! - `<namespace>:queue:<queue_name>`

/// 任务元数据段
/// Task metadata segment
pub const TASK_SEGMENT: &str = "task";

/// 队列段
/// Queue segment
pub const QUEUE_SEGMENT: &str = "queue";

/// 生成任务键前缀: `<namespace>:task:`
/// Generate task key prefix: `<namespace>:task:`
pub fn task_key_prefix(namespace: &str) -> String {
  format!("{}:{}:", namespace, TASK_SEGMENT)
}

/// 生成队列键前缀: `<namespace>:queue:`
/// Generate queue key prefix: `<namespace>:queue:`
pub fn queue_key_prefix(namespace: &str) -> String {
  format!("{}:{}:", namespace, QUEUE_SEGMENT)
}

/// 生成任务元数据键 - 对应 Go 的 genTaskName
/// Generate task metadata key - Corresponds to Go's genTaskName
pub fn task_key(namespace: &str, task_id: &str) -> String {
  format!("{}{}", task_key_prefix(namespace), task_id)
}

/// 生成队列键 - 对应 Go 的 genQueueName
/// Generate queue key - Corresponds to Go's genQueueName
pub fn queue_key(namespace: &str, queue_name: &str) -> String {
  format!("{}{}", queue_key_prefix(namespace), queue_name)
}
