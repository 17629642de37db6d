//! 生产者示例
//! Producer example
//!
//! 演示如何构造一次 broker 并把任务加入队列
//! Demonstrates constructing the broker once and enqueuing tasks
//!
//! ```sh
//! REDIS_URL=redis://127.0.0.1:6379 TASKBROKER_TASK_TTL=3600 cargo run --example producer
//! ```

use serde::{Deserialize, Serialize};
use taskbroker::base::constants::DEFAULT_REDIS_URL;
use taskbroker::client::Client;
use taskbroker::config::BrokerConfig;
use taskbroker::task::Task;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Serialize, Deserialize)]
struct EmailPayload {
  to: String,
  subject: String,
  body: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(EnvFilter::from_default_env().add_directive("taskbroker=debug".parse()?))
    .init();

  // 优先从环境变量中读取 Redis 地址
  // Read the Redis URL from the environment first
  let redis_url = std::env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());
  let config = BrokerConfig::from_env()?;
  tracing::info!("Using broker URL {} with {:?}", redis_url, config);

  let client = Client::connect(&redis_url, config).await?;

  // 示例 1: 由生产者分配 ID
  // Example 1: the producer assigns the ID
  let welcome = Task::new(
    "welcome-user-42",
    "emails",
    &EmailPayload {
      to: "user@example.com".to_string(),
      subject: "Welcome!".to_string(),
      body: "Welcome to our service!".to_string(),
    },
  )?;
  let id = client.enqueue(&welcome).await?;
  tracing::info!("Enqueued {}", id);

  // 示例 2: 生成 ID
  // Example 2: generated IDs
  for n in 0..3 {
    let id = client
      .enqueue_payload("reports", &serde_json::json!({ "report": n }))
      .await?;
    tracing::info!("Enqueued report task {}", id);
  }

  tracing::info!(
    "Queue depth: emails={}, reports={}",
    client.queue_len("emails").await?,
    client.queue_len("reports").await?
  );
  Ok(())
}
