//! 消费者示例
//! Consumer example
//!
//! 演示工作者循环：阻塞获取、记录进度、确认。任何 broker 错误都会记录诊断信息后
//! 以非零状态退出进程，交由外部进程管理器重启。
//! Demonstrates a worker loop: block-acquire, record progress, ack. Any broker error
//! is logged and the process exits non-zero, leaving restarts to an external supervisor.
//!
//! ```sh
//! REDIS_URL=redis://127.0.0.1:6379 cargo run --example consumer -- emails
//! ```

use taskbroker::base::constants::DEFAULT_REDIS_URL;
use taskbroker::client::Client;
use taskbroker::config::BrokerConfig;
use taskbroker::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

async fn work(client: &Client, queue: &str) -> Result<()> {
  loop {
    let mut task = client.acquire(queue).await?;
    tracing::info!("Processing task {} from {}: {}", task.id(), queue, task.payload());

    client
      .checkpoint(&mut task, &serde_json::json!({ "status": "done" }))
      .await?;
    client.ack(&task).await?;
    tracing::info!(
      "Finished task {}, {} left in {}",
      task.id(),
      client.queue_len(queue).await?,
      queue
    );
  }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(EnvFilter::from_default_env().add_directive("taskbroker=info".parse()?))
    .init();

  let queue = std::env::args().nth(1).unwrap_or_else(|| "emails".to_string());
  let redis_url = std::env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());
  let client = Client::connect(&redis_url, BrokerConfig::from_env()?).await?;

  tracing::info!("Worker listening on queue {}", queue);
  if let Err(e) = work(&client, &queue).await {
    tracing::error!("Worker stopped: {}", e);
    std::process::exit(1);
  }
  Ok(())
}
