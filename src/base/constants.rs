/// 默认键命名空间，与 Go 版 gotasks 写入的键保持兼容
/// Default key namespace, compatible with keys written by the Go gotasks producers
pub const DEFAULT_NAMESPACE: &str = "gt";

/// 默认元数据记录 TTL（秒），0 表示永不过期
/// Default metadata record TTL in seconds, 0 means the record never expires
pub const DEFAULT_TASK_TTL: u64 = 0;

/// 默认 Redis 地址
/// Default Redis address
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// 任务 TTL 环境变量
/// Environment variable for the task TTL
pub const ENV_TASK_TTL: &str = "TASKBROKER_TASK_TTL";

/// 命名空间环境变量
/// Environment variable for the key namespace
pub const ENV_NAMESPACE: &str = "TASKBROKER_NAMESPACE";

/// 版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
