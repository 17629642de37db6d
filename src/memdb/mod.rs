//! 内存经纪人模块
//! Memory broker module
//!
//! 不依赖任何外部服务的 [`crate::base::Broker`] 实现，语义与 Redis 实现一致
//! A [`crate::base::Broker`] implementation without external service dependencies,
//! with the same semantics as the Redis implementation

mod broker;
pub mod memory_broker;

pub use memory_broker::MemoryBroker;
