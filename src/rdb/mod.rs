//! Redis 经纪人模块
//! Redis broker module
//!
//! 基于 Redis 列表和键值记录实现 [`crate::base::Broker`]
//! Implements [`crate::base::Broker`] on top of Redis lists and key-value records

mod broker;
pub mod redis_broker;

pub use redis_broker::RedisBroker;
