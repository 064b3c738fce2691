//! # 轮询能力模块
//!
//! 编排一次完整的采集周期，并向消费者发布结果：
//! - **PollingEngine**：周期状态机（运行锁 → 确保连接 → 逐项读取
//!   与解码 → 整体发布 → 保证清理）
//! - **SnapshotPublisher**：持有最近一次成功快照，每个周期结束时
//!   （无论成败）通知订阅者
//!
//! ## 状态机
//!
//! ```text
//! Idle → Connecting → Reading → Done(success | failure) → Idle
//! ```
//!
//! 周期由外部调度器按固定间隔触发；同一引擎实例的周期绝不重叠，
//! 后到的 tick 在运行锁上排队。周期内所有失败都被吸收为日志事件，
//! 对外保留上一份快照，绝不向调度器传播。

mod engine;
mod publisher;

pub use engine::{CycleError, CycleStatus, PollerConfig, PollingEngine};
pub use publisher::{Published, SnapshotPublisher};
