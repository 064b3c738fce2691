//! # 协议能力模块
//!
//! 提供采集核心的 Modbus TCP 传输层能力：
//! - **DeviceLink**：设备链路抽象（连接、读输入寄存器、关闭）
//! - **ModbusDeviceLink**：基于 tokio-modbus 的实现，固定从站 ID 为 1
//! - **decode**：纯函数解码（单字大端有符号 16 位 × 缩放系数）
//!
//! ## 职责边界
//!
//! 链路层不做重试、不做周期级超时，这些属于轮询引擎。链路操作的
//! 失败模式是二元的：成功，或以 [`TransportError`] 失败。
//!
//! ## 配置格式
//!
//! ```json
//! // DeviceConfig
//! { "host": "192.168.1.100", "port": 502 }
//! ```

mod client;
mod decode;
mod error;

pub use client::{DeviceConfig, DeviceLink, ModbusDeviceLink, SLAVE_UNIT_ID};
pub use decode::{decode_single_word, round2};
pub use error::TransportError;
