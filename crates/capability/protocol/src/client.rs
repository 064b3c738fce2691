//! Modbus TCP 设备链路
//!
//! 持有并管理到单台远端设备的一条传输连接。每个引擎实例恰有一个
//! 链路，仅在轮询引擎的运行锁内被操作。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let config = DeviceConfig { host: "192.168.1.100".to_string(), port: 502 };
//! let mut link = ModbusDeviceLink::new(config);
//! link.connect().await?;
//! let words = link.read_input_registers(33033).await?;
//! link.close().await;
//! ```

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio_modbus::prelude::*;
use tracing::debug;

/// 固定逻辑单元（从站）ID：所有请求都发往从站 1。
pub const SLAVE_UNIT_ID: u8 = 1;

/// 设备链路配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// 设备主机地址
    pub host: String,
    /// 设备端口（默认 502）
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    502
}

impl DeviceConfig {
    /// 从 JSON 配置字符串解析
    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        serde_json::from_str(json).map_err(|e| TransportError::Config(e.to_string()))
    }

    fn socket_addr(&self) -> Result<SocketAddr, TransportError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| TransportError::Config(format!("invalid address: {}", e)))
    }
}

/// 设备链路抽象。
///
/// 不含重试与超时逻辑；操作要么成功，要么以 [`TransportError`]
/// 失败。实现不得无限阻塞（周期级超时由轮询引擎施加）。
#[async_trait]
pub trait DeviceLink: Send {
    /// 建立连接；已连接时为空操作（幂等）。
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// 当前链路是否存活。
    fn is_connected(&self) -> bool;

    /// 读取 `address` 处的单个输入寄存器，返回原始字序列。
    async fn read_input_registers(&mut self, address: u16) -> Result<Vec<u16>, TransportError>;

    /// 无条件释放连接；已关闭时调用安全。
    async fn close(&mut self);
}

/// 基于 tokio-modbus 的设备链路实现
pub struct ModbusDeviceLink {
    config: DeviceConfig,
    ctx: Option<tokio_modbus::client::Context>,
}

impl ModbusDeviceLink {
    /// 创建新的设备链路（尚未连接）
    pub fn new(config: DeviceConfig) -> Self {
        Self { config, ctx: None }
    }
}

#[async_trait]
impl DeviceLink for ModbusDeviceLink {
    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.ctx.is_some() {
            return Ok(());
        }

        let addr = self.config.socket_addr()?;
        let ctx = tcp::connect_slave(addr, Slave(SLAVE_UNIT_ID))
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        debug!(%addr, slave = SLAVE_UNIT_ID, "connected to modbus device");
        self.ctx = Some(ctx);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.ctx.is_some()
    }

    async fn read_input_registers(&mut self, address: u16) -> Result<Vec<u16>, TransportError> {
        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| TransportError::Connect("not connected".to_string()))?;

        let words = ctx
            .read_input_registers(address, 1)
            .await
            .map_err(|e| TransportError::Modbus(e.to_string()))?
            .map_err(|e| TransportError::Modbus(format!("exception: {:?}", e)))?;

        debug!(register = address, values = ?words, "read input registers");
        Ok(words)
    }

    async fn close(&mut self) {
        if let Some(mut ctx) = self.ctx.take() {
            // 断开失败只能记录：链路句柄已丢弃，下个周期重新连接
            if let Err(e) = ctx.disconnect().await {
                debug!(error = %e, "disconnect failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{"host": "192.168.1.100", "port": 502}"#;
        let config = DeviceConfig::from_json(json).unwrap();
        assert_eq!(config.host, "192.168.1.100");
        assert_eq!(config.port, 502);
    }

    #[test]
    fn test_default_port() {
        let config = DeviceConfig::from_json(r#"{"host": "10.0.0.5"}"#).unwrap();
        assert_eq!(config.port, 502);
    }

    #[test]
    fn test_invalid_host_rejected_at_connect() {
        let config = DeviceConfig {
            host: "not an address".to_string(),
            port: 502,
        };
        assert!(config.socket_addr().is_err());
    }
}
