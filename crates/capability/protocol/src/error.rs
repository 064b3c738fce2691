//! 传输层错误类型定义

/// 单次连接或读取在协议/传输层的失败。
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// 连接错误
    #[error("connect error: {0}")]
    Connect(String),

    /// IO 错误
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Modbus 错误（链路中断、响应异常、设备 NAK）
    #[error("modbus error: {0}")]
    Modbus(String),

    /// 配置解析错误
    #[error("config parse error: {0}")]
    Config(String),
}
