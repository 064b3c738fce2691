//! # 领域模型
//!
//! 采集核心共享的数据结构：
//! - **RegisterDescriptor**：寄存器描述符（地址、单位、解码参数）
//! - **寄存器目录**：始终启用的默认分区 + 按设备类别启用的条件分区
//! - **Snapshot**：一次成功采集周期产出的完整快照

pub mod catalog;
pub mod snapshot;

pub use catalog::{
    CatalogError, DeviceCategory, RegisterDescriptor, assemble_catalog, category_registers,
    default_registers,
};
pub use snapshot::Snapshot;

/// 获取当前时间戳（毫秒）。
pub fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
