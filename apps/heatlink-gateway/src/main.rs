//! 采集网关：加载配置、装配寄存器目录、按固定间隔驱动轮询引擎。

use domain::assemble_catalog;
use heatlink_config::AppConfig;
use heatlink_poller::{PollerConfig, PollingEngine};
use heatlink_protocol::{DeviceConfig, ModbusDeviceLink};
use heatlink_telemetry::init_tracing;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // 装配采集目录：默认分区 + 启用类别的条件分区
    let catalog = assemble_catalog(&config.device_categories)?;
    info!(
        host = %config.device_host,
        port = config.device_port,
        registers = catalog.len(),
        interval_secs = config.poll_interval_secs,
        "starting acquisition gateway"
    );

    // 每个实例恰管理一台设备：链路与引擎一次构造、直接持有
    let link = ModbusDeviceLink::new(DeviceConfig {
        host: config.device_host.clone(),
        port: config.device_port,
    });
    let poller_config = PollerConfig {
        poll_interval_secs: config.poll_interval_secs,
        cycle_timeout_ms: config.cycle_timeout_ms,
        connect_max_retries: config.connect_max_retries,
    };
    let engine = Arc::new(PollingEngine::new(catalog, poller_config, Box::new(link))?);

    // 订阅周期完成通知，记录快照更新与可用性变化
    let mut updates = engine.publisher().subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state.last_cycle_ok {
                info!(
                    cycles = state.cycles_completed,
                    registers = state.snapshot.len(),
                    "snapshot updated"
                );
            } else {
                warn!(
                    cycles = state.cycles_completed,
                    "cycle failed, previous snapshot retained"
                );
            }
        }
    });

    // 固定间隔调度：周期在引擎内部串行化，迟到的 tick 排队等锁
    let mut ticker = tokio::time::interval(engine.poll_interval());
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.poll_once().await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
