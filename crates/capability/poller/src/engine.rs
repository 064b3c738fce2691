//! 采集周期状态机
//!
//! 每个周期：取得运行锁 → 施加周期级超时 → 有限预算内确保连接 →
//! 按目录顺序逐项读取与解码 → 整体发布快照 → 关闭链路。清理在
//! 每条退出路径上执行（成功、连接失败、超时），等价于围绕整个周期
//! 体的 guaranteed-finally。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let engine = PollingEngine::new(catalog, PollerConfig::default(), Box::new(link))?;
//! let mut ticker = tokio::time::interval(engine.poll_interval());
//! loop {
//!     ticker.tick().await;
//!     engine.poll_once().await;
//! }
//! ```

use crate::publisher::SnapshotPublisher;
use domain::{CatalogError, RegisterDescriptor, Snapshot, catalog::validate_unique_names};
use heatlink_protocol::{DeviceLink, decode_single_word};
use heatlink_telemetry as telemetry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// 轮询参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// 轮询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// 周期级超时（毫秒）
    #[serde(default = "default_cycle_timeout")]
    pub cycle_timeout_ms: u64,
    /// 连接重试预算（次）
    #[serde(default = "default_connect_retries")]
    pub connect_max_retries: u32,
}

fn default_poll_interval() -> u64 {
    20
}

fn default_cycle_timeout() -> u64 {
    5000
}

fn default_connect_retries() -> u32 {
    5
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            cycle_timeout_ms: default_cycle_timeout(),
            connect_max_retries: default_connect_retries(),
        }
    }
}

/// 周期级失败（仅对当前周期致命，不影响进程）。
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// 连接重试预算耗尽
    #[error("connect retry budget exhausted after {attempts} attempts")]
    ConnectExhausted { attempts: u32 },
}

/// 单个周期的完成状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    /// 目录读取完毕，快照已整体替换
    Success,
    /// 预算内未能建立连接，保留上一份快照
    ConnectFailed,
    /// 周期级超时，保留上一份快照
    TimedOut,
}

/// 轮询引擎：每个被管设备构造一个实例，直接交给消费者持有。
pub struct PollingEngine {
    catalog: Vec<RegisterDescriptor>,
    config: PollerConfig,
    // 运行锁：链路仅在锁内被操作，等待的 tick 在此排队
    link: Mutex<Box<dyn DeviceLink>>,
    publisher: SnapshotPublisher,
}

impl PollingEngine {
    /// 以装配好的目录、轮询参数和设备链路构造引擎。
    ///
    /// 目录内名称必须唯一；重配置（更换目录）通过重建引擎完成，
    /// 而非原地修补。
    pub fn new(
        catalog: Vec<RegisterDescriptor>,
        config: PollerConfig,
        link: Box<dyn DeviceLink>,
    ) -> Result<Self, CatalogError> {
        validate_unique_names(&catalog)?;
        Ok(Self {
            catalog,
            config,
            link: Mutex::new(link),
            publisher: SnapshotPublisher::new(),
        })
    }

    /// 外部调度器的触发间隔。
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.poll_interval_secs)
    }

    /// 快照发布器（订阅、查询当前快照）。
    pub fn publisher(&self) -> &SnapshotPublisher {
        &self.publisher
    }

    /// 当前快照（最近一个周期失败时为上一份成功结果）。
    pub fn current_snapshot(&self) -> Snapshot {
        self.publisher.current()
    }

    /// 执行一次完整的采集周期。
    ///
    /// 同一实例上并发调用会在运行锁上串行化（至多一个在途周期）。
    /// 所有周期级失败在此吸收，绝不向调度器传播。
    pub async fn poll_once(&self) -> CycleStatus {
        let mut link = self.link.lock().await;
        let cycle_id = telemetry::new_cycle_id();
        telemetry::record_cycle_started();
        debug!(%cycle_id, "polling cycle started");

        let deadline = Duration::from_millis(self.config.cycle_timeout_ms);
        let status = match timeout(deadline, self.run_cycle(link.as_mut())).await {
            Ok(Ok(values)) => {
                let registers = values.len();
                self.publisher.publish_success(Snapshot::new(values));
                telemetry::record_cycle_succeeded();
                info!(%cycle_id, registers, "polling cycle completed");
                CycleStatus::Success
            }
            Ok(Err(CycleError::ConnectExhausted { attempts })) => {
                self.publisher.publish_failure();
                telemetry::record_cycle_connect_failed();
                warn!(%cycle_id, attempts, "couldn't connect to device");
                CycleStatus::ConnectFailed
            }
            Err(_) => {
                // 超时丢弃周期体 future，上一份快照保持对外可见
                self.publisher.publish_failure();
                telemetry::record_cycle_timed_out();
                warn!(
                    %cycle_id,
                    timeout_ms = self.config.cycle_timeout_ms,
                    "polling cycle timed out"
                );
                CycleStatus::TimedOut
            }
        };

        // 清理在每条退出路径上执行：设备协议栈对空闲连接敏感，
        // 每周期关闭、下个 tick 重连
        link.close().await;
        status
    }

    /// 周期体：确保连接后按目录顺序读取全部寄存器。
    async fn run_cycle(
        &self,
        link: &mut dyn DeviceLink,
    ) -> Result<HashMap<String, f64>, CycleError> {
        self.ensure_connected(link).await?;

        let mut values = HashMap::with_capacity(self.catalog.len());
        for descriptor in &self.catalog {
            // 单寄存器读失败只影响自身：略过该键，继续余下目录
            let words = match link.read_input_registers(descriptor.address).await {
                Ok(words) => words,
                Err(e) => {
                    telemetry::record_read_failure();
                    warn!(
                        register = %descriptor.name,
                        address = descriptor.address,
                        error = %e,
                        "register read failed"
                    );
                    continue;
                }
            };

            match decode_single_word(&words, descriptor.scale) {
                Some(value) => {
                    telemetry::record_register_decoded();
                    values.insert(descriptor.name.clone(), value);
                }
                None => {
                    // 非单字报文静默跳过：无条目、无错误
                    telemetry::record_register_skipped();
                    debug!(
                        register = %descriptor.name,
                        words = words.len(),
                        "unexpected payload length, skipping"
                    );
                }
            }
        }

        Ok(values)
    }

    /// 在重试预算内确保链路连通。
    async fn ensure_connected(&self, link: &mut dyn DeviceLink) -> Result<(), CycleError> {
        let budget = self.config.connect_max_retries;
        for attempt in 1..=budget {
            if link.is_connected() {
                return Ok(());
            }
            if let Err(e) = link.connect().await {
                telemetry::record_connect_failure();
                warn!(attempt, budget, error = %e, "connect attempt failed");
            }
        }

        if link.is_connected() {
            Ok(())
        } else {
            Err(CycleError::ConnectExhausted { attempts: budget })
        }
    }
}
