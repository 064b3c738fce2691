//! 追踪初始化与采集周期指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub cycles_started: u64,
    pub cycles_succeeded: u64,
    pub cycles_connect_failed: u64,
    pub cycles_timed_out: u64,
    pub connect_failures: u64,
    pub read_failures: u64,
    pub registers_decoded: u64,
    pub registers_skipped: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    cycles_started: AtomicU64,
    cycles_succeeded: AtomicU64,
    cycles_connect_failed: AtomicU64,
    cycles_timed_out: AtomicU64,
    connect_failures: AtomicU64,
    read_failures: AtomicU64,
    registers_decoded: AtomicU64,
    registers_skipped: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            cycles_started: AtomicU64::new(0),
            cycles_succeeded: AtomicU64::new(0),
            cycles_connect_failed: AtomicU64::new(0),
            cycles_timed_out: AtomicU64::new(0),
            connect_failures: AtomicU64::new(0),
            read_failures: AtomicU64::new(0),
            registers_decoded: AtomicU64::new(0),
            registers_skipped: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cycles_started: self.cycles_started.load(Ordering::Relaxed),
            cycles_succeeded: self.cycles_succeeded.load(Ordering::Relaxed),
            cycles_connect_failed: self.cycles_connect_failed.load(Ordering::Relaxed),
            cycles_timed_out: self.cycles_timed_out.load(Ordering::Relaxed),
            connect_failures: self.connect_failures.load(Ordering::Relaxed),
            read_failures: self.read_failures.load(Ordering::Relaxed),
            registers_decoded: self.registers_decoded.load(Ordering::Relaxed),
            registers_skipped: self.registers_skipped.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的采集周期 cycle_id（用于日志关联）。
pub fn new_cycle_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录周期开始次数。
pub fn record_cycle_started() {
    metrics().cycles_started.fetch_add(1, Ordering::Relaxed);
}

/// 记录周期成功次数。
pub fn record_cycle_succeeded() {
    metrics().cycles_succeeded.fetch_add(1, Ordering::Relaxed);
}

/// 记录连接预算耗尽导致的周期失败次数。
pub fn record_cycle_connect_failed() {
    metrics()
        .cycles_connect_failed
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录周期级超时次数。
pub fn record_cycle_timed_out() {
    metrics().cycles_timed_out.fetch_add(1, Ordering::Relaxed);
}

/// 记录单次连接尝试失败次数。
pub fn record_connect_failure() {
    metrics().connect_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录单寄存器读取失败次数。
pub fn record_read_failure() {
    metrics().read_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录解码成功的寄存器条目数。
pub fn record_register_decoded() {
    metrics().registers_decoded.fetch_add(1, Ordering::Relaxed);
}

/// 记录因报文长度非预期而跳过的寄存器条目数。
pub fn record_register_skipped() {
    metrics().registers_skipped.fetch_add(1, Ordering::Relaxed);
}
