//! 快照发布
//!
//! 持有当前快照与最近一次成功更新的时间戳。快照仅整体替换；并发
//! 读者要么看到上一份完整快照，要么看到新一份，绝不会看到构建中的
//! 映射。

use domain::{Snapshot, now_epoch_ms};
use tokio::sync::watch;

/// 对订阅者可见的发布状态。
///
/// `cycles_completed` 在每个周期结束时递增（无论成败），订阅者以此
/// 重估自身可用性：快照中缺失的键表示"不可用"，而非零值。
#[derive(Debug, Clone)]
pub struct Published {
    /// 最近一次成功周期的完整快照
    pub snapshot: Snapshot,
    /// 最近一次成功更新的时间戳（毫秒）；从未成功过则为 None
    pub updated_at_ms: Option<i64>,
    /// 已完成周期计数（含失败周期）
    pub cycles_completed: u64,
    /// 最近一个周期是否成功
    pub last_cycle_ok: bool,
}

/// 快照发布器。
pub struct SnapshotPublisher {
    tx: watch::Sender<Published>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Published {
            snapshot: Snapshot::default(),
            updated_at_ms: None,
            cycles_completed: 0,
            last_cycle_ok: false,
        });
        Self { tx }
    }

    /// 周期成功：整体替换快照并通知订阅者。
    pub fn publish_success(&self, snapshot: Snapshot) {
        self.tx.send_modify(|state| {
            state.snapshot = snapshot;
            state.updated_at_ms = Some(now_epoch_ms());
            state.cycles_completed += 1;
            state.last_cycle_ok = true;
        });
    }

    /// 周期失败：保留上一份快照，仍通知订阅者。
    pub fn publish_failure(&self) {
        self.tx.send_modify(|state| {
            state.cycles_completed += 1;
            state.last_cycle_ok = false;
        });
    }

    /// 当前快照（最近一个周期失败时为上一份成功结果）。
    pub fn current(&self) -> Snapshot {
        self.tx.borrow().snapshot.clone()
    }

    /// 最近一次成功更新的时间戳（毫秒）。
    pub fn last_updated_ms(&self) -> Option<i64> {
        self.tx.borrow().updated_at_ms
    }

    /// 订阅周期完成通知。
    pub fn subscribe(&self) -> watch::Receiver<Published> {
        self.tx.subscribe()
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}
