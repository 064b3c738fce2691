//! 采集快照
//!
//! 快照是寄存器名称到已解码数值的映射，仅在采集周期成功结束时整体
//! 替换，不做部分修改。某个名称缺失表示该寄存器上个周期读取失败或
//! 返回了非预期长度的报文，而不是数值为零。

use std::collections::HashMap;

/// 最近一次成功采集周期的完整结果。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: HashMap<String, f64>,
}

impl Snapshot {
    /// 以整体映射构造快照。
    pub fn new(values: HashMap<String, f64>) -> Self {
        Self { values }
    }

    /// 查询某寄存器的值；缺失表示"不可用"，而非零。
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// 是否包含某寄存器。
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// 快照内条目数量。
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 全部条目（名称 → 数值）。
    pub fn entries(&self) -> &HashMap<String, f64> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let snapshot = Snapshot::new(HashMap::from([("outdoor_air_temp".to_string(), 25.0)]));
        assert_eq!(snapshot.value("outdoor_air_temp"), Some(25.0));
        assert_eq!(snapshot.value("gas_power"), None);
        assert!(!snapshot.contains("gas_power"));
    }
}
