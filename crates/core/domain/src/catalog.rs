//! 寄存器目录定义
//!
//! 目录分为两部分：始终启用的默认分区，以及按设备类别（燃气锅炉、
//! 热泵）条件启用的分区。采集核心只消费装配后的扁平列表，不关心
//! 条目来自哪个分区。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// 目录错误。
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// 寄存器名称在目录内重复
    #[error("duplicate register name: {0}")]
    DuplicateName(String),

    /// 未知的设备类别标签
    #[error("unknown device category: {0}")]
    UnknownCategory(String),
}

/// 设备类别标签：控制条件分区是否进入装配结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    /// 燃气锅炉
    GasBoiler,
    /// 热泵
    HeatPump,
}

impl DeviceCategory {
    /// 全部类别，按声明顺序（装配顺序以此为准）。
    pub const ALL: [DeviceCategory; 2] = [DeviceCategory::GasBoiler, DeviceCategory::HeatPump];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::GasBoiler => "gas_boiler",
            DeviceCategory::HeatPump => "heat_pump",
        }
    }
}

impl FromStr for DeviceCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gas_boiler" => Ok(DeviceCategory::GasBoiler),
            "heat_pump" => Ok(DeviceCategory::HeatPump),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

/// 寄存器描述符：一个可轮询数据点的静态描述。
///
/// `value_kind` 与 `aggregation_kind` 对采集核心不透明，仅透传给
/// 下游消费者（显示层按其归类）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDescriptor {
    /// 唯一名称，跨采集周期稳定
    pub name: String,
    /// 输入寄存器起始地址
    pub address: u16,
    /// 显示单位
    pub unit: String,
    /// 数值类别标签（temperature / volume_flow_rate / power 等）
    pub value_kind: String,
    /// 聚合类别标签（measurement 等）
    pub aggregation_kind: String,
    /// 原始值缩放系数（默认 0.1）
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    0.1
}

fn descriptor(name: &str, address: u16, unit: &str, value_kind: &str, scale: f64) -> RegisterDescriptor {
    RegisterDescriptor {
        name: name.to_string(),
        address,
        unit: unit.to_string(),
        value_kind: value_kind.to_string(),
        aggregation_kind: "measurement".to_string(),
        scale,
    }
}

/// 默认分区：任何设备变体都启用的寄存器。
pub fn default_registers() -> Vec<RegisterDescriptor> {
    vec![
        descriptor("outdoor_air_temp", 33033, "°C", "temperature", 0.1),
        descriptor("roof_air_temp", 33031, "°C", "temperature", 0.1),
        // 冷水温度的原始分辨率更高，缩放系数与其余温度不同
        descriptor("cold_water_temp", 33034, "°C", "temperature", 0.01),
        descriptor("flow_water_temp", 33035, "°C", "temperature", 0.1),
        descriptor("domestic_water_temp", 33025, "°C", "temperature", 0.1),
        descriptor("solar_water_temp", 33030, "°C", "temperature", 0.1),
        descriptor("solar_heat_exchanger_in_water_temp", 33029, "°C", "temperature", 0.1),
        descriptor("solar_heat_exchanger_out_water_temp", 33028, "°C", "temperature", 0.1),
        descriptor("tank_layer1_water_temp", 33026, "°C", "temperature", 0.1),
        descriptor("tank_layer2_water_temp", 33032, "°C", "temperature", 0.1),
        descriptor("tank_layer3_water_temp", 33027, "°C", "temperature", 0.1),
        descriptor("tank_layer4_water_temp", 33024, "°C", "temperature", 0.1),
        descriptor("solar_water_flow", 33040, "L/min", "volume_flow_rate", 0.1),
        descriptor("domestic_water_flow", 33041, "L/min", "volume_flow_rate", 0.1),
    ]
}

/// 条件分区：仅当对应设备类别启用时进入目录。
pub fn category_registers(category: DeviceCategory) -> Vec<RegisterDescriptor> {
    match category {
        DeviceCategory::GasBoiler => vec![descriptor("gas_power", 33539, "kW", "power", 0.1)],
        DeviceCategory::HeatPump => vec![
            descriptor("heat_pump_thermal_power", 33544, "kW", "power", 0.1),
            descriptor("heat_pump_electric_power", 33545, "kW", "power", 0.1),
        ],
    }
}

/// 装配采集目录：默认分区 ∪ 启用类别的条件分区。
///
/// 顺序确定：默认分区在前，条件分区按 [`DeviceCategory::ALL`] 的
/// 声明顺序追加。名称重复视为配置错误。
pub fn assemble_catalog(
    enabled: &HashSet<DeviceCategory>,
) -> Result<Vec<RegisterDescriptor>, CatalogError> {
    let mut catalog = default_registers();
    for category in DeviceCategory::ALL {
        if enabled.contains(&category) {
            catalog.extend(category_registers(category));
        }
    }
    validate_unique_names(&catalog)?;
    Ok(catalog)
}

/// 校验目录内名称唯一。
pub fn validate_unique_names(catalog: &[RegisterDescriptor]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for descriptor in catalog {
        if !seen.insert(descriptor.name.as_str()) {
            return Err(CatalogError::DuplicateName(descriptor.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(
            "gas_boiler".parse::<DeviceCategory>().unwrap(),
            DeviceCategory::GasBoiler
        );
        assert_eq!(
            " heat_pump ".parse::<DeviceCategory>().unwrap(),
            DeviceCategory::HeatPump
        );
        assert!("oil_burner".parse::<DeviceCategory>().is_err());
    }

    #[test]
    fn test_descriptor_scale_default() {
        let json = r#"{
            "name": "outdoor_air_temp",
            "address": 33033,
            "unit": "°C",
            "value_kind": "temperature",
            "aggregation_kind": "measurement"
        }"#;
        let descriptor: RegisterDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.scale, 0.1);
    }
}
