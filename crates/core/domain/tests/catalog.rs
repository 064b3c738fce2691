use domain::{DeviceCategory, assemble_catalog, default_registers};
use std::collections::HashSet;

#[test]
fn assemble_default_only() {
    let catalog = assemble_catalog(&HashSet::new()).expect("catalog");
    assert_eq!(catalog.len(), default_registers().len());
    assert!(!catalog.iter().any(|d| d.name == "gas_power"));
    assert!(!catalog.iter().any(|d| d.name == "heat_pump_thermal_power"));
}

#[test]
fn assemble_with_categories() {
    let enabled = HashSet::from([DeviceCategory::GasBoiler, DeviceCategory::HeatPump]);
    let catalog = assemble_catalog(&enabled).expect("catalog");
    assert_eq!(catalog.len(), default_registers().len() + 3);

    // 默认分区在前，条件分区按类别声明顺序追加
    let names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
    let gas = names.iter().position(|n| *n == "gas_power").expect("gas");
    let thermal = names
        .iter()
        .position(|n| *n == "heat_pump_thermal_power")
        .expect("thermal");
    assert!(gas > names.iter().position(|n| *n == "domestic_water_flow").unwrap());
    assert!(thermal > gas);
}

#[test]
fn assemble_is_deterministic() {
    let enabled = HashSet::from([DeviceCategory::HeatPump, DeviceCategory::GasBoiler]);
    let first = assemble_catalog(&enabled).expect("catalog");
    let second = assemble_catalog(&enabled).expect("catalog");
    let first_names: Vec<&str> = first.iter().map(|d| d.name.as_str()).collect();
    let second_names: Vec<&str> = second.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(first_names, second_names);
}

#[test]
fn catalog_names_are_unique() {
    let enabled = HashSet::from([DeviceCategory::GasBoiler, DeviceCategory::HeatPump]);
    let catalog = assemble_catalog(&enabled).expect("catalog");
    let mut names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), catalog.len());
}

#[test]
fn duplicate_names_are_rejected() {
    let mut catalog = default_registers();
    catalog.push(catalog[0].clone());
    assert!(domain::catalog::validate_unique_names(&catalog).is_err());
}
