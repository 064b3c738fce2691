use domain::DeviceCategory;
use heatlink_config::AppConfig;

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("HEATLINK_DEVICE_HOST", "192.168.1.100");
        std::env::set_var("HEATLINK_POLL_INTERVAL_SECONDS", "30");
        std::env::set_var("HEATLINK_DEVICE_CATEGORIES", "gas_boiler, heat_pump");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.device_host, "192.168.1.100");
    assert_eq!(config.device_port, 502);
    assert_eq!(config.poll_interval_secs, 30);
    assert_eq!(config.cycle_timeout_ms, 5000);
    assert_eq!(config.connect_max_retries, 5);
    assert!(config.device_categories.contains(&DeviceCategory::GasBoiler));
    assert!(config.device_categories.contains(&DeviceCategory::HeatPump));
}
