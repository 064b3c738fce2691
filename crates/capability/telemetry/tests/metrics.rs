use heatlink_telemetry::{
    metrics, new_cycle_id, record_cycle_started, record_cycle_succeeded, record_register_decoded,
};

#[test]
fn cycle_ids_are_unique() {
    let first = new_cycle_id();
    let second = new_cycle_id();
    assert_ne!(first, second);
    assert_eq!(first.len(), 36);
}

#[test]
fn counters_accumulate() {
    // 全局计数器只增不减，这里只断言增量
    let before = metrics().snapshot();
    record_cycle_started();
    record_cycle_succeeded();
    record_register_decoded();
    record_register_decoded();
    let after = metrics().snapshot();
    assert_eq!(after.cycles_started, before.cycles_started + 1);
    assert_eq!(after.cycles_succeeded, before.cycles_succeeded + 1);
    assert_eq!(after.registers_decoded, before.registers_decoded + 2);
}
