use std::sync::Arc;
use std::time::Duration;

use battinfo::{
    Battery, BatteryError, BatteryOptions, BatteryTechnology, ChargeState, ManualClock,
    RawSnapshot, TimeFormat,
};
use battinfo_platform::FakeProvider;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn charging_snapshot() -> RawSnapshot {
    RawSnapshot {
        vendor: Some("Acme".to_string()),
        model: Some("X1".to_string()),
        serial_number: None,
        technology: BatteryTechnology::LithiumIon,
        percent: 71.1,
        state: ChargeState::Charging,
        capacity_percent: 95.0,
        temperature_c: None,
        cycle_count: None,
        energy_wh: 40.0,
        energy_full_wh: 56.0,
        energy_full_design_wh: 60.0,
        energy_rate_w: 12.5,
        voltage_v: 12.3,
        time_to_empty_secs: None,
        time_to_full_secs: Some(1800.0),
    }
}

fn setup(options: BatteryOptions) -> (Arc<FakeProvider>, ManualClock, Battery<Arc<FakeProvider>>) {
    let fake = Arc::new(FakeProvider::single(charging_snapshot()));
    let clock = ManualClock::new();
    let battery = Battery::with_clock(Arc::clone(&fake), options, clock.clone()).unwrap();
    (fake, clock, battery)
}

#[test]
fn reads_within_interval_are_served_from_cache() {
    let (fake, clock, battery) = setup(BatteryOptions::default());
    let first = battery.read();

    fake.set_snapshot(0, RawSnapshot {
        percent: 12.0,
        ..charging_snapshot()
    });
    clock.advance(Duration::from_millis(100));
    let second = battery.read();

    assert_eq!(fake.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn reads_after_interval_trigger_exactly_one_refresh() {
    let (fake, clock, battery) = setup(BatteryOptions::default());
    assert_eq!(battery.percent().value(), 71.1);

    fake.set_snapshot(0, RawSnapshot {
        percent: 70.4,
        ..charging_snapshot()
    });
    clock.advance(Duration::from_millis(600));

    assert_eq!(battery.percent().value(), 70.4);
    assert_eq!(battery.state(), ChargeState::Charging);
    assert_eq!(battery.voltage().format(), "12.3V");
    assert_eq!(fake.calls(), 2);
}

#[test]
fn construction_fails_for_missing_index() {
    let fake = Arc::new(FakeProvider::single(charging_snapshot()));
    let result = Battery::with_provider(Arc::clone(&fake), BatteryOptions::default().index(3));

    assert_eq!(
        result.map(|_| ()),
        Err(BatteryError::DeviceNotFound { index: 3 })
    );
    assert_eq!(fake.calls(), 1);
}

#[test]
fn construction_fails_without_battery_subsystem() {
    let result = Battery::with_provider(FakeProvider::unsupported(), BatteryOptions::default());
    assert!(matches!(result, Err(BatteryError::Unsupported(_))));
}

#[test]
fn as_dict_after_construction_has_every_field() {
    let (fake, clock, battery) = setup(BatteryOptions::default());
    clock.advance(Duration::from_secs(10));

    let expected = json!({
        "vendor": "Acme",
        "model": "X1",
        "serial_number": null,
        "technology": "Li-ion",
        "percent": [71.1, "%"],
        "state": "Charging",
        "capacity": [95.0, "%"],
        "temperature": null,
        "cycle_count": null,
        "energy": [40.0, "Wh"],
        "energy_full": [56.0, "Wh"],
        "energy_full_design": [60.0, "Wh"],
        "energy_rate": [12.5, "W"],
        "voltage": [12.3, "V"],
        "time_to_empty": null,
        "time_to_full": "30m",
        "battery_index": 0
    });

    assert_eq!(Value::Object(battery.as_dict().to_map()), expected);
    // as_dict never reads the hardware, even when the cache is stale.
    assert_eq!(fake.calls(), 1);
}

#[test]
fn zero_interval_reads_every_time() {
    let (fake, _clock, battery) = setup(BatteryOptions::default());
    battery.set_refresh_interval(0);
    assert_eq!(battery.refresh_interval(), 0);

    for _ in 0..5 {
        battery.energy();
    }
    assert_eq!(fake.calls(), 1 + 5);
}

#[test]
fn shortening_interval_makes_cache_stale_immediately() {
    let (fake, clock, battery) =
        setup(BatteryOptions::default().refresh_interval_ms(10_000));

    clock.advance(Duration::from_millis(200));
    battery.read();
    assert_eq!(fake.calls(), 1);

    battery.set_refresh_interval(100);
    assert_eq!(fake.calls(), 1);
    battery.read();
    assert_eq!(fake.calls(), 2);
}

#[test]
fn implicit_refresh_failure_serves_stale_data() {
    let (fake, clock, battery) = setup(BatteryOptions::default());
    fake.fail_with(BatteryError::ReadError("EBUSY".to_string()));
    clock.advance(Duration::from_millis(600));

    assert_eq!(battery.percent().value(), 71.1);
    assert_eq!(
        battery.last_error(),
        Some(BatteryError::ReadError("EBUSY".to_string()))
    );

    // The failed attempt did not count as a refresh, so the next read retries.
    fake.clear_failure();
    fake.set_snapshot(0, RawSnapshot {
        percent: 69.0,
        ..charging_snapshot()
    });
    assert_eq!(battery.percent().value(), 69.0);
    assert_eq!(battery.last_error(), None);
    assert_eq!(fake.calls(), 3);
}

#[test]
fn explicit_refresh_propagates_errors_and_keeps_cache() {
    let (fake, _clock, battery) = setup(BatteryOptions::default());
    let before = battery.as_dict();

    fake.fail_with(BatteryError::ReadError("permission denied".to_string()));
    assert_eq!(
        battery.refresh(),
        Err(BatteryError::ReadError("permission denied".to_string()))
    );
    assert_eq!(battery.as_dict(), before);

    fake.clear_failure();
    fake.remove_all();
    assert_eq!(
        battery.refresh(),
        Err(BatteryError::DeviceNotFound { index: 0 })
    );
    assert_eq!(battery.as_dict(), before);
}

#[test]
fn explicit_refresh_ignores_interval() {
    let (fake, _clock, battery) =
        setup(BatteryOptions::default().refresh_interval_ms(60_000));

    fake.set_snapshot(0, RawSnapshot {
        state: ChargeState::Full,
        percent: 100.0,
        time_to_full_secs: None,
        ..charging_snapshot()
    });
    battery.refresh().unwrap();

    assert_eq!(fake.calls(), 2);
    let record = battery.as_dict();
    assert_eq!(record.state, ChargeState::Full);
    assert_eq!(record.percent.format(), "100.0%");
    assert_eq!(record.time_to_full, None);
}

#[test]
fn time_format_applies_to_estimates() {
    let (_fake, _clock, battery) =
        setup(BatteryOptions::default().time_format(TimeFormat::Seconds));
    assert_eq!(battery.time_to_full().as_deref(), Some("1800s"));

    battery.set_time_format(TimeFormat::Human);
    assert_eq!(battery.time_to_full().as_deref(), Some("30m"));
    assert_eq!(battery.time_to_empty(), None);
}
