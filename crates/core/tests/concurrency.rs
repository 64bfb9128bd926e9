use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use battinfo::{Battery, BatteryError, BatteryOptions, ManualClock, RawSnapshot};
use battinfo_platform::{FakeProvider, TimeLimited};

const THREADS: usize = 8;

fn slow_battery(
    delay: Duration,
    options: BatteryOptions,
) -> (Arc<FakeProvider>, ManualClock, Arc<Battery<Arc<FakeProvider>>>) {
    let fake = Arc::new(
        FakeProvider::single(RawSnapshot {
            percent: 64.0,
            ..Default::default()
        })
        .with_delay(delay),
    );
    let clock = ManualClock::new();
    let battery = Battery::with_clock(Arc::clone(&fake), options, clock.clone()).unwrap();
    (fake, clock, Arc::new(battery))
}

#[test]
fn concurrent_reads_refresh_once_per_window() {
    let (fake, clock, battery) = slow_battery(Duration::from_millis(50), BatteryOptions::default());
    clock.advance(Duration::from_millis(600));

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let battery = Arc::clone(&battery);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                battery.percent().value()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 64.0);
    }

    assert_eq!(fake.calls(), 2);
    assert_eq!(fake.max_concurrent(), 1);
}

#[test]
fn provider_calls_never_overlap() {
    let (fake, _clock, battery) = slow_battery(
        Duration::from_millis(5),
        BatteryOptions::default().refresh_interval_ms(0),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let battery = Arc::clone(&battery);
            thread::spawn(move || {
                for _ in 0..5 {
                    battery.read();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(fake.calls(), 1 + THREADS * 5);
    assert_eq!(fake.max_concurrent(), 1);
}

#[test]
fn explicit_refresh_is_serialized_with_reads() {
    let (fake, _clock, battery) = slow_battery(
        Duration::from_millis(10),
        BatteryOptions::default().refresh_interval_ms(0),
    );

    let refresher = {
        let battery = Arc::clone(&battery);
        thread::spawn(move || {
            for _ in 0..4 {
                battery.refresh().unwrap();
            }
        })
    };
    let reader = {
        let battery = Arc::clone(&battery);
        thread::spawn(move || {
            for _ in 0..4 {
                battery.voltage();
            }
        })
    };

    refresher.join().unwrap();
    reader.join().unwrap();

    assert_eq!(fake.calls(), 1 + 8);
    assert_eq!(fake.max_concurrent(), 1);
}

fn time_limited_battery() -> (Arc<FakeProvider>, Arc<Battery<TimeLimited<Arc<FakeProvider>>>>) {
    let fake = Arc::new(FakeProvider::single(RawSnapshot {
        percent: 64.0,
        ..Default::default()
    }));
    let provider = TimeLimited::new(Arc::clone(&fake), Duration::from_millis(20));
    let battery =
        Battery::with_provider(provider, BatteryOptions::default().refresh_interval_ms(0)).unwrap();
    (fake, Arc::new(battery))
}

#[test]
fn timed_out_reads_serve_stale_data_without_piling_up() {
    let (fake, battery) = time_limited_battery();
    fake.set_delay(Some(Duration::from_millis(300)));
    fake.set_snapshot(0, RawSnapshot {
        percent: 70.0,
        ..Default::default()
    });

    for _ in 0..5 {
        assert_eq!(battery.percent().value(), 64.0);
        assert!(matches!(battery.last_error(), Some(BatteryError::ReadError(_))));
    }
    assert_eq!(fake.calls(), 2);
    assert_eq!(fake.max_concurrent(), 1);

    // Once the overrun read returns, the next access reads afresh.
    thread::sleep(Duration::from_millis(400));
    fake.set_delay(None);
    assert_eq!(battery.percent().value(), 70.0);
    assert_eq!(battery.last_error(), None);
    assert_eq!(fake.calls(), 3);
    assert_eq!(fake.max_concurrent(), 1);
}

#[test]
fn concurrent_stale_reads_share_one_timed_out_call() {
    let (fake, battery) = time_limited_battery();
    fake.set_delay(Some(Duration::from_secs(1)));

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let battery = Arc::clone(&battery);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..3 {
                    assert_eq!(battery.percent().value(), 64.0);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(matches!(battery.last_error(), Some(BatteryError::ReadError(_))));
    assert_eq!(fake.calls(), 2);
    assert_eq!(fake.max_concurrent(), 1);
}
