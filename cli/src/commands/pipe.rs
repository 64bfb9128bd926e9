use std::time::Duration;

use battinfo::{Battery, BatteryProvider};
use color_eyre::eyre::Result;
use serde_json::{json, Value};
use tracing::debug;

use super::open_battery;
use crate::config::UserConfig;

pub fn run(config: &UserConfig, samples: u32, interval: Duration, compact: bool) -> Result<()> {
    let battery = open_battery(config)?;
    let mut counter = 0u32;

    loop {
        let doc = sample(&battery);

        if compact {
            println!("{}", serde_json::to_string(&doc)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }

        counter += 1;
        if samples > 0 && counter >= samples {
            break;
        }

        debug!(sample = counter, ?interval, "waiting for next sample");
        std::thread::sleep(interval);
    }

    Ok(())
}

/// One output document. `error` carries the last refresh failure, in which
/// case `battery` holds the previous reading.
fn sample<P: BatteryProvider>(battery: &Battery<P>) -> Value {
    let record = battery.read();

    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "battery": record,
        "age_ms": battery.age().as_millis() as u64,
        "error": battery.last_error().map(|e| e.to_string()),
    })
}
