use anyhow::{anyhow, Context, Result};
use ktracker_core::perception::config::FilterConfig;
use ktracker_core::perception::sensors::{Sensor, SyntheticImu};
use ktracker_core::perception::PerceptionStack;
use ktracker_core::TrackerCore;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_RATE_HZ: f64 = 100.0;
const DEFAULT_TICKS: f64 = 200.0;
const DEFAULT_YAW_RATE: f64 = 0.5;

/// Parse `key=value` arguments into a parameter map
fn parse_params(args: impl Iterator<Item = String>) -> Result<HashMap<String, f64>> {
    let mut params = HashMap::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got `{arg}`"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("invalid number for `{key}`"))?;
        params.insert(key.to_string(), value);
    }
    Ok(params)
}

/// Interval between ticks for a sample rate, rejecting periods tokio cannot schedule
fn tick_period(rate_hz: f64) -> Result<Duration> {
    if rate_hz <= 0.0 || !rate_hz.is_finite() {
        return Err(anyhow!("rate_hz must be positive"));
    }
    let period = Duration::try_from_secs_f64(1.0 / rate_hz)
        .with_context(|| format!("rate_hz {rate_hz} gives an unrepresentable tick period"))?;
    if period.is_zero() {
        return Err(anyhow!("rate_hz {rate_hz} is too high: tick period rounds to zero"));
    }
    Ok(period)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new().set_time_format_rfc3339().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let params = parse_params(std::env::args().skip(1))?;
    let rate_hz = params.get("rate_hz").copied().unwrap_or(DEFAULT_RATE_HZ);
    let ticks = params.get("ticks").copied().unwrap_or(DEFAULT_TICKS);
    let yaw_rate = params.get("yaw_rate").copied().unwrap_or(DEFAULT_YAW_RATE);
    let period = tick_period(rate_hz)?;

    let config = FilterConfig::from_params(&params)?;
    info!("Starting tracker demo with {:?}", config);

    let mut core = TrackerCore::new();
    core.register(PerceptionStack::with_config(config)?);
    core.init().map_err(|e| anyhow!("failed to initialize core: {e}"))?;

    let mut imu = SyntheticImu::new(rate_hz, yaw_rate).with_limit(ticks.max(0.0) as u64);
    let mut interval = tokio::time::interval(period);

    let stack = core
        .perception_stack_mut()
        .ok_or_else(|| anyhow!("perception stack not registered"))?;

    let report_every = config.gyro_capacity as u64;
    let mut tick: u64 = 0;
    loop {
        interval.tick().await;
        let sample = match imu.poll() {
            Ok(Some(sample)) => sample,
            Ok(None) => break,
            Err(e) => {
                error!("{}: {}", imu.name(), e);
                break;
            }
        };

        stack.push_imu(sample);
        tick += 1;
        if tick % report_every == 0 {
            info!(
                "raw yaw rate {:.3}, smoothed {:.3}, orientation rate {:.5}/tick",
                sample.gyro.z,
                stack.smoothed_gyro().z,
                stack.orientation_rate().x
            );
        }
    }

    info!(
        "Finished: smoothed gyro {:?}, smoothed orientation {:?}",
        stack.smoothed_gyro(),
        stack.smoothed_orientation()
    );

    core.shutdown()
        .map_err(|e| anyhow!("failed to shut down core: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_period() {
        assert_eq!(tick_period(100.0).unwrap(), Duration::from_millis(10));
        assert!(tick_period(1e12).is_err());
        assert!(tick_period(1e-300).is_err());
        assert!(tick_period(0.0).is_err());
        assert!(tick_period(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_params() {
        let params = parse_params(["ticks=5".to_string(), "rate_hz=20".to_string()].into_iter())
            .unwrap();
        assert_eq!(params.get("ticks"), Some(&5.0));
        assert!(parse_params(["ticks".to_string()].into_iter()).is_err());
        assert!(parse_params(["ticks=many".to_string()].into_iter()).is_err());
    }
}
