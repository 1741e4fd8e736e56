//! Resolution of a phase configuration into an absolute time window.
//!
//! The broken-down UTC fields of the configuration are converted once per
//! run into [`hifitime::Epoch`] values and a Julian Date, computed as
//! `2440587.5 + unix_seconds / 86400`.

use hifitime::Epoch;

use crate::bodies::Body;
use crate::constants::{JulianDate, JD_UNIX_EPOCH, SECONDS_PER_DAY};
use crate::phase::{DateSpec, PhaseConfig};

fn to_epoch(spec: &DateSpec) -> Epoch {
    Epoch::from_gregorian_utc(spec.year, spec.month, spec.day, spec.hour, spec.minute, 0, 0)
}

/// Julian Date of a Unix timestamp in seconds.
pub fn julian_date(unix_seconds: f64) -> JulianDate {
    JD_UNIX_EPOCH + unix_seconds / SECONDS_PER_DAY
}

/// The absolute time window of a run, with the per-body overrides of the
/// CY3 and VIKRAM timelines.
///
/// The window is derived once from the phase configuration and never
/// mutated afterwards. The stop boundary is not checked against the start
/// boundary; the shipped VIKRAM override genuinely carries a start after
/// its stop and the server is left to reject or clamp such windows.
#[derive(Debug, Clone)]
pub struct TimeWindow {
    start: Epoch,
    stop: Epoch,
    jd: JulianDate,
    step_size: String,
    default_range: (DateSpec, DateSpec),
    cy3_range: (DateSpec, DateSpec),
    vikram_range: (DateSpec, DateSpec),
}

impl TimeWindow {
    /// Resolve the phase configuration into an absolute window.
    pub fn resolve(config: &PhaseConfig) -> Self {
        let start = to_epoch(&config.start);
        let stop = to_epoch(&config.stop);
        let jd = julian_date(start.to_unix_seconds());

        let step_size = if config.bare_step_size {
            config.step_size_in_minutes.to_string()
        } else {
            format!("{} m", config.step_size_in_minutes)
        };

        TimeWindow {
            start,
            stop,
            jd,
            step_size,
            default_range: (config.start, config.stop),
            cy3_range: (config.cy3_start, config.cy3_stop),
            vikram_range: (config.vikram_start, config.vikram_stop),
        }
    }

    pub fn start_epoch(&self) -> Epoch {
        self.start
    }

    pub fn stop_epoch(&self) -> Epoch {
        self.stop
    }

    /// Julian Date of the window start, used for point-style queries.
    pub fn jd(&self) -> JulianDate {
        self.jd
    }

    /// The `STEP_SIZE` parameter value for ranged queries.
    pub fn step_size(&self) -> &str {
        &self.step_size
    }

    fn range_for(&self, body: Body) -> &(DateSpec, DateSpec) {
        match body {
            Body::Cy3 => &self.cy3_range,
            Body::Vikram => &self.vikram_range,
            _ => &self.default_range,
        }
    }

    /// `START_TIME` value for the body, honoring the CY3/VIKRAM overrides.
    pub fn start_time_for(&self, body: Body) -> String {
        self.range_for(body).0.horizons_format()
    }

    /// `STOP_TIME` value for the body, honoring the CY3/VIKRAM overrides.
    pub fn stop_time_for(&self, body: Body) -> String {
        self.range_for(body).1.horizons_format()
    }
}
