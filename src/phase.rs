//! Mission phases and their static configuration.
//!
//! Each phase carries a time window, a step size, the list of bodies to
//! query and the reference center. The CY3 and VIKRAM designators have
//! independently overridable windows because the lander's timeline
//! diverges from the shared one around separation.

use std::fmt;
use std::str::FromStr;

use crate::bodies::{Body, Center};
use crate::errors::OrbitsError;

/// A named mission period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Earth-centered cruise, from launch to lunar orbit insertion.
    Geo,
    /// Moon-centered cruise.
    Lunar,
    /// Moon-centered, with the LRO alongside.
    Lro,
    /// The powered-descent half hour.
    Landing,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Geo, Phase::Lunar, Phase::Lro, Phase::Landing];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Geo => "geo",
            Phase::Lunar => "lunar",
            Phase::Lro => "lro",
            Phase::Landing => "landing",
        }
    }

    /// The full static configuration of the phase.
    pub fn config(&self) -> PhaseConfig {
        match self {
            Phase::Geo => PhaseConfig {
                phase: *self,
                start: DateSpec::new(2023, 7, 14, 9, 23),
                stop: DateSpec::new(2023, 9, 6, 12, 33),
                cy3_start: DateSpec::new(2023, 7, 14, 9, 23),
                cy3_stop: DateSpec::new(2023, 9, 6, 12, 33),
                vikram_start: DateSpec::new(2023, 9, 14, 9, 23),
                vikram_stop: DateSpec::new(2023, 9, 6, 12, 33),
                step_size_in_minutes: 1,
                bare_step_size: false,
                bodies: &[Body::Moon, Body::Cy3],
                center: Center::Earth,
                orbits_file_stem: "geo-CY3",
            },
            Phase::Lunar => PhaseConfig {
                phase: *self,
                start: DateSpec::new(2023, 7, 14, 9, 23),
                stop: DateSpec::new(2023, 9, 6, 12, 33),
                cy3_start: DateSpec::new(2023, 7, 14, 9, 23),
                cy3_stop: DateSpec::new(2023, 9, 6, 12, 33),
                vikram_start: DateSpec::new(2023, 9, 14, 9, 23),
                vikram_stop: DateSpec::new(2023, 9, 6, 12, 33),
                step_size_in_minutes: 1,
                bare_step_size: false,
                bodies: &[Body::Cy3, Body::Earth],
                center: Center::Moon,
                orbits_file_stem: "lunar-CY3",
            },
            Phase::Lro => PhaseConfig {
                phase: *self,
                start: DateSpec::new(2023, 7, 14, 9, 23),
                stop: DateSpec::new(2023, 9, 6, 12, 33),
                cy3_start: DateSpec::new(2023, 7, 14, 9, 23),
                cy3_stop: DateSpec::new(2023, 9, 6, 12, 33),
                vikram_start: DateSpec::new(2023, 9, 14, 9, 23),
                vikram_stop: DateSpec::new(2023, 9, 6, 12, 33),
                step_size_in_minutes: 5,
                bare_step_size: false,
                bodies: &[Body::Cy3, Body::Lro, Body::Earth],
                center: Center::Moon,
                orbits_file_stem: "lunar-lro",
            },
            Phase::Landing => PhaseConfig {
                phase: *self,
                start: DateSpec::new(2023, 8, 23, 12, 15),
                stop: DateSpec::new(2023, 8, 23, 12, 40),
                cy3_start: DateSpec::new(2023, 8, 23, 12, 15),
                cy3_stop: DateSpec::new(2023, 8, 23, 12, 40),
                vikram_start: DateSpec::new(2023, 8, 23, 12, 15),
                vikram_stop: DateSpec::new(2023, 8, 23, 12, 40),
                // oversized on purpose: with the bare (unitless) step the
                // server slices the window into that many steps, which
                // yields second-level resolution over the descent
                step_size_in_minutes: 1500,
                bare_step_size: true,
                bodies: &[Body::Cy3],
                center: Center::Moon,
                orbits_file_stem: "landing-CY3",
            },
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = OrbitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geo" => Ok(Phase::Geo),
            "lunar" => Ok(Phase::Lunar),
            "lro" => Ok(Phase::Lro),
            "landing" => Ok(Phase::Landing),
            other => Err(OrbitsError::UnknownPhase(other.to_string())),
        }
    }
}

/// Broken-down UTC date and time of a window boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpec {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl DateSpec {
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        DateSpec {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Render in the `START_TIME`/`STOP_TIME` format Horizons accepts.
    pub fn horizons_format(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Static per-phase configuration. No side effects, no I/O.
#[derive(Debug, Clone)]
pub struct PhaseConfig {
    pub phase: Phase,
    pub start: DateSpec,
    pub stop: DateSpec,
    pub cy3_start: DateSpec,
    pub cy3_stop: DateSpec,
    pub vikram_start: DateSpec,
    pub vikram_stop: DateSpec,
    pub step_size_in_minutes: u32,
    /// The landing phase sends the step as a bare number (no `m` unit),
    /// the server then interprets it as a step count over the window.
    pub bare_step_size: bool,
    pub bodies: &'static [Body],
    pub center: Center,
    pub orbits_file_stem: &'static str,
}

#[cfg(test)]
mod phase_tests {
    use super::*;

    #[test]
    fn test_from_str_known_phases() {
        for phase in Phase::ALL {
            assert_eq!(phase.name().parse::<Phase>().unwrap(), phase);
        }
    }

    #[test]
    fn test_from_str_unknown_phase() {
        let err = "cruise".parse::<Phase>().unwrap_err();
        assert!(matches!(err, OrbitsError::UnknownPhase(name) if name == "cruise"));
    }

    #[test]
    fn test_landing_config() {
        let config = Phase::Landing.config();
        assert_eq!(config.step_size_in_minutes, 1500);
        assert!(config.bare_step_size);
        assert_eq!(config.bodies, &[Body::Cy3]);
        assert_eq!(config.center, Center::Moon);
        assert_eq!(config.orbits_file_stem, "landing-CY3");
    }

    #[test]
    fn test_geo_config() {
        let config = Phase::Geo.config();
        assert_eq!(config.start, DateSpec::new(2023, 7, 14, 9, 23));
        assert_eq!(config.stop, DateSpec::new(2023, 9, 6, 12, 33));
        assert!(!config.bare_step_size);
        assert_eq!(config.bodies, &[Body::Moon, Body::Cy3]);
        assert_eq!(config.center, Center::Earth);
    }

    #[test]
    fn test_horizons_format() {
        let spec = DateSpec::new(2023, 7, 14, 9, 23);
        assert_eq!(spec.horizons_format(), "2023-07-14 09:23");
    }
}
