//! Celestial bodies and spacecraft tracked by the mission, together with
//! their JPL Horizons identifiers.

use std::fmt;

use crate::phase::Phase;

/// Identifier of a body on the Horizons service.
///
/// Most bodies carry a numeric code (negative for spacecraft); small
/// bodies like comets are addressed by an alphanumeric designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceId {
    Code(i64),
    Designation(&'static str),
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceId::Code(code) => write!(f, "{code}"),
            ServiceId::Designation(designation) => write!(f, "{designation}"),
        }
    }
}

/// A body tracked via the ephemeris service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Maven,
    Cy2,
    /// Chandrayaan 3 Orbiter
    Cy3,
    /// Chandrayaan 3 Lander
    Vikram,
    /// Lunar Reconnaissance Orbiter
    Lro,
    Mom,
    /// Earth-Moon barycenter
    Emb,
    Sun,
    Mercury,
    Venus,
    Moon,
    Earth,
    Mars,
    /// Comet C/2013 A1 (Siding Spring)
    Css,
}

impl Body {
    /// The designator used in configuration, cache filenames and the
    /// structured output (e.g. `"MOON"`, `"CY3"`).
    pub fn designator(&self) -> &'static str {
        match self {
            Body::Maven => "MAVEN",
            Body::Cy2 => "CY2",
            Body::Cy3 => "CY3",
            Body::Vikram => "VIKRAM",
            Body::Lro => "LRO",
            Body::Mom => "MOM",
            Body::Emb => "EMB",
            Body::Sun => "SUN",
            Body::Mercury => "MERCURY",
            Body::Venus => "VENUS",
            Body::Moon => "MOON",
            Body::Earth => "EARTH",
            Body::Mars => "MARS",
            Body::Css => "CSS",
        }
    }

    /// The Horizons `COMMAND` identifier of the body.
    pub fn service_id(&self) -> ServiceId {
        match self {
            Body::Maven => ServiceId::Code(-202),
            Body::Cy2 => ServiceId::Code(-152),
            Body::Cy3 => ServiceId::Code(-158),
            // Horizons has no separate id for the CY3 lander yet, the
            // CY2 lander id stands in for it.
            Body::Vikram => ServiceId::Code(-153),
            Body::Lro => ServiceId::Code(-85),
            Body::Mom => ServiceId::Code(-3),
            Body::Emb => ServiceId::Code(3),
            Body::Sun => ServiceId::Code(10),
            Body::Mercury => ServiceId::Code(199),
            Body::Venus => ServiceId::Code(299),
            Body::Moon => ServiceId::Code(301),
            Body::Earth => ServiceId::Code(399),
            Body::Mars => ServiceId::Code(499),
            Body::Css => ServiceId::Designation("C/2013 A1"),
        }
    }

    /// Whether the body maneuvers under its own power during the given
    /// phase: spacecraft (negative or designation-style ids), and the
    /// Moon while the geocentric phase is displayed.
    pub fn is_craft(&self, phase: Phase) -> bool {
        match self.service_id() {
            ServiceId::Code(code) if code < 0 => true,
            ServiceId::Designation(_) => true,
            _ => *self == Body::Moon && phase == Phase::Geo,
        }
    }

    /// Filename-safe form of the designator for the raw-response cache.
    pub fn cache_name(&self) -> String {
        sanitize_name(self.designator())
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designator())
    }
}

/// Replace path separators so a body name can be embedded in a filename.
pub fn sanitize_name(name: &str) -> String {
    name.replace('/', "_")
}

/// Reference center of a query, as a Horizons center code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    Earth,
    Mars,
    Sun,
    Moon,
}

impl Center {
    pub fn code(&self) -> &'static str {
        match self {
            Center::Earth => "@399",
            Center::Mars => "@499",
            Center::Sun => "500@10",
            Center::Moon => "@301",
        }
    }
}
