//! Accumulated orbit data of one run.
//!
//! Two container disciplines on purpose: element records live in a map
//! keyed by the service's `JDCT` timestamp token and merge on an existing
//! key, while vector records are an ordered append-only sequence. The
//! service genuinely reports the two kinds that way and unifying them
//! would change the emitted structure.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bodies::Body;

/// Osculating-element record at one timestamp, keyed by `jdct`.
///
/// Every field is kept verbatim as served; values are not reinterpreted
/// numerically. Fields are optional so a later pass can extend an entry
/// with an attribute subset without clobbering what an earlier pass
/// already stored (see [`ElementRecord::merge`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementRecord {
    /// Julian-date-plus-calendar timestamp token, the record key.
    pub jdct: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Eccentricity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ec: Option<String>,
    /// Periapsis radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr: Option<String>,
    /// Inclination
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub incl: Option<String>,
    /// Longitude of ascending node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub om: Option<String>,
    /// Argument of periapsis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<String>,
    /// Time of periapsis passage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp: Option<String>,
    /// Mean motion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// Mean anomaly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma: Option<String>,
    /// True anomaly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ta: Option<String>,
    /// Semi-major axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<String>,
    /// Apoapsis radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad: Option<String>,
    /// Orbital period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<String>,
}

fn take_present(dst: &mut Option<String>, src: Option<String>) {
    if src.is_some() {
        *dst = src;
    }
}

impl ElementRecord {
    /// Overwrite only the fields present in `other`, keeping the rest.
    pub fn merge(&mut self, other: ElementRecord) {
        take_present(&mut self.date, other.date);
        take_present(&mut self.ec, other.ec);
        take_present(&mut self.qr, other.qr);
        take_present(&mut self.incl, other.incl);
        take_present(&mut self.om, other.om);
        take_present(&mut self.w, other.w);
        take_present(&mut self.tp, other.tp);
        take_present(&mut self.n, other.n);
        take_present(&mut self.ma, other.ma);
        take_present(&mut self.ta, other.ta);
        take_present(&mut self.a, other.a);
        take_present(&mut self.ad, other.ad);
        take_present(&mut self.pr, other.pr);
    }
}

/// Cartesian state record at one timestamp.
///
/// `vx` holds the served VY column and `vy` the served VX column. The
/// crossed layout is load-bearing: every downstream consumer of the
/// structured output reads the components that way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VectorRecord {
    pub jdct: String,
    pub date: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub vx: String,
    pub vy: String,
    pub vz: String,
    /// One-way light time
    pub lt: String,
    /// Range
    pub rg: String,
    /// Range rate
    pub rr: String,
}

/// Orbit data of one body.
#[derive(Debug, Default, Serialize)]
pub struct BodyOrbit {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub elements: BTreeMap<String, ElementRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vectors: Vec<VectorRecord>,
}

/// Per-body accumulator of one run, owned by the pipeline and passed by
/// reference to the parser and the persister. Entries are created lazily
/// on the first parsed record of a body and only ever grow.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct OrbitDataset {
    bodies: BTreeMap<String, BodyOrbit>,
}

impl OrbitDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element record, merging into an existing entry when the
    /// body already has one under the same `jdct` key.
    pub fn upsert_element(&mut self, body: Body, record: ElementRecord) {
        let elements = &mut self
            .bodies
            .entry(body.designator().to_string())
            .or_default()
            .elements;

        match elements.get_mut(&record.jdct) {
            Some(existing) => existing.merge(record),
            None => {
                elements.insert(record.jdct.clone(), record);
            }
        }
    }

    /// Append a vector record to the body's ordered sequence. No dedup:
    /// repeated timestamps are kept in arrival order.
    pub fn append_vector(&mut self, body: Body, record: VectorRecord) {
        self.bodies
            .entry(body.designator().to_string())
            .or_default()
            .vectors
            .push(record);
    }

    pub fn body(&self, body: Body) -> Option<&BodyOrbit> {
        self.bodies.get(body.designator())
    }

    /// Immutable view for serialization, bodies in designator order and
    /// elements in lexicographic `jdct` order.
    pub fn snapshot(&self) -> &BTreeMap<String, BodyOrbit> {
        &self.bodies
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
