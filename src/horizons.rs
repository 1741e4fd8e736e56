//! JPL Horizons batch-interface client.
//!
//! Builds the parameter mapping for one body/table-type pair and issues
//! the GET request through the shared [`FetchEnv`]. Raw response bodies
//! are kept verbatim in a [`RawStore`] so they can be cached to disk and
//! parsed later.

use std::collections::HashMap;

use log::debug;

use crate::bodies::{Body, Center};
use crate::constants::{JulianDate, HORIZONS_BATCH_URL};
use crate::env_state::FetchEnv;
use crate::errors::OrbitsError;

/// The two table kinds the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Elements,
    Vectors,
}

impl TableKind {
    pub const ALL: [TableKind; 2] = [TableKind::Elements, TableKind::Vectors];

    /// The `TABLE_TYPE` parameter value.
    pub fn table_type(&self) -> &'static str {
        match self {
            TableKind::Elements => "ELEMENTS",
            TableKind::Vectors => "VECTORS",
        }
    }

    /// The key used in cache filenames (`ho-<body>-<key>.txt`).
    pub fn file_key(&self) -> &'static str {
        match self {
            TableKind::Elements => "elements",
            TableKind::Vectors => "vectors",
        }
    }
}

/// Time coverage of one query.
#[derive(Debug, Clone)]
pub enum QuerySpan {
    /// A single epoch, sent as `TLIST`.
    PointEpoch(JulianDate),
    /// A start/stop/step range, sent as `START_TIME`/`STOP_TIME`/`STEP_SIZE`.
    Range {
        start: String,
        stop: String,
        step: String,
    },
}

/// Raw response text per (body, table kind). Entries are immutable once
/// stored; a re-fetch replaces the entry wholesale.
#[derive(Debug, Default)]
pub struct RawStore {
    contents: HashMap<(Body, TableKind), String>,
}

impl RawStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: Body, table: TableKind, text: String) {
        self.contents.insert((body, table), text);
    }

    pub fn get(&self, body: Body, table: TableKind) -> Option<&str> {
        self.contents.get(&(body, table)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Client for one run: fixed endpoint, fixed center body.
#[derive(Debug)]
pub struct HorizonsClient<'a> {
    env: &'a FetchEnv,
    center: Center,
}

impl<'a> HorizonsClient<'a> {
    pub fn new(env: &'a FetchEnv, center: Center) -> Self {
        HorizonsClient { env, center }
    }

    /// Fetch one table for one body and return the raw response text.
    ///
    /// Argument
    /// --------
    /// * `body`: the target body
    /// * `table`: osculating elements or state vectors
    /// * `span`: a single epoch or a start/stop/step range
    ///
    /// Return
    /// ------
    /// * The raw text body, or an error on transport failure or a non-2xx
    ///   status. The error carries no partial data; the caller decides
    ///   whether the run continues.
    pub fn fetch(
        &self,
        body: Body,
        table: TableKind,
        span: &QuerySpan,
    ) -> Result<String, OrbitsError> {
        let params = self.build_params(body, table, span);

        debug!("url = {HORIZONS_BATCH_URL}");
        debug!("params = {params:?}");

        self.env.get_with_query(HORIZONS_BATCH_URL, &params)
    }

    fn build_params(
        &self,
        body: Body,
        table: TableKind,
        span: &QuerySpan,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("batch", "1".to_string()),
            ("COMMAND", format!("'{}'", body.service_id())),
            ("TABLE_TYPE", format!("'{}'", table.table_type())),
            ("CENTER", format!("'{}'", self.center.code())),
            ("CSV_FORMAT", "'YES'".to_string()),
        ];

        match span {
            QuerySpan::PointEpoch(jd) => {
                params.push(("TLIST", format!("'{jd}'")));
            }
            QuerySpan::Range { start, stop, step } => {
                params.push(("START_TIME", format!("'{start}'")));
                params.push(("STOP_TIME", format!("'{stop}'")));
                params.push(("STEP_SIZE", format!("'{step}'")));
            }
        }

        params
    }
}

#[cfg(test)]
mod horizons_tests {
    use super::*;

    fn param<'p>(params: &'p [(&str, String)], key: &str) -> &'p str {
        &params
            .iter()
            .find(|(k, _)| *k == key)
            .unwrap_or_else(|| panic!("missing param {key}"))
            .1
    }

    #[test]
    fn test_point_epoch_params() {
        let env = FetchEnv::new();
        let client = HorizonsClient::new(&env, Center::Moon);
        let params = client.build_params(
            Body::Cy3,
            TableKind::Elements,
            &QuerySpan::PointEpoch(2460180.0104166665),
        );

        assert_eq!(param(&params, "batch"), "1");
        assert_eq!(param(&params, "COMMAND"), "'-158'");
        assert_eq!(param(&params, "TABLE_TYPE"), "'ELEMENTS'");
        assert_eq!(param(&params, "CENTER"), "'@301'");
        assert_eq!(param(&params, "CSV_FORMAT"), "'YES'");
        assert_eq!(param(&params, "TLIST"), "'2460180.0104166665'");
        assert!(!params.iter().any(|(k, _)| *k == "START_TIME"));
    }

    #[test]
    fn test_range_params() {
        let env = FetchEnv::new();
        let client = HorizonsClient::new(&env, Center::Earth);
        let params = client.build_params(
            Body::Moon,
            TableKind::Vectors,
            &QuerySpan::Range {
                start: "2023-07-14 09:23".into(),
                stop: "2023-09-06 12:33".into(),
                step: "1 m".into(),
            },
        );

        assert_eq!(param(&params, "COMMAND"), "'301'");
        assert_eq!(param(&params, "TABLE_TYPE"), "'VECTORS'");
        assert_eq!(param(&params, "CENTER"), "'@399'");
        assert_eq!(param(&params, "START_TIME"), "'2023-07-14 09:23'");
        assert_eq!(param(&params, "STOP_TIME"), "'2023-09-06 12:33'");
        assert_eq!(param(&params, "STEP_SIZE"), "'1 m'");
        assert!(!params.iter().any(|(k, _)| *k == "TLIST"));
    }

    #[test]
    fn test_raw_store_replace() {
        let mut store = RawStore::new();
        assert!(store.get(Body::Cy3, TableKind::Elements).is_none());

        store.insert(Body::Cy3, TableKind::Elements, "first".into());
        store.insert(Body::Cy3, TableKind::Elements, "second".into());
        assert_eq!(store.get(Body::Cy3, TableKind::Elements), Some("second"));
        assert!(store.get(Body::Cy3, TableKind::Vectors).is_none());
    }
}
