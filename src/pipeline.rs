//! Run orchestration: fetch or load, parse, persist.
//!
//! Strictly sequential: bodies one at a time, elements before vectors,
//! no overlap. A transport failure on one body leaves that body's raw
//! data absent and the run continues; serialization always runs with
//! whatever subset was gathered.

use std::fs;

use camino::Utf8PathBuf;
use log::{debug, error, info};

use crate::bodies::Body;
use crate::constants::JulianDate;
use crate::dataset::OrbitDataset;
use crate::env_state::FetchEnv;
use crate::errors::OrbitsError;
use crate::horizons::{HorizonsClient, QuerySpan, RawStore, TableKind};
use crate::parser::parse_table;
use crate::persist::{load_raw_responses, save_raw_responses, write_report, write_structured};
use crate::phase::{Phase, PhaseConfig};
use crate::time_window::TimeWindow;

/// Immutable context of one run: the phase configuration, the resolved
/// window, and the run options. Built once, passed by reference.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub phase: Phase,
    pub config: PhaseConfig,
    pub window: TimeWindow,
    pub data_dir: Utf8PathBuf,
    pub use_cache: bool,
}

impl RunContext {
    pub fn new(phase: Phase, data_dir: impl Into<Utf8PathBuf>, use_cache: bool) -> Self {
        let config = phase.config();
        let window = TimeWindow::resolve(&config);
        RunContext {
            phase,
            config,
            window,
            data_dir: data_dir.into(),
            use_cache,
        }
    }

    /// Path of the structured JSON document of this run.
    pub fn orbits_file(&self) -> Utf8PathBuf {
        self.data_dir
            .join(format!("{}.json", self.config.orbits_file_stem))
    }

    /// Path of the textual element report of this run.
    pub fn report_file(&self) -> Utf8PathBuf {
        self.data_dir
            .join(format!("{}-orbit.txt", self.config.orbits_file_stem))
    }
}

fn fetch_all(ctx: &RunContext, env: &FetchEnv, run_jd: JulianDate) -> RawStore {
    let client = HorizonsClient::new(env, ctx.config.center);
    let mut store = RawStore::new();

    for &body in ctx.config.bodies {
        debug!("fetching elements for body {body} ...");
        fetch_into(
            &mut store,
            &client,
            body,
            TableKind::Elements,
            &QuerySpan::PointEpoch(run_jd),
        );

        debug!("fetching vectors for body {body} ...");
        fetch_into(
            &mut store,
            &client,
            body,
            TableKind::Vectors,
            &QuerySpan::Range {
                start: ctx.window.start_time_for(body),
                stop: ctx.window.stop_time_for(body),
                step: ctx.window.step_size().to_string(),
            },
        );
    }

    store
}

fn fetch_into(
    store: &mut RawStore,
    client: &HorizonsClient<'_>,
    body: Body,
    table: TableKind,
    span: &QuerySpan,
) {
    match client.fetch(body, table, span) {
        Ok(text) => store.insert(body, table, text),
        // recovered here: the body's raw data stays absent downstream
        Err(err) => error!("HTTP request failed for {body} {}: {err}", table.file_key()),
    }
}

/// Execute one full run and return the accumulated dataset.
///
/// Only data-directory creation is fatal; every per-body, per-line and
/// per-output failure is logged and the run carries on.
pub fn run(ctx: &RunContext, env: &FetchEnv) -> Result<OrbitDataset, OrbitsError> {
    fs::create_dir_all(&ctx.data_dir)?;

    info!(
        "phase {}: {} -> {}, step {}, bodies [{}], center {:?}",
        ctx.phase,
        ctx.window.start_epoch(),
        ctx.window.stop_epoch(),
        ctx.window.step_size(),
        ctx.config
            .bodies
            .iter()
            .map(|b| b.designator())
            .collect::<Vec<_>>()
            .join(", "),
        ctx.config.center,
    );

    let store = if ctx.use_cache {
        let (store, cached_jd) = load_raw_responses(&ctx.data_dir, ctx.config.bodies);
        let run_jd = cached_jd.unwrap_or(ctx.window.jd());
        debug!("resuming from cache with a JD of {run_jd}");
        store
    } else {
        let run_jd = ctx.window.jd();
        debug!(
            "using a JD of {run_jd} for start time {}",
            ctx.window.start_epoch()
        );
        let store = fetch_all(ctx, env, run_jd);
        save_raw_responses(&ctx.data_dir, run_jd, ctx.config.bodies, &store);
        store
    };

    let mut dataset = OrbitDataset::new();
    for &body in ctx.config.bodies {
        for table in TableKind::ALL {
            match store.get(body, table) {
                Some(raw) => {
                    parse_table(raw, body, table, &mut dataset);
                }
                None => debug!("no raw {} data for body {body}", table.file_key()),
            }
        }
    }

    let report_file = ctx.report_file();
    if let Err(err) = write_report(&dataset, &report_file) {
        error!("can't write to {report_file}: {err}");
    }

    let orbits_file = ctx.orbits_file();
    if let Err(err) = write_structured(&dataset, &orbits_file) {
        error!("failed to write {orbits_file}: {err}");
    }

    Ok(dataset)
}
