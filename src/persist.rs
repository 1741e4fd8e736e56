//! Serialization of the accumulated dataset and the raw-response cache.
//!
//! One run produces, under the data directory:
//! - `ho-<body>-elements.txt` / `ho-<body>-vectors.txt`: verbatim raw
//!   responses, re-readable on a later `--use-cache` run,
//! - `momcache.txt`: a sidecar recording the run's Julian Date so a
//!   cached run reuses the original point-query epoch,
//! - `<stem>-orbit.txt`: the human-readable element report,
//! - `<stem>.json`: the structured document.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, error};

use crate::bodies::Body;
use crate::constants::JulianDate;
use crate::dataset::{ElementRecord, OrbitDataset};
use crate::errors::OrbitsError;
use crate::horizons::{RawStore, TableKind};

/// Sidecar file holding the Julian Date of the cached run.
pub const CACHE_SIDECAR: &str = "momcache.txt";

/// Path of the cached raw response for one (body, table) pair.
pub fn raw_cache_path(data_dir: &Utf8Path, body: Body, table: TableKind) -> Utf8PathBuf {
    data_dir.join(format!("ho-{}-{}.txt", body.cache_name(), table.file_key()))
}

/// Write the raw responses and the Julian-Date sidecar to the data
/// directory. A file that cannot be written is logged and skipped; the
/// remaining files are still attempted.
pub fn save_raw_responses(
    data_dir: &Utf8Path,
    jd: JulianDate,
    bodies: &[Body],
    store: &RawStore,
) {
    let sidecar = data_dir.join(CACHE_SIDECAR);
    if let Err(err) = fs::write(&sidecar, format!("jd={jd}\n")) {
        error!("failed to write to {sidecar}: {err}");
    }

    for &body in bodies {
        for table in TableKind::ALL {
            let Some(text) = store.get(body, table) else {
                continue;
            };
            let path = raw_cache_path(data_dir, body, table);
            if let Err(err) = fs::write(&path, text) {
                error!("can't write to {path}: {err}");
            }
        }
    }
}

/// Read back previously persisted raw responses.
///
/// A missing file is a cache miss, not an error: it is logged at debug
/// level and that (body, table) entry is simply absent from the returned
/// store. The returned Julian Date is the one recorded by the original
/// fetch, when the sidecar is present and parseable.
pub fn load_raw_responses(data_dir: &Utf8Path, bodies: &[Body]) -> (RawStore, Option<JulianDate>) {
    let mut store = RawStore::new();

    let sidecar = data_dir.join(CACHE_SIDECAR);
    let jd = match fs::read_to_string(&sidecar) {
        Ok(content) => read_sidecar_jd(&content),
        Err(err) => {
            error!("unable to open {sidecar}: {err}");
            None
        }
    };

    for &body in bodies {
        for table in TableKind::ALL {
            let path = raw_cache_path(data_dir, body, table);
            match fs::read_to_string(&path) {
                Ok(content) => store.insert(body, table, content),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!("file {path} not found or not readable");
                }
                Err(err) => error!("unable to open {path}: {err}"),
            }
        }
    }

    (store, jd)
}

fn read_sidecar_jd(content: &str) -> Option<JulianDate> {
    for line in content.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("jd") {
            let value = value.trim_start_matches([' ', '=']).trim();
            match value.parse::<f64>() {
                Ok(jd) => {
                    debug!("jd = {jd}");
                    return Some(jd);
                }
                Err(err) => error!("bad jd value in cache sidecar ({value}): {err}"),
            }
        }
    }
    None
}

fn print_elements(out: &mut impl Write, record: &ElementRecord) -> io::Result<()> {
    let field = |value: &Option<String>| -> String {
        value.as_deref().unwrap_or_default().to_string()
    };

    writeln!(out, "JDCT = {}", record.jdct)?;
    writeln!(out, "Date = {}", field(&record.date))?;
    writeln!(out, "EC = {}", field(&record.ec))?;
    writeln!(out, "QR = {}", field(&record.qr))?;
    writeln!(out, "IN = {}", field(&record.incl))?;
    writeln!(out, "OM = {}", field(&record.om))?;
    writeln!(out, "W = {}", field(&record.w))?;
    writeln!(out, "Tp = {}", field(&record.tp))?;
    writeln!(out, "N = {}", field(&record.n))?;
    writeln!(out, "MA = {}", field(&record.ma))?;
    writeln!(out, "TA = {}", field(&record.ta))?;
    writeln!(out, "A = {}", field(&record.a))?;
    writeln!(out, "AD = {}", field(&record.ad))?;
    writeln!(out, "PR = {}", field(&record.pr))?;
    Ok(())
}

/// Write the textual element report: one labeled block per timestamp per
/// body, blank-line separated, fields in the service's label order and
/// timestamps in the lexicographic order of their `jdct` tokens.
pub fn write_report(dataset: &OrbitDataset, path: &Utf8Path) -> Result<(), OrbitsError> {
    let mut out = BufWriter::new(File::create(path)?);

    for orbit in dataset.snapshot().values() {
        for record in orbit.elements.values() {
            print_elements(&mut out, record)?;
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Serialize the full dataset to the structured JSON document, creating
/// intermediate directories as needed, then verify the file exists and is
/// non-empty.
pub fn write_structured(dataset: &OrbitDataset, path: &Utf8Path) -> Result<(), OrbitsError> {
    debug!("orbits file: {path}");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, dataset)?;
    out.flush()?;

    debug!("JSON data written to {path}");

    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Ok(()),
        _ => Err(OrbitsError::EmptyOutput(path.to_path_buf())),
    }
}
