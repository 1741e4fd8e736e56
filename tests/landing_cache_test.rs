//! End-to-end run of the landing phase over a pre-seeded cache directory.
//!
//! Cache mode never touches the network, so the whole pipeline — cache
//! load, parsing, report and JSON writing — runs against synthetic
//! Horizons responses.

use std::fs;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use cy3_orbits::bodies::Body;
use cy3_orbits::env_state::FetchEnv;
use cy3_orbits::phase::Phase;
use cy3_orbits::pipeline::{run, RunContext};

const ELEMENTS_RESPONSE: &str = "\
*******************************************************************************
Ephemeris / API_USER
*******************************************************************************
            JDCT ,   Calendar Date (TDB),                     EC, ...
*******************************************************************************
$$SOE
2460180.010416667, \"A.D. 2023-Aug-23 12:15:00.0000 TDB\", 4.1E-03, 1.855E+03, 2.84E+01, 3.1E+01, 7.5E+01, 2460180.2E+00, 5.2E-02, 3.4E+02, 3.3E+02, 1.86E+03, 1.87E+03, 6.9E+03,
$$EOE
*******************************************************************************
";

const VECTORS_RESPONSE: &str = "\
*******************************************************************************
$$SOE
2460180.010416667, \"A.D. 2023-Aug-23 12:15:00.0000 TDB\", 1.0E+03, 2.0E+03, 3.0E+03, 1.1E+00, 2.2E+00, 3.3E+00, 6.2E-03, 1.8E+03, 4.4E-01,
2460180.011111111, \"A.D. 2023-Aug-23 12:16:00.0000 TDB\", 1.1E+03, 2.1E+03, 3.1E+03, 1.2E+00, 2.3E+00, 3.4E+00, 6.3E-03, 1.9E+03, 4.5E-01,
$$EOE
*******************************************************************************
";

fn seed_cache(data_dir: &Utf8PathBuf) {
    fs::write(data_dir.join("momcache.txt"), "jd=2460180.0104166665\n").unwrap();
    fs::write(data_dir.join("ho-CY3-elements.txt"), ELEMENTS_RESPONSE).unwrap();
    fs::write(data_dir.join("ho-CY3-vectors.txt"), VECTORS_RESPONSE).unwrap();
}

#[test]
fn landing_phase_from_cache_produces_both_outputs() {
    let dir = TempDir::new().unwrap();
    let data_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    seed_cache(&data_dir);

    let ctx = RunContext::new(Phase::Landing, data_dir.clone(), true);
    let env = FetchEnv::new();
    let dataset = run(&ctx, &env).unwrap();

    // single-epoch window: exactly one element key for the single body
    let orbit = dataset.body(Body::Cy3).unwrap();
    assert_eq!(orbit.elements.len(), 1);
    assert_eq!(orbit.vectors.len(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.orbits_file()).unwrap()).unwrap();

    let bodies: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(bodies, ["CY3"]);

    let elements = json["CY3"]["elements"].as_object().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(
        elements["2460180.010416667"]["in"],
        "2.84E+01",
        "inclination serializes under the service's `in` label"
    );

    let vectors = json["CY3"]["vectors"].as_array().unwrap();
    assert_eq!(vectors.len(), 2);
    // the served VX/VY columns land swapped in the output
    assert_eq!(vectors[0]["vx"], "2.2E+00");
    assert_eq!(vectors[0]["vy"], "1.1E+00");
    assert_eq!(vectors[0]["vz"], "3.3E+00");

    let report = fs::read_to_string(ctx.report_file()).unwrap();
    assert!(report.contains("JDCT = 2460180.010416667"));
    assert!(report.contains("IN = 2.84E+01"));
}

#[test]
fn missing_cache_entry_still_reaches_serialization() {
    let dir = TempDir::new().unwrap();
    let data_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    // sidecar only, no raw files at all
    fs::write(data_dir.join("momcache.txt"), "jd=2460180.0104166665\n").unwrap();

    let ctx = RunContext::new(Phase::Landing, data_dir, true);
    let env = FetchEnv::new();
    let dataset = run(&ctx, &env).unwrap();

    assert!(dataset.is_empty());
    // outputs exist even with nothing gathered
    assert_eq!(fs::read_to_string(ctx.orbits_file()).unwrap(), "{}");
    assert!(ctx.report_file().is_file());
}

#[test]
fn landing_step_size_is_bare() {
    let ctx = RunContext::new(Phase::Landing, "unused", true);
    assert_eq!(ctx.window.step_size(), "1500");
    let geo = RunContext::new(Phase::Geo, "unused", true);
    assert_eq!(geo.window.step_size(), "1 m");
}
