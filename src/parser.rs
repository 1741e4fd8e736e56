//! Parsing of raw Horizons response text into typed records.
//!
//! A response embeds its data lines between the `$$SOE` and `$$EOE`
//! sentinels; everything outside is header or footer prose and is
//! ignored. Each data line is CSV with occasional double-quoted fields
//! (calendar dates contain commas), so the splitter is quote-aware.
//!
//! A malformed line is logged and skipped; it never aborts the batch.

use log::{debug, error};
use thiserror::Error;

use crate::bodies::Body;
use crate::constants::{ELEMENTS_FIELD_COUNT, EOE_MARKER, SOE_MARKER, VECTORS_FIELD_COUNT};
use crate::dataset::{ElementRecord, OrbitDataset, VectorRecord};
use crate::horizons::TableKind;

/// A data line that could not be turned into a record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedLine {
    #[error("expected {expected} fields, got {got} in line: {line}")]
    FieldArity {
        expected: usize,
        got: usize,
        line: String,
    },
}

/// Split one CSV line into trimmed fields.
///
/// Commas inside double-quoted spans do not split; surrounding whitespace
/// and quote characters are stripped from each field. Segments that are
/// empty after stripping are dropped, so the trailing comma the service
/// emits does not produce a phantom field.
pub fn split_quoted_csv(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                push_field(&mut fields, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_field(&mut fields, &current);

    fields
}

fn push_field(fields: &mut Vec<String>, raw: &str) {
    let cleaned = raw.trim().trim_matches('"').trim();
    if !cleaned.is_empty() {
        fields.push(cleaned.to_string());
    }
}

fn element_from_line(line: &str) -> Result<ElementRecord, MalformedLine> {
    let fields = split_quoted_csv(line);
    if fields.len() != ELEMENTS_FIELD_COUNT {
        return Err(MalformedLine::FieldArity {
            expected: ELEMENTS_FIELD_COUNT,
            got: fields.len(),
            line: line.to_string(),
        });
    }

    let mut it = fields.into_iter();
    let jdct = it.next().unwrap_or_default();
    let mut next = || it.next();

    Ok(ElementRecord {
        jdct,
        date: next(),
        ec: next(),
        qr: next(),
        incl: next(),
        om: next(),
        w: next(),
        tp: next(),
        n: next(),
        ma: next(),
        ta: next(),
        a: next(),
        ad: next(),
        pr: next(),
    })
}

fn vector_from_line(line: &str) -> Result<VectorRecord, MalformedLine> {
    let fields = split_quoted_csv(line);
    if fields.len() != VECTORS_FIELD_COUNT {
        return Err(MalformedLine::FieldArity {
            expected: VECTORS_FIELD_COUNT,
            got: fields.len(),
            line: line.to_string(),
        });
    }

    let [jdct, date, x, y, z, vx, vy, vz, lt, rg, rr]: [String; VECTORS_FIELD_COUNT] =
        fields.try_into().expect("arity checked above");

    // The served VX goes into `vy` and the served VY into `vx`. The
    // crossed layout is part of the output format; see VectorRecord.
    Ok(VectorRecord {
        jdct,
        date,
        x,
        y,
        z,
        vx: vy,
        vy: vx,
        vz,
        lt,
        rg,
        rr,
    })
}

/// Scan one raw response and accumulate its records into the dataset.
///
/// Argument
/// --------
/// * `raw`: the verbatim response text
/// * `body`: the body the response belongs to
/// * `table`: which table kind the response carries
/// * `dataset`: the run's accumulator
///
/// Return
/// ------
/// * The number of data lines seen between the sentinels, malformed ones
///   included (diagnostic count only).
pub fn parse_table(raw: &str, body: Body, table: TableKind, dataset: &mut OrbitDataset) -> usize {
    let mut in_data_section = false;
    let mut count = 0usize;

    for line in raw.lines() {
        if line.starts_with(SOE_MARKER) {
            in_data_section = true;
            continue;
        }
        if line.starts_with(EOE_MARKER) {
            in_data_section = false;
            continue;
        }
        if !in_data_section {
            continue;
        }

        count += 1;
        match table {
            TableKind::Elements => match element_from_line(line) {
                Ok(record) => dataset.upsert_element(body, record),
                Err(err) => error!("{body}: {err}"),
            },
            TableKind::Vectors => match vector_from_line(line) {
                Ok(record) => dataset.append_vector(body, record),
                Err(err) => error!("{body}: {err}"),
            },
        }
    }

    debug!("found {count} {} records for body {body}", table.file_key());
    count
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    const ELEMENT_BLOCK: &str = "\
*******************************************************************************
$$SOE
2460180.010416667, \"A.D. 2023-Aug-23 12:15:00.0000 TDB\", 4.1E-03, 1.855E+03, 2.84E+01, 3.1E+01, 7.5E+01, 2460180.2E+00, 5.2E-02, 3.4E+02, 3.3E+02, 1.86E+03, 1.87E+03, 6.9E+03,
$$EOE
*******************************************************************************";

    #[test]
    fn test_split_plain_fields() {
        assert_eq!(split_quoted_csv("a, b ,c"), ["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma_is_atomic() {
        let fields = split_quoted_csv("1.5, \"A.D. 2023-Aug-23, 12:15\", 2.5,");
        assert_eq!(fields, ["1.5", "A.D. 2023-Aug-23, 12:15", "2.5"]);
    }

    #[test]
    fn test_split_drops_empty_segments() {
        // trailing comma and doubled comma yield no phantom fields
        assert_eq!(split_quoted_csv("a,,b,"), ["a", "b"]);
    }

    #[test]
    fn test_parse_elements_block() {
        let mut dataset = OrbitDataset::new();
        let count = parse_table(ELEMENT_BLOCK, Body::Cy3, TableKind::Elements, &mut dataset);
        assert_eq!(count, 1);

        let elements = &dataset.body(Body::Cy3).unwrap().elements;
        assert_eq!(elements.len(), 1);
        let record = &elements["2460180.010416667"];
        assert_eq!(
            record.date.as_deref(),
            Some("A.D. 2023-Aug-23 12:15:00.0000 TDB")
        );
        assert_eq!(record.ec.as_deref(), Some("4.1E-03"));
        assert_eq!(record.qr.as_deref(), Some("1.855E+03"));
        assert_eq!(record.incl.as_deref(), Some("2.84E+01"));
        assert_eq!(record.pr.as_deref(), Some("6.9E+03"));
    }

    #[test]
    fn test_reparse_merges_same_key() {
        let mut dataset = OrbitDataset::new();
        parse_table(ELEMENT_BLOCK, Body::Cy3, TableKind::Elements, &mut dataset);
        // second pass, same jdct, different eccentricity
        let second = ELEMENT_BLOCK.replace("4.1E-03", "9.9E-03");
        parse_table(&second, Body::Cy3, TableKind::Elements, &mut dataset);

        let elements = &dataset.body(Body::Cy3).unwrap().elements;
        assert_eq!(elements.len(), 1, "same key must not duplicate");
        assert_eq!(elements["2460180.010416667"].ec.as_deref(), Some("9.9E-03"));
    }

    #[test]
    fn test_wrong_arity_is_skipped_not_fatal() {
        let raw = "\
$$SOE
1.0, short line, 2.0,
2460180.010416667, \"A.D. 2023-Aug-23 12:15:00.0000 TDB\", 4.1E-03, 1.855E+03, 2.84E+01, 3.1E+01, 7.5E+01, 2460180.2E+00, 5.2E-02, 3.4E+02, 3.3E+02, 1.86E+03, 1.87E+03, 6.9E+03,
$$EOE";
        let mut dataset = OrbitDataset::new();
        let count = parse_table(raw, Body::Cy3, TableKind::Elements, &mut dataset);

        // the malformed line still counts, but only the valid one lands
        assert_eq!(count, 2);
        assert_eq!(dataset.body(Body::Cy3).unwrap().elements.len(), 1);
    }

    #[test]
    fn test_lines_outside_sentinels_are_ignored() {
        let raw = "\
1.0, 2.0, 3.0
$$SOE
$$EOE
4.0, 5.0, 6.0";
        let mut dataset = OrbitDataset::new();
        let count = parse_table(raw, Body::Cy3, TableKind::Elements, &mut dataset);
        assert_eq!(count, 0);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_vector_velocity_relabeling() {
        let raw = "\
$$SOE
2460180.010416667, \"A.D. 2023-Aug-23 12:15:00.0000 TDB\", 1.0E+03, 2.0E+03, 3.0E+03, 1.1E+00, 2.2E+00, 3.3E+00, 6.2E-03, 1.8E+03, 4.4E-01,
$$EOE";
        let mut dataset = OrbitDataset::new();
        let count = parse_table(raw, Body::Cy3, TableKind::Vectors, &mut dataset);
        assert_eq!(count, 1);

        let vectors = &dataset.body(Body::Cy3).unwrap().vectors;
        assert_eq!(vectors.len(), 1);
        let record = &vectors[0];
        assert_eq!(record.x, "1.0E+03");
        assert_eq!(record.z, "3.0E+03");
        // vx carries the served VY column and vy the served VX column
        assert_eq!(record.vx, "2.2E+00");
        assert_eq!(record.vy, "1.1E+00");
        assert_eq!(record.vz, "3.3E+00");
        assert_eq!(record.lt, "6.2E-03");
        assert_eq!(record.rg, "1.8E+03");
        assert_eq!(record.rr, "4.4E-01");
    }

    #[test]
    fn test_vector_wrong_arity_is_skipped() {
        let raw = "\
$$SOE
2460180.010416667, \"A.D. 2023-Aug-23 12:15:00.0000 TDB\", 1.0E+03, 2.0E+03, 3.0E+03, 1.1E+00, 2.2E+00, 3.3E+00, 6.2E-03, 1.8E+03, 4.4E-01, 9.9E+00,
$$EOE";
        let mut dataset = OrbitDataset::new();
        parse_table(raw, Body::Cy3, TableKind::Vectors, &mut dataset);
        assert!(dataset.is_empty());
    }
}
