/// Julian Date, expressed in days.
pub type JulianDate = f64;

/// JPL Horizons batch interface, queried with GET parameters.
pub const HORIZONS_BATCH_URL: &str = "https://ssd.jpl.nasa.gov/horizons_batch.cgi";

/// Julian Date of the Unix epoch (1970-01-01 00:00:00 UTC).
pub const JD_UNIX_EPOCH: f64 = 2440587.5;

pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Start-of-ephemeris sentinel in a Horizons response.
pub const SOE_MARKER: &str = "$$SOE";

/// End-of-ephemeris sentinel in a Horizons response.
pub const EOE_MARKER: &str = "$$EOE";

/// Field count of one CSV line of an ELEMENTS table.
pub const ELEMENTS_FIELD_COUNT: usize = 14;

/// Field count of one CSV line of a VECTORS table.
pub const VECTORS_FIELD_COUNT: usize = 11;
