//! System-wide default constants.
//!
//! Threshold defaults are the values field engineers start triage with.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Spacing thresholds (acres)
// ============================================================================

/// Upper edge of the tightest spacing bucket.
pub const SPACING_X1_ACRES: f64 = 4.0;

pub const SPACING_X2_ACRES: f64 = 6.0;

pub const SPACING_X3_ACRES: f64 = 8.0;

/// Cut point for the widest spacing bucket.
pub const SPACING_X4_ACRES: f64 = 10.0;

/// Display marker for the widest spacing bucket.
pub const SPACING_X5_ACRES: f64 = 10.01;

// ============================================================================
// Volume thresholds (cumulative production)
// ============================================================================

pub const VOLUME_Y1: f64 = 10.0;

/// Cut point for the highest volume bucket.
pub const VOLUME_Y2: f64 = 20.0;

/// Display marker for the highest volume bucket.
pub const VOLUME_Y3: f64 = 20.01;

// ============================================================================
// Labels
// ============================================================================

/// Joins the spacing and volume labels into the combined group key.
pub const COMBINED_SEPARATOR: &str = " & ";

// ============================================================================
// Nearest neighbors
// ============================================================================

/// Zone size at which `auto` switches from the dense matrix to the k-d tree.
///
/// 2 048 wells = 32 MiB of f64 distances for the dense matrix.
pub const KD_TREE_MIN_ZONE_SIZE: usize = 2_048;

// ============================================================================
// Input / export
// ============================================================================

pub const ZONE_COLUMN: &str = "Zone Name";
pub const X_COLUMN: &str = "X";
pub const Y_COLUMN: &str = "Y";
pub const CUM_COLUMN: &str = "Cum";

pub const DELIMITER: char = ',';

/// Appended to the zone label to name each exported table.
pub const EXPORT_FILE_SUFFIX: &str = "_clusters.csv";

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "TRIAGE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "triage_config.toml";
