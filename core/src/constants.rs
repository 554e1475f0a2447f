// Table parameters consumed by the downstream `Fixed` type.
// Row layouts are part of the consumer's contract - keep column order stable!

use crate::fixed::{Rounding, FIXED_SCALE};
use crate::generator::{ColumnSpec, Domain, Source, TableSpec};

/// Samples per camera orbit; one per raw y-angle unit (256 = full turn)
pub const CAMERA_SAMPLES: u32 = 256;

/// Default camera orbit radius (world units)
pub const CAMERA_RADIUS: f64 = 5.0;

/// Tighter orbit used by the close-up camera (world units)
pub const CAMERA_RADIUS_NEAR: f64 = 3.0;

/// Peak camera tilt in raw angle units, reached when facing along the z-axis
pub const CAMERA_TILT: f64 = -12.0;

/// One sample per degree over the first quadrant
pub const SINE_SAMPLES: u32 = 90;

/// Angle and index columns are already raw integers
pub const RAW_SCALE: u32 = 1;

/// How the tilt columns of a camera table are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tilt {
    /// `x_angle = T cos(theta)`, `z_angle = T sin(theta)`
    Derived,
    /// `x_angle = T`, `z_angle = 0` for every sample. Kept for tables that
    /// were shipped before the tilt followed the orbit.
    Constant,
}

/// Orbit of `radius` around the origin in the xz-plane, starting at
/// `(0, -radius)`, with the raw y-angle in the third column.
pub fn circular_positions(name: &str, radius: f64) -> TableSpec {
    TableSpec::new(name, CAMERA_SAMPLES, Domain::FullTurn)
        .column(ColumnSpec::new("x", Source::Sin { amplitude: radius }))
        .column(ColumnSpec::new("z", Source::Cos { amplitude: -radius }))
        .column(ColumnSpec::new("y_angle", Source::Index).with_scale(RAW_SCALE))
}

/// Circular positions plus x/z tilt angles.
pub fn camera_tilt(name: &str, radius: f64, tilt: f64, mode: Tilt) -> TableSpec {
    let (x_angle, z_angle) = match mode {
        Tilt::Derived => (Source::Cos { amplitude: tilt }, Source::Sin { amplitude: tilt }),
        Tilt::Constant => (Source::Constant { value: tilt }, Source::Constant { value: 0.0 }),
    };
    circular_positions(name, radius)
        .column(ColumnSpec::new("x_angle", x_angle).with_scale(RAW_SCALE))
        .column(ColumnSpec::new("z_angle", z_angle).with_scale(RAW_SCALE))
}

/// `sin` over [0, 90) degrees, rounded to nearest.
pub fn partial_sine(name: &str) -> TableSpec {
    TableSpec::new(name, SINE_SAMPLES, Domain::QuarterTurn).column(
        ColumnSpec::new("sin", Source::Sin { amplitude: 1.0 })
            .with_scale(FIXED_SCALE)
            .with_rounding(Rounding::Nearest),
    )
}

/// Every table the game ships with.
pub fn presets() -> Vec<TableSpec> {
    vec![
        circular_positions("camera_locations", CAMERA_RADIUS),
        circular_positions("camera_locations_near", CAMERA_RADIUS_NEAR),
        camera_tilt("camera_tilt", CAMERA_RADIUS, CAMERA_TILT, Tilt::Derived),
        camera_tilt("camera_tilt_constant", CAMERA_RADIUS, CAMERA_TILT, Tilt::Constant),
        partial_sine("partial_sine"),
    ]
}
