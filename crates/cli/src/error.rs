//! Failure classes of the `wavefield` binary and the exit code each one
//! reports. Clap's own parse errors exit with 2 before `run` is reached.
//!
//! | code | class                                              |
//! |------|----------------------------------------------------|
//! | 10   | simulator rejected the parameters or the backend failed |
//! | 11   | reading `--config` or writing a map failed          |
//! | 12   | `--params`/`--config` is not a JSON object, or `--fps` is unusable |
//! | 13   | JSON report could not be produced                   |

use std::fmt;

use wavefield_core::OceanError;

#[derive(Debug)]
pub enum CliError {
    Simulation(OceanError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Simulation(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

/// Snapshot write failures surface from the export crate as `OceanError::Io`
/// and keep their I/O exit code.
impl From<OceanError> for CliError {
    fn from(e: OceanError) -> Self {
        match e {
            OceanError::Io(msg) => CliError::Io(msg),
            other => CliError::Simulation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use wavefield_core::{Grid, SpectrumConfig, Texture};
    use wavefield_export::snapshot::write_maps;
    use wavefield_export::Encoding;
    use wavefield_spectrum::OceanSimulator;

    #[test]
    fn rejected_dimension_exits_as_simulation_failure() {
        let err = OceanSimulator::new(SpectrumConfig {
            dimension: 48,
            ..Default::default()
        })
        .err()
        .unwrap();
        let err = CliError::from(err);
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("dimension"), "{err}");
    }

    #[test]
    fn unwritable_output_directory_exits_as_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let out = blocker.join("frames");
        let flat: Texture = Grid::filled(16, [0.0, 0.0, 0.0, 1.0]).unwrap();

        let err = CliError::from(write_maps(&out, &[(&flat, Encoding::Height)]).unwrap_err());

        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("occupied"), "{err}");
    }

    #[test]
    fn zero_fps_exits_as_input_failure() {
        let err = crate::frame_delta(0.0).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("--fps"), "{err}");
    }

    #[test]
    fn unserializable_report_exits_as_serialization_failure() {
        let mut report = BTreeMap::new();
        report.insert((16_u32, 16_u32), "grid");
        let err = CliError::from(serde_json::to_string(&report).unwrap_err());
        assert_eq!(err.exit_code(), 13);
        assert!(err.to_string().contains("key must be a string"), "{err}");
    }
}
