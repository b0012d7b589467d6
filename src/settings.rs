//! Task settings with the defaults the scheduled run uses.

use std::path::PathBuf;

/// Weather station the municipality values are reported under (Aarhus).
pub const STATION_ID: &str = "607400";

/// Header line of the report. `147` is the receiving system's column id for degree days.
pub const REPORT_HEADER: [&str; 5] = ["Station", "year", "month", "day", "147"];

/// Remote directory reports are uploaded into.
pub const REMOTE_DIR: &str = "GraddagePython";

#[derive(Debug, Clone)]
pub struct TaskSettings {
    pub municipality_id: String,
    pub parameter_id: String,
    pub time_resolution: String,
    pub station_id: String,
    pub remote_dir: String,
    /// Directory the report is written to before upload.
    pub work_dir: PathBuf,
    /// Credential holding the API base URL (username) and API key (password).
    pub api_credential: String,
    /// Credential holding the SFTP port (username) and host (password).
    pub server_credential: String,
    /// Credential holding the SFTP account.
    pub account_credential: String,
    pub upload: bool,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            municipality_id: "0751".to_string(),
            parameter_id: "mean_temp".to_string(),
            time_resolution: "day".to_string(),
            station_id: STATION_ID.to_string(),
            remote_dir: REMOTE_DIR.to_string(),
            work_dir: PathBuf::from("."),
            api_credential: "DMI Api-nøgle".to_string(),
            server_credential: "CrushFTPPortServer".to_string(),
            account_credential: "ChrushFTPGraddage".to_string(),
            upload: true,
        }
    }
}
