//! Bulk loading through the external `sqlldr` command-line program.
//!
//! A load writes two files next to each other under the request's output
//! path: `<table>.ctl` (the loader control file) and `<table>.dat` (the
//! `;`-delimited data file). The loader is spawned with the search path and
//! shared-library path overridden, awaited, and its log file parsed into a
//! [`LoadReport`].

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::core::frame::DataFrame;
use crate::core::value::ColumnType;
use crate::error::{GatewayError, Result};

/// sqlldr exit codes that leave the load usable: success and warning (some
/// records rejected into the bad file).
const EXIT_SUCCESS: i32 = 0;
const EXIT_WARN: i32 = 2;

/// Loader insertion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Append rows to the existing table content.
    Append,
    /// Replace the table content (DELETE then load).
    Replace,
    /// Truncate the table before loading.
    Truncate,
}

impl LoadMode {
    /// The control-file directive for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadMode::Append => "APPEND",
            LoadMode::Replace => "REPLACE",
            LoadMode::Truncate => "TRUNCATE",
        }
    }
}

/// A bulk-load request.
///
/// The destination table (`schema`.`frame.name()`) must already exist; the
/// loader only moves rows.
#[derive(Debug)]
pub struct LoadRequest<'a> {
    /// Database user.
    pub user: &'a str,
    /// Database password.
    pub password: &'a str,
    /// Database host.
    pub host: &'a str,
    /// Listener port.
    pub port: u16,
    /// Oracle instance service name.
    pub service_name: &'a str,
    /// Destination schema.
    pub schema: &'a str,
    /// Rows to load; the frame's name is the destination table.
    pub frame: &'a DataFrame,
    /// Directory the control/data/log/bad files are written to.
    pub output_path: &'a Path,
    /// Value for the loader's PATH environment variable.
    pub os_path: &'a str,
    /// Value for the loader's LD_LIBRARY_PATH environment variable.
    pub os_ld_library_path: &'a str,
    /// Insertion mode.
    pub mode: LoadMode,
    /// Charset of the data file (control-file CHARACTERSET directive).
    pub encoding: &'a str,
}

/// Outcome of an awaited loader run.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Rows the loader reported as successfully loaded.
    pub rows_loaded: u64,
    /// Rows the loader rejected into the bad file.
    pub rows_rejected: u64,
    /// The loader process exit code.
    pub exit_code: i32,
    /// Path of the loader log file.
    pub log_path: PathBuf,
    /// Path of the loader bad file.
    pub bad_path: PathBuf,
}

/// Run a bulk load and wait for the loader to finish.
pub(super) async fn load_data(request: &LoadRequest<'_>) -> Result<LoadReport> {
    request.frame.ensure_columns()?;

    let table = request.frame.name();
    let ctl_path = request.output_path.join(format!("{}.ctl", table));
    let dat_path = request.output_path.join(format!("{}.dat", table));
    let log_path = request.output_path.join(format!("{}.log", table));
    let bad_path = request.output_path.join(format!("{}.bad", table));

    tokio::fs::write(&ctl_path, render_control_file(request, &dat_path)).await?;
    tokio::fs::write(&dat_path, render_data_file(request.frame)?).await?;
    debug!(
        "Wrote loader files {} and {}",
        ctl_path.display(),
        dat_path.display()
    );

    let mut command = Command::new("sqlldr");
    command
        .arg(format!(
            "{}/{}@{}:{}/{}",
            request.user, request.password, request.host, request.port, request.service_name
        ))
        .arg(format!("control={}", ctl_path.display()))
        .arg(format!("log={}", log_path.display()))
        .arg(format!("bad={}", bad_path.display()))
        .env("PATH", request.os_path)
        .env("LD_LIBRARY_PATH", request.os_ld_library_path);

    let status = command.status().await.map_err(|e| {
        error!("Failed to launch sqlldr: {}", e);
        GatewayError::loader(table, format!("failed to launch sqlldr: {}", e))
    })?;

    let exit_code = status.code().unwrap_or(-1);
    let log_content = tokio::fs::read_to_string(&log_path).await.unwrap_or_default();
    let (rows_loaded, rows_rejected) = parse_loader_log(&log_content);

    let report = LoadReport {
        rows_loaded,
        rows_rejected,
        exit_code,
        log_path,
        bad_path,
    };

    match exit_code {
        EXIT_SUCCESS => {
            info!("sqlldr loaded {} rows into {}.{}", rows_loaded, request.schema, table);
            Ok(report)
        }
        EXIT_WARN => {
            warn!(
                "sqlldr finished with warnings for {}.{}: {} loaded, {} rejected (see {})",
                request.schema,
                table,
                rows_loaded,
                rows_rejected,
                report.bad_path.display()
            );
            Ok(report)
        }
        code => {
            error!("sqlldr exited with code {} for {}.{}", code, request.schema, table);
            Err(GatewayError::loader(
                table,
                format!(
                    "sqlldr exited with code {}, see {}",
                    code,
                    report.log_path.display()
                ),
            ))
        }
    }
}

/// Render the loader control file.
fn render_control_file(request: &LoadRequest<'_>, dat_path: &Path) -> String {
    let columns = request.frame.column_names().join(",");
    format!(
        "LOAD DATA\n\
         CHARACTERSET {}\n\
         INFILE '{}'\n\
         {}\n\
         INTO TABLE {}.{}\n\
         FIELDS TERMINATED BY ';' OPTIONALLY ENCLOSED BY '\"'\n\
         TRAILING NULLCOLS\n\
         ({})",
        normalize_charset(request.encoding),
        dat_path.display(),
        request.mode.as_str(),
        request.schema,
        request.frame.name(),
        columns
    )
}

/// Render the `;`-delimited data file (no header, non-numeric fields
/// double-quoted, UTF-8).
fn render_data_file(frame: &DataFrame) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    for row in frame.rows() {
        let mut record = Vec::with_capacity(row.len());
        for (value, col) in row.iter().zip(frame.columns()) {
            let field = value.as_delimited_field().ok_or_else(|| {
                GatewayError::unsupported_type("oracle", col.name(), ColumnType::Bytes)
            })?;
            record.push(field);
        }
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| GatewayError::loader(frame.name(), format!("staging write failed: {}", e)))
}

/// Normalize an encoding label to a control-file CHARACTERSET directive
/// (`utf8`, `UTF-8` → `UTF8`).
fn normalize_charset(encoding: &str) -> String {
    encoding
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_uppercase()
}

/// Pull loaded/rejected row counts out of a sqlldr log.
fn parse_loader_log(log: &str) -> (u64, u64) {
    let mut loaded = 0;
    let mut rejected = 0;
    for line in log.lines() {
        let trimmed = line.trim();
        if trimmed.contains("Rows successfully loaded") {
            loaded = leading_count(trimmed).unwrap_or(0);
        } else if trimmed.contains("Rows not loaded due to data errors") {
            rejected = leading_count(trimmed).unwrap_or(0);
        }
    }
    (loaded, rejected)
}

fn leading_count(line: &str) -> Option<u64> {
    line.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new("events")
            .with_column("id", ColumnType::Integer, vec![1.into(), 2.into()])
            .unwrap()
            .with_column("label", ColumnType::Text, vec!["a".into(), "b".into()])
            .unwrap()
    }

    fn sample_request<'a>(frame: &'a DataFrame, output: &'a Path) -> LoadRequest<'a> {
        LoadRequest {
            user: "app",
            password: "pw",
            host: "db.example.com",
            port: 1521,
            service_name: "ORCL",
            schema: "APP",
            frame,
            output_path: output,
            os_path: "/opt/oracle/bin",
            os_ld_library_path: "/opt/oracle/lib",
            mode: LoadMode::Append,
            encoding: "utf8",
        }
    }

    #[test]
    fn test_render_control_file() {
        let frame = sample_frame();
        let output = Path::new("/tmp/out");
        let request = sample_request(&frame, output);
        let rendered = render_control_file(&request, &output.join("events.dat"));
        assert_eq!(
            rendered,
            "LOAD DATA\n\
             CHARACTERSET UTF8\n\
             INFILE '/tmp/out/events.dat'\n\
             APPEND\n\
             INTO TABLE APP.events\n\
             FIELDS TERMINATED BY ';' OPTIONALLY ENCLOSED BY '\"'\n\
             TRAILING NULLCOLS\n\
             (id,label)"
        );
    }

    #[test]
    fn test_render_control_file_modes() {
        assert_eq!(LoadMode::Append.as_str(), "APPEND");
        assert_eq!(LoadMode::Replace.as_str(), "REPLACE");
        assert_eq!(LoadMode::Truncate.as_str(), "TRUNCATE");
    }

    #[test]
    fn test_render_data_file_quotes_non_numeric_fields() {
        let bytes = render_data_file(&sample_frame()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "1;\"a\"\n2;\"b\"\n");
    }

    #[test]
    fn test_render_data_file_rejects_binary_columns() {
        let frame = DataFrame::new("t")
            .with_column("raw", ColumnType::Bytes, vec![vec![1u8].into()])
            .unwrap();
        assert!(matches!(
            render_data_file(&frame).unwrap_err(),
            GatewayError::UnsupportedType { .. }
        ));
    }

    #[test]
    fn test_normalize_charset() {
        assert_eq!(normalize_charset("utf8"), "UTF8");
        assert_eq!(normalize_charset("UTF-8"), "UTF8");
        assert_eq!(normalize_charset("al32utf8"), "AL32UTF8");
    }

    #[test]
    fn test_parse_loader_log() {
        let log = "\
SQL*Loader: Release 21.0.0.0.0 - Production

Table APP.EVENTS:
  7 Rows successfully loaded.
  1 Row not loaded due to data errors.
  2 Rows not loaded due to data errors.
";
        let (loaded, rejected) = parse_loader_log(log);
        assert_eq!(loaded, 7);
        assert_eq!(rejected, 2);
    }

    #[test]
    fn test_parse_loader_log_empty() {
        assert_eq!(parse_loader_log(""), (0, 0));
    }

    #[tokio::test]
    async fn test_load_data_surfaces_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let frame = sample_frame();
        let mut request = sample_request(&frame, dir.path());
        // An empty search path guarantees the loader binary is absent.
        request.os_path = "";

        let err = load_data(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Loader { .. }));

        // Control and data files are written before the spawn attempt.
        assert!(dir.path().join("events.ctl").exists());
        assert!(dir.path().join("events.dat").exists());
    }
}
