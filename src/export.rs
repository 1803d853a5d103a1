use crate::error::Result;
use crate::metrics::series::RollingSeriesBuffer;
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ExportFormat {
    #[strum(to_string = "JSON")]
    Json,
    #[strum(to_string = "CSV")]
    Csv,
}

impl ExportFormat {
    pub fn next(self) -> Self {
        match self {
            ExportFormat::Json => ExportFormat::Csv,
            ExportFormat::Csv => ExportFormat::Json,
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

pub fn export_dir(base_dir: Option<&str>) -> PathBuf {
    if let Some(custom_dir) = base_dir {
        PathBuf::from(shellexpand::tilde(custom_dir).to_string())
    } else {
        directories::ProjectDirs::from("com", "sysmon-tui", "SysMon-TUI")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn export_path(base_dir: Option<&str>, format: ExportFormat) -> Result<PathBuf> {
    let dir = export_dir(base_dir);
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("usage_history_{}.{}", timestamp, format.extension());
    Ok(dir.join(filename))
}

pub fn export_series(
    series: &RollingSeriesBuffer,
    format: ExportFormat,
    base_dir: Option<&str>,
) -> Result<PathBuf> {
    match format {
        ExportFormat::Json => export_series_json(series, base_dir),
        ExportFormat::Csv => export_series_csv(series, base_dir),
    }
}

pub fn export_series_json(series: &RollingSeriesBuffer, base_dir: Option<&str>) -> Result<PathBuf> {
    let filepath = export_path(base_dir, ExportFormat::Json)?;
    let json = serde_json::to_string_pretty(series)?;
    std::fs::write(&filepath, json)?;
    Ok(filepath)
}

pub fn export_series_csv(series: &RollingSeriesBuffer, base_dir: Option<&str>) -> Result<PathBuf> {
    let filepath = export_path(base_dir, ExportFormat::Csv)?;
    let mut file = File::create(&filepath)?;
    write_csv(series, &mut file)?;
    Ok(filepath)
}

pub fn write_csv<W: Write>(series: &RollingSeriesBuffer, out: &mut W) -> Result<()> {
    writeln!(out, "time,cpu_percent,memory_percent,disk_percent")?;
    for point in series.points() {
        writeln!(
            out,
            "{},{},{},{}",
            point.label, point.cpu, point.memory, point.disk
        )?;
    }
    Ok(())
}
