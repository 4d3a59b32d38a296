use std::fs::{self, File};
use std::path::PathBuf;
use std::env;

use anyhow::Context;
use chart_composer::spec::ChartSpec;
use chrono::Utc;
use polars::frame::DataFrame;
use polars_io::SerWriter;
use polars_io::ipc::IpcWriter;
use uuid::Uuid;

/// Subdirectory of the system temp dir that receives all sink output.
const SINK_SUBDIR: &str = "stock_dashboard";

fn temp_output_path(symbol: &str, extension: &str) -> anyhow::Result<PathBuf> {
    let mut base_temp = env::temp_dir();
    base_temp.push(SINK_SUBDIR);
    if !base_temp.exists() {
        fs::create_dir_all(&base_temp)
            .with_context(|| format!("creating sink directory {}", base_temp.display()))?;
    }

    // Filename carries the symbol, a timestamp, and a UUID so concurrent
    // writers never collide.
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let filename = format!("{}_{}_{}.{}", symbol, timestamp, Uuid::new_v4(), extension);
    let mut output_path = base_temp.clone();
    output_path.push(filename);
    Ok(output_path)
}

/// Writes a tabular view to the temp sink as a feather (Arrow IPC) file
/// and returns the path.
pub fn write_dataframe_to_temp(df: &mut DataFrame, symbol: &str) -> anyhow::Result<PathBuf> {
    let output_path = temp_output_path(symbol, "feather")?;

    let mut file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let mut writer = IpcWriter::new(&mut file);
    writer.finish(df).context("writing feather table")?;

    Ok(output_path)
}

/// Writes a chart spec to the temp sink as pretty-printed JSON and returns
/// the path.
pub fn write_chart_spec_to_temp(spec: &ChartSpec, symbol: &str) -> anyhow::Result<PathBuf> {
    let output_path = temp_output_path(symbol, "json")?;

    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    serde_json::to_writer_pretty(file, spec).context("serializing chart spec")?;

    Ok(output_path)
}
