//! File helpers for exporting convergence data to plotting tools.

use crate::error::Result;
use crate::harness::ConvergenceSeries;
use crate::report::ConvergenceReport;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes `run,average,reference` rows for every entry of `series`.
///
/// The constant `reference` column carries the `n/m` line so a plot can draw
/// it without recomputing anything.
pub fn write_series_csv(
    path: impl AsRef<Path>,
    series: &ConvergenceSeries,
    reference: f64,
) -> Result<()> {
    let mut writer = create(path.as_ref())?;
    writeln!(writer, "run,average,reference")?;
    for (run, average) in series.iter() {
        writeln!(writer, "{run},{average:.6},{reference:.6}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `report` as pretty-printed JSON.
pub fn write_report_json<T: Serialize>(
    path: impl AsRef<Path>,
    report: &ConvergenceReport<T>,
) -> Result<()> {
    let mut writer = create(path.as_ref())?;
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MajoritySampler, SimplePrng};
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("monte_majority_{tag}_{unique}"))
    }

    #[test]
    fn test_write_series_csv() {
        let tmp_dir = scratch_dir("csv");
        let path = tmp_dir.join("nested").join("series.csv");
        let series = ConvergenceSeries::from_draw_counts([1, 3, 2]);
        write_series_csv(&path, &series, 2.0).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "run,average,reference\n1,1.000000,2.000000\n2,2.000000,2.000000\n3,2.000000,2.000000\n"
        );
        fs::remove_dir_all(&tmp_dir).unwrap();
    }

    #[test]
    fn test_write_report_json() {
        let tmp_dir = scratch_dir("json");
        let path = tmp_dir.join("report.json");
        let array = [6i64, 6, 2];
        let sampler = MajoritySampler::new(&array).unwrap();
        let mut rng = SimplePrng::new(12);
        let series = crate::simulate_with(&sampler, 20, &mut rng).unwrap();
        let report = ConvergenceReport::build(&sampler, series, None, &mut rng).unwrap();
        write_report_json(&path, &report).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["len"], 3);
        assert_eq!(parsed["runs"], 20);
        fs::remove_dir_all(&tmp_dir).unwrap();
    }
}
