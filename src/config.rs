//! Run configuration and sheet layout conventions

use crate::error::{RecalError, RecalResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where things live in the three input sheets.
///
/// Rows are 1-based, as shown in a spreadsheet application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Marker in the standards sheet; element headers sit one row above it
    pub standard_marker: String,
    /// Marker in the raw sheet's name header row
    pub sample_name_marker: String,
    /// Raw sheet row holding element headers
    pub element_header_row: u32,
    /// Raw sheet row holding the sample name header
    pub name_header_row: u32,
    /// First raw sheet row holding a sample
    pub first_sample_row: u32,
    /// First and last raw sheet rows holding calibration standards
    pub first_calibration_row: u32,
    pub last_calibration_row: u32,
    pub standard_sheet: Option<String>,
    pub raw_sheet: Option<String>,
    pub analyzed_sheet: Option<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            standard_marker: "Final:".to_string(),
            sample_name_marker: "Sample Name".to_string(),
            element_header_row: 1,
            name_header_row: 2,
            first_sample_row: 3,
            first_calibration_row: 4,
            last_calibration_row: 13,
            standard_sheet: None,
            raw_sheet: None,
            analyzed_sheet: None,
        }
    }
}

impl Layout {
    pub fn from_yaml_str(content: &str) -> RecalResult<Self> {
        let layout: Layout = serde_yaml::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_file(path: &Path) -> RecalResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> RecalResult<()> {
        if self.standard_marker.is_empty() || self.sample_name_marker.is_empty() {
            return Err(RecalError::Layout("markers must not be empty".to_string()));
        }
        let rows = [
            ("element_header_row", self.element_header_row),
            ("name_header_row", self.name_header_row),
            ("first_sample_row", self.first_sample_row),
            ("first_calibration_row", self.first_calibration_row),
            ("last_calibration_row", self.last_calibration_row),
        ];
        if let Some((name, _)) = rows.iter().find(|(_, row)| *row == 0) {
            return Err(RecalError::Layout(format!("{} is 1-based, got 0", name)));
        }
        if self.first_calibration_row > self.last_calibration_row {
            return Err(RecalError::Layout(format!(
                "calibration rows {}..{} are reversed",
                self.first_calibration_row, self.last_calibration_row
            )));
        }
        Ok(())
    }
}

/// Zero-based index of a 1-based row
pub(crate) fn row_index(row: u32) -> u32 {
    row.saturating_sub(1)
}

/// Everything one run needs
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub element: String,
    pub standard_file: PathBuf,
    pub raw_file: PathBuf,
    pub analyzed_file: PathBuf,
    pub degree: usize,
    pub verbose: bool,
    pub plot: bool,
    pub dry_run: bool,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub layout: Layout,
}

impl RunConfig {
    pub fn new(
        element: impl Into<String>,
        standard_file: impl Into<PathBuf>,
        raw_file: impl Into<PathBuf>,
        analyzed_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            element: element.into(),
            standard_file: standard_file.into(),
            raw_file: raw_file.into(),
            analyzed_file: analyzed_file.into(),
            degree: 1,
            verbose: false,
            plot: false,
            dry_run: false,
            output: None,
            report: None,
            layout: Layout::default(),
        }
    }

    /// Rewritten workbook path: `--output` or `<stem>_mod.xlsx` beside the input
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| suffixed_path(&self.analyzed_file, "_mod"))
    }

    /// Comparison chart workbook path, beside the rewritten workbook
    pub fn plot_path(&self) -> PathBuf {
        let output = self.output_path();
        let stem = output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        output.with_file_name(format!("{}_plot.xlsx", stem))
    }
}

/// Append `suffix` to the file stem. The writer emits plain xlsx packages, so
/// the extension is always `xlsx`.
fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}.xlsx", stem, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.standard_marker, "Final:");
        assert_eq!(layout.first_calibration_row, 4);
        assert_eq!(layout.last_calibration_row, 13);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let layout = Layout::from_yaml_str("last_calibration_row: 8\nraw_sheet: Counts\n").unwrap();
        assert_eq!(layout.last_calibration_row, 8);
        assert_eq!(layout.raw_sheet.as_deref(), Some("Counts"));
        assert_eq!(layout.first_sample_row, 3);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            Layout::from_yaml_str("first_row: 2\n"),
            Err(RecalError::LayoutYaml(_))
        ));
    }

    #[test]
    fn test_zero_row_rejected() {
        assert!(matches!(
            Layout::from_yaml_str("first_sample_row: 0\n"),
            Err(RecalError::Layout(_))
        ));
    }

    #[test]
    fn test_reversed_calibration_rows_rejected() {
        let yaml = "first_calibration_row: 10\nlast_calibration_row: 4\n";
        assert!(matches!(
            Layout::from_yaml_str(yaml),
            Err(RecalError::Layout(_))
        ));
    }

    #[test]
    fn test_output_path_suffix() {
        let config = RunConfig::new("Te", "std.xlsx", "raw.xlsx", "data/alz.xlsx");
        assert_eq!(config.output_path(), PathBuf::from("data/alz_mod.xlsx"));
        assert_eq!(config.plot_path(), PathBuf::from("data/alz_mod_plot.xlsx"));
    }

    #[test]
    fn test_output_path_non_xlsx_extension() {
        let config = RunConfig::new("Te", "std.xls", "raw.xls", "alz.xls");
        assert_eq!(config.output_path(), PathBuf::from("alz_mod.xlsx"));
    }

    #[test]
    fn test_output_path_macro_workbook_becomes_xlsx() {
        let config = RunConfig::new("Te", "std.xlsm", "raw.xlsm", "runs/alz.xlsm");
        assert_eq!(config.output_path(), PathBuf::from("runs/alz_mod.xlsx"));
        assert_eq!(config.plot_path(), PathBuf::from("runs/alz_mod_plot.xlsx"));
    }

    #[test]
    fn test_output_override() {
        let mut config = RunConfig::new("Te", "s.xlsx", "r.xlsx", "a.xlsx");
        config.output = Some(PathBuf::from("out/result.xlsx"));
        assert_eq!(config.output_path(), PathBuf::from("out/result.xlsx"));
        assert_eq!(config.plot_path(), PathBuf::from("out/result_plot.xlsx"));
    }
}
