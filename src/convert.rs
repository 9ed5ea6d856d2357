//! Applies a fitted curve to every sample and rewrites the analyzed sheet

use crate::core::{CalibrationSet, Interpolant};
use crate::excel::{cell_number, cell_text, Sheet};
use crate::extract::RawSample;
use calamine::Data;
use serde::Serialize;

/// What happened to one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SampleStatus {
    Converted {
        signal: f64,
        previous: Option<f64>,
        corrected: f64,
    },
    NotNumeric {
        value: String,
    },
    EvaluationFailed {
        signal: f64,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleOutcome {
    pub name: String,
    pub cell: String,
    #[serde(flatten)]
    pub status: SampleStatus,
}

impl SampleOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self.status, SampleStatus::Converted { .. })
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub element: String,
    pub degree: usize,
    pub calibration: CalibrationSet,
    pub samples: Vec<SampleOutcome>,
}

impl ConversionReport {
    pub fn converted(&self) -> usize {
        self.samples.iter().filter(|s| s.is_converted()).count()
    }

    pub fn skipped(&self) -> usize {
        self.samples.len() - self.converted()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Evaluate `spline` at every sample and overwrite the cell at the same
/// position in `analyzed`. Failed samples leave their cell untouched.
pub fn convert_samples(
    spline: &Interpolant,
    samples: &[RawSample],
    analyzed: &mut Sheet,
) -> Vec<SampleOutcome> {
    samples
        .iter()
        .map(|sample| {
            let status = convert_one(spline, sample, analyzed);
            if !matches!(status, SampleStatus::Converted { .. }) {
                tracing::debug!(sample = %sample.name, cell = %sample.cell, ?status, "sample skipped");
            }
            SampleOutcome {
                name: sample.name.clone(),
                cell: sample.cell.to_string(),
                status,
            }
        })
        .collect()
}

fn convert_one(spline: &Interpolant, sample: &RawSample, analyzed: &mut Sheet) -> SampleStatus {
    let Some(signal) = cell_number(&sample.value) else {
        return SampleStatus::NotNumeric {
            value: cell_text(&sample.value),
        };
    };

    match spline.evaluate(signal) {
        Ok(corrected) => {
            let previous = cell_number(analyzed.value(sample.cell));
            analyzed.set(sample.cell, Data::Float(corrected));
            SampleStatus::Converted {
                signal,
                previous,
                corrected,
            }
        }
        Err(e) => SampleStatus::EvaluationFailed {
            signal,
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::CellPos;

    fn spline() -> Interpolant {
        Interpolant::fit(&[10.0, 100.0, 1000.0], &[1.0, 10.0, 100.0], 1).unwrap()
    }

    fn sample(name: &str, row: u32, value: Data) -> RawSample {
        RawSample {
            name: name.to_string(),
            cell: CellPos::new(row, 1),
            value,
        }
    }

    #[test]
    fn test_converts_and_overwrites() {
        let mut analyzed = Sheet::new("alz");
        analyzed.set(CellPos::new(2, 1), Data::Float(0.9));
        let outcomes = convert_samples(&spline(), &[sample("Cal-1", 2, Data::Float(10.0))], &mut analyzed);

        assert_eq!(
            outcomes[0].status,
            SampleStatus::Converted {
                signal: 10.0,
                previous: Some(0.9),
                corrected: 1.0
            }
        );
        assert_eq!(outcomes[0].cell, "B3");
        assert_eq!(analyzed.value(CellPos::new(2, 1)), &Data::Float(1.0));
    }

    #[test]
    fn test_numeric_text_is_converted() {
        let mut analyzed = Sheet::new("alz");
        let outcomes = convert_samples(
            &spline(),
            &[sample("S", 4, Data::String("550".to_string()))],
            &mut analyzed,
        );
        assert!(outcomes[0].is_converted());
        assert_eq!(analyzed.value(CellPos::new(4, 1)), &Data::Float(55.0));
    }

    #[test]
    fn test_non_numeric_left_untouched() {
        let mut analyzed = Sheet::new("alz");
        analyzed.set(CellPos::new(3, 1), Data::String("<LOD".to_string()));
        let samples = [
            sample("Bad", 3, Data::String("####".to_string())),
            sample("Good", 4, Data::Float(100.0)),
        ];
        let outcomes = convert_samples(&spline(), &samples, &mut analyzed);

        assert_eq!(
            outcomes[0].status,
            SampleStatus::NotNumeric {
                value: "####".to_string()
            }
        );
        assert_eq!(
            analyzed.value(CellPos::new(3, 1)),
            &Data::String("<LOD".to_string())
        );
        assert!(outcomes[1].is_converted());
    }

    #[test]
    fn test_evaluation_failure_recorded() {
        let mut analyzed = Sheet::new("alz");
        analyzed.set(CellPos::new(5, 1), Data::Float(3.0));
        let outcomes = convert_samples(
            &spline(),
            &[sample("Inf", 5, Data::String("inf".to_string()))],
            &mut analyzed,
        );
        assert!(matches!(
            outcomes[0].status,
            SampleStatus::EvaluationFailed { .. }
        ));
        assert_eq!(analyzed.value(CellPos::new(5, 1)), &Data::Float(3.0));
    }

    #[test]
    fn test_report_counts_and_json() {
        let calibration = CalibrationSet::new(&[10.0, 100.0], &[1.0, 10.0]).unwrap();
        let report = ConversionReport {
            element: "Te".to_string(),
            degree: 1,
            calibration,
            samples: vec![
                SampleOutcome {
                    name: "A".to_string(),
                    cell: "C3".to_string(),
                    status: SampleStatus::Converted {
                        signal: 10.0,
                        previous: None,
                        corrected: 1.0,
                    },
                },
                SampleOutcome {
                    name: "B".to_string(),
                    cell: "C4".to_string(),
                    status: SampleStatus::NotNumeric {
                        value: "x".to_string(),
                    },
                },
            ],
        };
        assert_eq!(report.converted(), 1);
        assert_eq!(report.skipped(), 1);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["samples"][0]["status"], "converted");
        assert_eq!(json["samples"][1]["status"], "not_numeric");
        assert_eq!(json["samples"][1]["value"], "x");
        assert_eq!(json["calibration"]["points"][1]["concentration"], 10.0);
    }
}
