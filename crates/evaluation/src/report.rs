// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Derived views over a [`ResultTable`].
//!
//! Nothing here is stored in the table itself: per-model summaries, label
//! agreement and chart series are all recomputed from the rows on demand.

use crate::config::Reference;
use crate::ResultTable;
use discriminator::ModelId;
use std::collections::HashMap;

/// Timing and memory statistics for one model.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelSummary {
    pub model: ModelId,
    pub sentences: usize,
    pub mean_execution_seconds: f64,
    pub min_execution_seconds: f64,
    pub max_execution_seconds: f64,
    pub mean_memory_bytes: f64,
    /// Rows with prediction `true`.
    pub verified: usize,
}

impl ModelSummary {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} sentences, mean {:.2}ms (min {:.2}, max {:.2}), mean rss {:.1} MB, {}/{} verified",
            self.model.short_name(),
            self.sentences,
            self.mean_execution_seconds * 1000.0,
            self.min_execution_seconds * 1000.0,
            self.max_execution_seconds * 1000.0,
            self.mean_memory_bytes / (1024.0 * 1024.0),
            self.verified,
            self.sentences,
        )
    }
}

/// One summary per model, in table order.
pub fn summarize(table: &ResultTable) -> Vec<ModelSummary> {
    table
        .models()
        .into_iter()
        .map(|model| {
            let rows: Vec<_> = table.for_model(model).collect();
            let n = rows.len() as f64;
            let times = rows.iter().map(|r| r.execution_seconds);

            ModelSummary {
                model: model.clone(),
                sentences: rows.len(),
                mean_execution_seconds: times.clone().sum::<f64>() / n,
                min_execution_seconds: times.clone().fold(f64::INFINITY, f64::min),
                max_execution_seconds: times.fold(0.0, f64::max),
                mean_memory_bytes: rows.iter().map(|r| r.memory_bytes as f64).sum::<f64>() / n,
                verified: rows.iter().filter(|r| r.prediction).count(),
            }
        })
        .collect()
}

/// Confusion counts with "replaced" (prediction `false`) as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ConfusionMatrix {
    /// Replaced sentence, flagged.
    pub tp: usize,
    /// Genuine sentence, verified.
    pub tn: usize,
    /// Genuine sentence, flagged.
    pub fp: usize,
    /// Replaced sentence, verified.
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, genuine: bool, prediction: bool) {
        match (!genuine, !prediction) {
            (true, true) => self.tp += 1,
            (false, false) => self.tn += 1,
            (false, true) => self.fp += 1,
            (true, false) => self.fn_ += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Predictions of one model compared against reference labels.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LabelAgreement {
    pub model: ModelId,
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

/// Compares predictions with `references`, per model.
///
/// Rows whose sentence has no reference are skipped; models with no
/// labelled rows are left out.
pub fn label_agreement(table: &ResultTable, references: &[Reference]) -> Vec<LabelAgreement> {
    let labels: HashMap<&str, bool> = references
        .iter()
        .map(|r| (r.sentence.as_str(), r.genuine))
        .collect();

    table
        .models()
        .into_iter()
        .filter_map(|model| {
            let mut cm = ConfusionMatrix::default();
            for row in table.for_model(model) {
                if let Some(&genuine) = labels.get(row.sentence.as_str()) {
                    cm.record(genuine, row.prediction);
                }
            }
            (cm.total() > 0).then(|| LabelAgreement {
                model: model.clone(),
                confusion: cm,
                accuracy: cm.accuracy(),
                precision: cm.precision(),
                recall: cm.recall(),
            })
        })
        .collect()
}

/// One bar in a chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartPoint {
    /// Model short name.
    pub group: String,
    /// Sentence text for per-sentence charts, empty for per-model charts.
    pub label: String,
    pub value: f64,
}

/// A titled bar chart.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub unit: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}

/// The four standard views: mean and per-sentence execution time, mean
/// and per-sentence memory.
pub fn chart_series(table: &ResultTable) -> Vec<ChartSeries> {
    let summaries = summarize(table);
    let per_model = |value: fn(&ModelSummary) -> f64| {
        summaries
            .iter()
            .map(|s| ChartPoint {
                group: s.model.short_name().to_string(),
                label: String::new(),
                value: value(s),
            })
            .collect::<Vec<_>>()
    };
    let per_sentence = |value: fn(&crate::MeasurementRecord) -> f64| {
        table
            .iter()
            .map(|r| ChartPoint {
                group: r.model.short_name().to_string(),
                label: r.sentence.clone(),
                value: value(r),
            })
            .collect::<Vec<_>>()
    };

    vec![
        ChartSeries {
            title: "Mean execution time per model",
            unit: "ms",
            points: per_model(|s| s.mean_execution_seconds * 1000.0),
        },
        ChartSeries {
            title: "Execution time per sentence",
            unit: "ms",
            points: per_sentence(|r| r.execution_ms()),
        },
        ChartSeries {
            title: "Mean memory per model",
            unit: "MB",
            points: per_model(|s| s.mean_memory_bytes / (1024.0 * 1024.0)),
        },
        ChartSeries {
            title: "Memory per sentence",
            unit: "MB",
            points: per_sentence(|r| r.memory_mb()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeasurementRecord;

    fn table() -> ResultTable {
        let mut t = ResultTable::new();
        let rows = [
            ("org/small", "genuine one", 0.010, 100, true),
            ("org/small", "replaced one", 0.030, 300, false),
            ("org/large", "genuine one", 0.100, 1000, false),
            ("org/large", "replaced one", 0.300, 3000, true),
        ];
        for (model, sentence, secs, mb, prediction) in rows {
            t.push(MeasurementRecord {
                sentence: sentence.into(),
                model: ModelId::from(model),
                memory_bytes: mb * 1024 * 1024,
                execution_seconds: secs,
                prediction,
            });
        }
        t
    }

    #[test]
    fn test_summarize() {
        let s = summarize(&table());
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].model.as_str(), "org/small");
        assert!((s[0].mean_execution_seconds - 0.020).abs() < 1e-12);
        assert!((s[0].min_execution_seconds - 0.010).abs() < 1e-12);
        assert!((s[0].max_execution_seconds - 0.030).abs() < 1e-12);
        assert!((s[1].mean_memory_bytes - 2000.0 * 1024.0 * 1024.0).abs() < 1.0);
        assert_eq!(s[0].verified, 1);
        assert!(s[0].summary().starts_with("small: 2 sentences"));
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&ResultTable::new()).is_empty());
    }

    #[test]
    fn test_label_agreement() {
        let refs = vec![
            Reference {
                sentence: "genuine one".into(),
                genuine: true,
            },
            Reference {
                sentence: "replaced one".into(),
                genuine: false,
            },
        ];
        let a = label_agreement(&table(), &refs);
        assert_eq!(a.len(), 2);

        // small: genuine→verified (tn), replaced→flagged (tp).
        assert_eq!(a[0].confusion, ConfusionMatrix { tp: 1, tn: 1, fp: 0, fn_: 0 });
        assert_eq!(a[0].accuracy, 1.0);
        assert_eq!(a[0].precision, 1.0);
        assert_eq!(a[0].recall, 1.0);

        // large: genuine→flagged (fp), replaced→verified (fn).
        assert_eq!(a[1].confusion, ConfusionMatrix { tp: 0, tn: 0, fp: 1, fn_: 1 });
        assert_eq!(a[1].accuracy, 0.0);
        assert_eq!(a[1].precision, 0.0);
    }

    #[test]
    fn test_label_agreement_skips_unlabelled() {
        let refs = vec![Reference {
            sentence: "not in table".into(),
            genuine: true,
        }];
        assert!(label_agreement(&table(), &refs).is_empty());
    }

    #[test]
    fn test_chart_series() {
        let charts = chart_series(&table());
        assert_eq!(charts.len(), 4);
        assert_eq!(charts[0].points.len(), 2);
        assert_eq!(charts[1].points.len(), 4);
        assert_eq!(charts[0].points[0].group, "small");
        assert!((charts[0].points[0].value - 20.0).abs() < 1e-9);
        assert_eq!(charts[3].points[3].label, "replaced one");
        assert!((charts[3].max_value() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_confusion_matrix_json_keys() {
        let mut m = ConfusionMatrix::default();
        m.record(false, true);
        m.record(true, false);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json, serde_json::json!({ "tp": 0, "tn": 0, "fp": 1, "fn": 1 }));
    }
}
