//! Result assembly and emission.
//!
//! Every invocation produces exactly one [`ResultRecord`]. Its `success`
//! flag decides the exit code and whether consumers may trust the metrics.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{EvalError, EvalResult};

/// Achievable clock frequency in MHz for a period and WNS in ns.
///
/// Defined only when both inputs exist and `period - wns` is strictly
/// positive.
pub fn achievable_fmax(period_ns: Option<f64>, wns_ns: Option<f64>) -> Option<f64> {
    let achieved = period_ns? - wns_ns?;
    if achieved > 0.0 {
        Some(1000.0 / achieved).filter(|f| f.is_finite())
    } else {
        None
    }
}

/// Metrics scraped from one synthesis/timing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthMetrics {
    pub area_um2: Option<f64>,
    pub sdc_period_ns: Option<f64>,
    pub wns_ns: Option<f64>,
    pub fmax_mhz: Option<f64>,
    /// The authoritative run directory the metrics came from.
    pub run_dir: PathBuf,
    /// Copy of the run's reports, when the run produced any.
    pub reports_dir: Option<PathBuf>,
}

impl SynthMetrics {
    pub fn new(
        area_um2: Option<f64>,
        sdc_period_ns: Option<f64>,
        wns_ns: Option<f64>,
        run_dir: PathBuf,
        reports_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            area_um2,
            sdc_period_ns,
            wns_ns,
            fmax_mhz: achievable_fmax(sdc_period_ns, wns_ns),
            run_dir,
            reports_dir,
        }
    }
}

/// Context reported alongside a simulation score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimDetails {
    pub note: String,
    pub design: PathBuf,
    pub top_module: String,
    pub tb_files: Vec<PathBuf>,
}

/// Outcome of a successful simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    /// Absent markers score 0.0.
    pub functionality_score: f64,
    pub details: SimDetails,
    pub simulation_output: String,
}

/// Structured failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub error_message: String,
    /// `(key, log)` where key names the tool, e.g. `verilator_log`.
    pub tool_log: Option<(String, String)>,
}

impl From<&EvalError> for FailureRecord {
    fn from(err: &EvalError) -> Self {
        let tool_log = match (err.stage(), err.tool_log()) {
            (Some(stage), Some(log)) => Some((stage.log_key().to_string(), log.to_string())),
            _ => None,
        };
        Self { error_message: err.to_string(), tool_log }
    }
}

/// The single record emitted per invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultRecord {
    Synthesis(SynthMetrics),
    Simulation(SimReport),
    Failure(FailureRecord),
}

impl ResultRecord {
    pub fn is_success(&self) -> bool {
        !matches!(self, ResultRecord::Failure(_))
    }

    /// 0 on success, 1 on any recorded failure.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// JSON object with a leading `success` flag.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("success".to_string(), Value::Bool(self.is_success()));
        let body = match self {
            ResultRecord::Synthesis(metrics) => serde_json::to_value(metrics),
            ResultRecord::Simulation(report) => serde_json::to_value(report),
            ResultRecord::Failure(failure) => {
                let mut fields = Map::new();
                fields.insert(
                    "error_message".to_string(),
                    Value::String(failure.error_message.clone()),
                );
                if let Some((key, log)) = &failure.tool_log {
                    fields.insert(key.clone(), Value::String(log.clone()));
                }
                Ok(Value::Object(fields))
            }
        };
        // Plain data structs always serialize.
        if let Ok(Value::Object(fields)) = body {
            object.extend(fields);
        }
        Value::Object(object)
    }

    /// Write the record as one compact JSON line to `stdout` and, when
    /// `result_file` is given, pretty-printed to that file.
    pub fn emit(&self, result_file: Option<&Path>, stdout: &mut dyn Write) -> EvalResult<()> {
        let json = self.to_json();
        if let Some(path) = result_file {
            let pretty = serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
            fs::write(path, pretty)
                .map_err(|e| EvalError::io(format!("failed to write {}", path.display()), e))?;
        }
        writeln!(stdout, "{json}").map_err(|e| EvalError::io("failed to write stdout", e))?;
        stdout.flush().map_err(|e| EvalError::io("failed to flush stdout", e))?;
        Ok(())
    }
}

impl<T> From<EvalResult<T>> for ResultRecord
where
    T: Into<ResultRecord>,
{
    fn from(result: EvalResult<T>) -> Self {
        match result {
            Ok(value) => value.into(),
            Err(err) => ResultRecord::Failure(FailureRecord::from(&err)),
        }
    }
}

impl From<SynthMetrics> for ResultRecord {
    fn from(metrics: SynthMetrics) -> Self {
        ResultRecord::Synthesis(metrics)
    }
}

impl From<SimReport> for ResultRecord {
    fn from(report: SimReport) -> Self {
        ResultRecord::Simulation(report)
    }
}
