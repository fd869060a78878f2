mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{write, FakeRunner};
use rtl_eval_core::pipelines::synth::{AREA_REPORT, TIMING_REPORT};
use rtl_eval_core::pipelines::{run_synthesis, SynthRequest};
use rtl_eval_core::stager::Workspace;
use rtl_eval_core::{EvalError, ResultRecord, Stage, ToolConfig};
use tempfile::{tempdir, TempDir};

struct Fixture {
    _temp: TempDir,
    request: SynthRequest,
}

fn fixture() -> Fixture {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let resources = root.join("resources");
    write(&resources.join("flow.tcl"), "# flow\n");
    write(&resources.join("config.json"), r#"{"DESIGN_NAME": "adder", "VERILOG_FILES": []}"#);
    write(
        &resources.join("constraints.sdc"),
        "create_clock -name clk -period 5.0 [get_ports clk]\n",
    );
    let design = root.join("adder");
    write(&design.join("rtl.f"), "adder.v\n");
    write(&design.join("adder.v"), "module adder; endmodule\n");

    let request = SynthRequest {
        design_dir: design,
        out_dir: root.join("out"),
        resources_dir: resources,
        workspace: Workspace::new(root.join("openlane")),
        tools: ToolConfig::default(),
    };
    Fixture { _temp: temp, request }
}

fn staged_dir(request: &SynthRequest) -> PathBuf {
    request.workspace.designs_dir().join("adder")
}

/// Emulates a flow run that leaves one run directory with both reports.
fn produce_run(design: &Path) {
    let run = design.join("runs").join("RUN_1");
    write(&run.join(AREA_REPORT), "Chip area for module '\\adder': 12.0 345.5\n");
    write(&run.join(TIMING_REPORT), "  -1.00  slack (VIOLATED)\n");
}

#[test]
fn successful_flow_yields_metrics_and_copies_reports() {
    let fx = fixture();
    let runner = FakeRunner::new().on(Stage::Flow, |inv| produce_run(&inv.cwd));

    let metrics = run_synthesis(&fx.request, &runner).unwrap();
    assert_eq!(runner.stages(), vec![Stage::Flow]);
    assert_eq!(metrics.area_um2, Some(345.5));
    assert_eq!(metrics.sdc_period_ns, Some(5.0));
    assert_eq!(metrics.wns_ns, Some(-1.0));
    let fmax = metrics.fmax_mhz.unwrap();
    assert!((fmax - 1000.0 / 6.0).abs() < 1e-9);
    assert_eq!(metrics.run_dir, staged_dir(&fx.request).join("runs/RUN_1"));

    let copied = fx.request.out_dir.join("reports/synthesis/2-syn_sta.max.rpt");
    assert!(copied.is_file());
    assert_eq!(metrics.reports_dir, Some(fx.request.out_dir.join("reports")));
}

#[test]
fn flow_invocation_points_at_staged_design() {
    let fx = fixture();
    let runner = FakeRunner::new().on(Stage::Flow, |inv| produce_run(&inv.cwd));
    run_synthesis(&fx.request, &runner).unwrap();

    let calls = runner.calls.borrow();
    let staged = staged_dir(&fx.request);
    let args: Vec<String> =
        calls[0].args.iter().map(|a| a.to_string_lossy().to_string()).collect();
    assert_eq!(calls[0].program, PathBuf::from("tclsh"));
    assert_eq!(calls[0].cwd, staged);
    assert_eq!(
        args,
        vec![
            fx.request.workspace.flow_script().display().to_string(),
            "-design".to_string(),
            staged.display().to_string(),
            "-config".to_string(),
            staged.join("config.json").display().to_string(),
        ]
    );
    let cfg: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(staged.join("config.json")).unwrap()).unwrap();
    assert_eq!(cfg["VERILOG_FILES"], serde_json::json!(["dir::adder.v"]));
}

#[test]
fn missing_reports_are_null_metrics_not_errors() {
    let fx = fixture();
    let runner = FakeRunner::new().on(Stage::Flow, |inv| {
        fs::create_dir_all(inv.cwd.join("runs/RUN_empty")).unwrap();
    });

    let metrics = run_synthesis(&fx.request, &runner).unwrap();
    assert_eq!(metrics.area_um2, None);
    assert_eq!(metrics.wns_ns, None);
    assert_eq!(metrics.fmax_mhz, None);
    assert_eq!(metrics.sdc_period_ns, Some(5.0));
    assert_eq!(metrics.reports_dir, None);
}

#[test]
fn flow_failure_is_fatal_and_keeps_log() {
    let fx = fixture();
    let runner = FakeRunner::new().exit(Stage::Flow, 2).stdout(Stage::Flow, "[ERROR]: synth\n");

    let err = run_synthesis(&fx.request, &runner).unwrap_err();
    assert_eq!(runner.call_count(), 1);
    assert_eq!(err.to_string(), "flow.tcl failed");
    assert_eq!(err.tool_log(), Some("[ERROR]: synth\nboom\n"));

    let record = ResultRecord::from(Err::<rtl_eval_core::result::SynthMetrics, _>(err));
    let json = record.to_json();
    assert_eq!(json["success"], serde_json::json!(false));
    assert_eq!(json["flow_log"], serde_json::json!("[ERROR]: synth\nboom\n"));
    assert_eq!(record.exit_code(), 1);
}

#[test]
fn clean_exit_without_runs_is_no_artifact() {
    let fx = fixture();
    let runner = FakeRunner::new();
    let err = run_synthesis(&fx.request, &runner).unwrap_err();
    assert!(matches!(err, EvalError::NoArtifact(_)), "unexpected error: {err:?}");
}

#[test]
fn missing_resource_never_starts_the_flow() {
    let fx = fixture();
    fs::remove_file(fx.request.resources_dir.join("constraints.sdc")).unwrap();
    let runner = FakeRunner::new();

    let err = run_synthesis(&fx.request, &runner).unwrap_err();
    assert_eq!(runner.call_count(), 0);
    assert_eq!(err.to_string(), "constraints.sdc not found in resources");
    assert!(fx.request.out_dir.is_dir(), "out dir is created up front");
}
