#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Write `body` to `path`, creating parent directories.
pub fn write(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

/// Write an executable shell script standing in for an external tool.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    write(&path, &format!("#!/bin/sh\n{body}\n"));
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Design directory with an `rtl.f` manifest and one source.
pub fn design(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    write(&dir.join("rtl.f"), "# sources\ntop.v\n");
    write(&dir.join("top.v"), "module top(input clk); endmodule\n");
    dir
}

/// Synthesis bundle with a 10ns clock.
pub fn synth_resources(root: &Path) -> PathBuf {
    let dir = root.join("synth_resources");
    write(&dir.join("flow.tcl"), "# flow entry point\n");
    write(&dir.join("config.json"), r#"{"DESIGN_NAME": "top", "VERILOG_FILES": []}"#);
    write(&dir.join("constraints.sdc"), "create_clock -name clk -period 10.0 [get_ports clk]\n");
    dir
}

/// Simulation bundle for top module `tb_top`.
pub fn sim_resources(root: &Path) -> PathBuf {
    let dir = root.join("sim_resources");
    write(&dir.join("top_module.txt"), "tb_top\n");
    write(&dir.join("tb_files.f"), "tb_top.sv\n");
    write(&dir.join("tb_top.sv"), "module tb_top; endmodule\n");
    dir
}

pub fn parse_stdout(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    let line = text.lines().last().expect("stdout should carry a JSON line");
    serde_json::from_str(line).expect("stdout line should be JSON")
}
