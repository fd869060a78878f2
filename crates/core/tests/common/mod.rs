#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rtl_eval_core::{EvalResult, Invocation, Stage, StageOutcome, ToolRunner};

type Hook = Box<dyn Fn(&Invocation)>;

/// Scripted stand-in for the external tools. Records every invocation and
/// exits 0 unless told otherwise.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: RefCell<Vec<Invocation>>,
    exit_codes: HashMap<Stage, i32>,
    stdout: HashMap<Stage, String>,
    hooks: HashMap<Stage, Hook>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit(mut self, stage: Stage, code: i32) -> Self {
        self.exit_codes.insert(stage, code);
        self
    }

    pub fn stdout(mut self, stage: Stage, text: &str) -> Self {
        self.stdout.insert(stage, text.to_string());
        self
    }

    /// Side effect run when `stage` is invoked, e.g. creating artifacts.
    pub fn on(mut self, stage: Stage, hook: impl Fn(&Invocation) + 'static) -> Self {
        self.hooks.insert(stage, Box::new(hook));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.calls.borrow().iter().map(|c| c.stage).collect()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> EvalResult<StageOutcome> {
        self.calls.borrow_mut().push(invocation.clone());
        if let Some(hook) = self.hooks.get(&invocation.stage) {
            hook(invocation);
        }
        let exit_code = self.exit_codes.get(&invocation.stage).copied().unwrap_or(0);
        Ok(StageOutcome {
            stage: invocation.stage,
            exit_code: Some(exit_code),
            stdout: self.stdout.get(&invocation.stage).cloned().unwrap_or_default(),
            stderr: if exit_code == 0 { String::new() } else { "boom\n".to_string() },
            duration_ms: 1,
        })
    }
}

pub fn write(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}
