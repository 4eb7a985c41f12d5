#![cfg(test)]

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

use crate::apt::{AptTask, CommandOutput, Runner};

/// Scripted stand-in for apt: returns canned stdout per task and records
/// every invocation in order.
pub struct FakeRunner {
    stdout: HashMap<AptTask, String>,
    exit_codes: HashMap<AptTask, i32>,
    log: RefCell<Vec<AptTask>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            stdout: HashMap::new(),
            exit_codes: HashMap::new(),
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn stdout_for(mut self, task: AptTask, text: &str) -> Self {
        self.stdout.insert(task, text.to_string());
        self
    }

    pub fn exit_code_for(mut self, task: AptTask, code: i32) -> Self {
        self.exit_codes.insert(task, code);
        self
    }

    pub fn invocations(&self) -> Vec<AptTask> {
        self.log.borrow().clone()
    }
}

impl Runner for FakeRunner {
    fn run(&self, task: AptTask) -> Result<CommandOutput> {
        self.log.borrow_mut().push(task);
        Ok(CommandOutput {
            stdout: self.stdout.get(&task).cloned().unwrap_or_default(),
            stderr: String::new(),
            status: Some(self.exit_codes.get(&task).copied().unwrap_or(0)),
        })
    }
}
