// src/pipeline.rs

//! Caller-driven composition of several VMs.
//!
//! Each stage is an ordinary [`VirtualMachine`]; the pipeline only relays
//! output batches to the next stage's input and calls `process()` on every
//! stage in order. Nothing runs concurrently.

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::error::VmError;
use crate::io::InputBatch;
use crate::vm::VirtualMachine;
use crate::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("a pipeline needs at least one stage")]
    Empty,

    /// The stage returned control without producing anything to relay.
    #[error("stage {stage} produced no output")]
    NoOutput { stage: usize },

    #[error(transparent)]
    Vm(#[from] VmError),
}

/// A chain of VMs where stage `i`'s output feeds stage `i + 1`.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<VirtualMachine>,
}

impl Pipeline {
    /// Builds one stage per phase, each running its own copy of `program`
    /// with the phase value as its first input.
    pub fn new(program: &[Value], phases: &[Value]) -> Result<Self, PipelineError> {
        let stages = phases
            .iter()
            .map(|&phase| VirtualMachine::with_input(program.to_vec(), phase))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_stages(stages)
    }

    pub fn from_stages(stages: Vec<VirtualMachine>) -> Result<Self, PipelineError> {
        if stages.is_empty() {
            return Err(PipelineError::Empty);
        }
        Ok(Pipeline { stages })
    }

    pub fn stages(&self) -> &[VirtualMachine] {
        &self.stages
    }

    /// True once the final stage has halted.
    pub fn is_terminated(&self) -> bool {
        self.stages.last().is_some_and(VirtualMachine::is_terminated)
    }

    /// Feeds `input` to the first stage and relays batches down the chain once.
    ///
    /// Returns whatever the last stage produced during this pass.
    pub fn pass(&mut self, input: impl Into<InputBatch>) -> Result<Vec<Value>, PipelineError> {
        let mut batch = input.into().into_values();
        for (stage, vm) in self.stages.iter_mut().enumerate() {
            if batch.is_empty() && stage > 0 {
                return Err(PipelineError::NoOutput { stage: stage - 1 });
            }
            vm.feed_input(batch)?;
            batch = vm.process()?;
        }
        Ok(batch)
    }

    /// Single pass: the result is the last value emitted by the final stage.
    pub fn run_chain(&mut self, signal: Value) -> Result<Value, PipelineError> {
        let output = self.pass(signal)?;
        output.last().copied().ok_or(PipelineError::NoOutput { stage: self.stages.len() - 1 })
    }

    /// Loops the final stage's output back into the first stage until the
    /// final stage halts, then returns the last value it emitted.
    pub fn run_feedback(&mut self, signal: Value) -> Result<Value, PipelineError> {
        let last = self.stages.len() - 1;
        let mut batch = vec![signal];
        for cycle in 0.. {
            batch = self.pass(batch)?;
            debug!(cycle, relayed = batch.len(), "feedback cycle complete");
            if self.is_terminated() {
                break;
            }
            if batch.is_empty() {
                return Err(PipelineError::NoOutput { stage: last });
            }
        }
        batch.last().copied().ok_or(PipelineError::NoOutput { stage: last })
    }
}

/// Tries every ordering of `phases` and returns the strongest final signal
/// together with the ordering that produced it. The first stage receives 0.
pub fn best_phase_setting(
    program: &[Value],
    phases: impl IntoIterator<Item = Value>,
    feedback: bool,
) -> Result<(Value, Vec<Value>), PipelineError> {
    let phases: Vec<Value> = phases.into_iter().collect();
    let mut best: Option<(Value, Vec<Value>)> = None;

    for order in phases.iter().copied().permutations(phases.len()) {
        let mut pipeline = Pipeline::new(program, &order)?;
        let signal = if feedback {
            pipeline.run_feedback(0)?
        } else {
            pipeline.run_chain(0)?
        };
        if best.as_ref().map_or(true, |(strongest, _)| signal > *strongest) {
            debug!(signal, phases = ?order, "new best phase setting");
            best = Some((signal, order));
        }
    }

    best.ok_or(PipelineError::Empty)
}
