//! Shared test tools: a logging context and arithmetic steps that record what they did.
//!
//! Used by the graph and flow integration test modules.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flowgraph::{BoxError, Process};

/// Context threaded through every step; steps append human-readable entries.
#[derive(Debug, Default)]
pub struct LogContext {
    log: Mutex<Vec<String>>,
}

impl LogContext {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Op {
    Add(i64),
    Sub(i64),
    Mul(i64),
}

/// Arithmetic step logging e.g. "ADDED BY 2, 3 becomes 5".
#[derive(Clone, Copy, Debug)]
pub struct Arith(pub Op);

#[async_trait]
impl Process<i64, LogContext> for Arith {
    async fn process(&self, input: i64, ctx: Arc<LogContext>) -> Result<i64, BoxError> {
        let (verb, n, out) = match self.0 {
            Op::Add(n) => ("ADDED", n, input + n),
            Op::Sub(n) => ("SUBTRACTED", n, input - n),
            Op::Mul(n) => ("MULTIPLIED", n, input * n),
        };
        ctx.push(format!("{} BY {}, {} becomes {}", verb, n, input, out));
        Ok(out)
    }
}

pub fn added_by(n: i64) -> Arith {
    Arith(Op::Add(n))
}

pub fn subtracted_by(n: i64) -> Arith {
    Arith(Op::Sub(n))
}

pub fn multiplied_by(n: i64) -> Arith {
    Arith(Op::Mul(n))
}

/// Step that logs, suspends for `delay`, logs again and subtracts one.
pub struct Slow {
    pub delay: Duration,
}

#[async_trait]
impl Process<i64, LogContext> for Slow {
    async fn process(&self, input: i64, ctx: Arc<LogContext>) -> Result<i64, BoxError> {
        ctx.push(format!("SLOW STARTED WITH {}", input));
        tokio::time::sleep(self.delay).await;
        ctx.push(format!("SLOW FINISHED WITH {}", input - 1));
        Ok(input - 1)
    }
}

/// Step that always fails with `message`.
pub struct Failing(pub &'static str);

#[async_trait]
impl Process<i64, LogContext> for Failing {
    async fn process(&self, _input: i64, ctx: Arc<LogContext>) -> Result<i64, BoxError> {
        ctx.push(format!("FAILING: {}", self.0));
        Err(self.0.into())
    }
}
