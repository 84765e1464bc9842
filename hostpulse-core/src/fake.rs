//! Scripted runner for unit tests.

use crate::command::HostCommand;
use crate::error::{CollectError, Result};
use crate::runner::{CommandOutput, CommandRunner};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum Scripted {
    Ok(String),
    Exit(i32, String),
    Missing,
}

/// Returns canned results per command; unscripted commands fail to spawn.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    script: Mutex<HashMap<HostCommand, Scripted>>,
    calls: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, command: HostCommand, result: Scripted) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(command, result);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: HostCommand) -> BoxFuture<'_, Result<CommandOutput>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.script.lock().unwrap().get(&command).cloned();
        let program = command.program();
        async move {
            match scripted {
                Some(Scripted::Ok(stdout)) => Ok(CommandOutput::stdout(stdout)),
                Some(Scripted::Exit(code, stdout)) => Err(CollectError::NonZeroExit {
                    program,
                    code: Some(code),
                    stdout,
                    stderr: String::new(),
                }),
                Some(Scripted::Missing) | None => Err(CollectError::Spawn {
                    program,
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
            }
        }
        .boxed()
    }
}
