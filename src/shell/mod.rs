use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

pub mod chain;
mod executor;
pub mod substitute;

pub use executor::{Engine, Flow};

use crate::core::config::{RcLoader, ShellConfig};
use crate::core::env::EnvStore;
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::input::{History, LineReader, ReadOutcome};
use crate::output::OutputSink;
use crate::process::ProcessExecutor;

/// One shell session: the input source plus the engine that runs its lines.
pub struct Shell {
    engine: Engine,
    reader: LineReader,
    config: ShellConfig,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Result<Self, ShellError> {
        let history = match &config.history_file {
            Some(path) => History::with_file(path.clone(), config.history_max),
            None => History::in_memory(config.history_max),
        };

        let reader = match &config.script {
            Some(path) => {
                let file =
                    File::open(path).map_err(|e| ShellError::ScriptOpen(path.clone(), e))?;
                LineReader::script(Box::new(BufReader::new(file)))
            }
            None if config.interactive => LineReader::interactive(&history)?,
            None => LineReader::script(Box::new(io::stdin().lock())),
        };

        let state = ShellState::new(config.argv0.clone(), EnvStore::from_process(), history);
        let executor = ProcessExecutor::new(config.interactive)?;
        let engine = Engine::new(state, executor, OutputSink::stdout());

        Ok(Shell {
            engine,
            reader,
            config,
        })
    }

    /// Runs the session to completion and returns the process exit code.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        log::info!(
            "session start ({})",
            if self.config.interactive {
                "interactive"
            } else {
                "non-interactive"
            }
        );

        if let Some(rc_file) = self.config.rc_file.clone() {
            if let Flow::Exit(code) = self.source(&rc_file) {
                return Ok(code);
            }
        }

        let code = self.run_loop();
        self.engine.output().sync();
        log::info!("session end with status {}", code);
        Ok(code)
    }

    /// Runs every line of an rc file through the engine, outside of history.
    fn source(&mut self, path: &Path) -> Flow {
        let lines = match RcLoader::new(path).load_lines() {
            Ok(Some(lines)) => lines,
            Ok(None) => return Flow::Continue,
            Err(e) => {
                log::warn!("{}", e);
                return Flow::Continue;
            }
        };

        log::debug!("sourcing {} lines from {}", lines.len(), path.display());
        for line in &lines {
            if let Flow::Exit(code) = self.engine.run_line(line) {
                return Flow::Exit(code);
            }
        }
        self.engine.state.line_count = 0;
        Flow::Continue
    }

    fn run_loop(&mut self) -> i32 {
        loop {
            self.refresh_completer();
            self.engine.output().sync();

            let prompt = if self.reader.is_interactive() {
                self.prompt()
            } else {
                String::new()
            };

            match self.reader.read_line(&prompt) {
                Ok(ReadOutcome::Line(line)) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.engine.state.history.add(&line) {
                            log::warn!("{}", e);
                        }
                        self.reader.remember(&line);
                    }

                    if let Flow::Exit(code) = self.engine.run_line(&line) {
                        return code;
                    }
                }
                Ok(ReadOutcome::Interrupted) => {
                    if !self.config.quiet {
                        println!("^C");
                    }
                }
                Ok(ReadOutcome::Eof) => {
                    if self.reader.is_interactive() && !self.config.quiet {
                        println!("exit");
                    }
                    return self.engine.state.status;
                }
                Err(e) => {
                    log::warn!("input error: {}", e);
                    return self.engine.state.status;
                }
            }
        }
    }

    fn refresh_completer(&mut self) {
        let state = &self.engine.state;
        if let Some(completer) = self.reader.completer_mut() {
            completer.refresh_commands(&state.env);
            completer.update_aliases(&state.aliases);
        }
    }

    /// `<cwd> $ `, with the home directory shown as `~`.
    fn prompt(&self) -> String {
        let cwd = std::env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .or_else(|_| self.engine.state.env.require("PWD").map(String::from))
            .unwrap_or_else(|_| String::from("?"));
        format!("{} $ ", abbreviate_home(&cwd, self.engine.state.env.get("HOME")))
    }
}

fn abbreviate_home(cwd: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if !home.is_empty() && home != "/" => match cwd.strip_prefix(home) {
            Some("") => String::from("~"),
            Some(rest) if rest.starts_with('/') => format!("~{}", rest),
            _ => cwd.to_string(),
        },
        _ => cwd.to_string(),
    }
}
