use std::process;

use super::chain::{self, ChainSegment};
use super::substitute::{substitute, Expansion};
use crate::core::commands::{Builtin, BuiltinOutcome, Command};
use crate::core::state::ShellState;
use crate::output::OutputSink;
use crate::path::{resolve, Resolution};
use crate::process::ProcessExecutor;

/// What the loop does after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Runs input lines: chain splitting, substitution, lookup and execution.
pub struct Engine {
    pub state: ShellState,
    executor: ProcessExecutor,
    output: OutputSink,
}

impl Engine {
    pub fn new(state: ShellState, executor: ProcessExecutor, output: OutputSink) -> Self {
        Engine {
            state,
            executor,
            output,
        }
    }

    pub fn output(&mut self) -> &mut OutputSink {
        &mut self.output
    }

    /// Executes one input line. A malformed chain runs nothing and sets status 2.
    pub fn run_line(&mut self, line: &str) -> Flow {
        self.state.line_count += 1;

        let segments = match chain::split(line) {
            Ok(segments) => segments,
            Err(e) => {
                self.output.sync();
                self.state.report_line(&e);
                self.state.status = chain::ChainError::STATUS;
                return Flow::Continue;
            }
        };

        for segment in &segments {
            if let Flow::Exit(code) = self.run_segment(segment) {
                return Flow::Exit(code);
            }
        }
        Flow::Continue
    }

    fn run_segment(&mut self, segment: &ChainSegment) -> Flow {
        self.state.pending = segment.operator;
        if !segment.operator.allows(self.state.status) {
            log::debug!(
                "skipping '{}' after status {}",
                segment.text,
                self.state.status
            );
            return Flow::Continue;
        }

        let tokens = segment.tokens();
        let expansion = Expansion {
            env: &self.state.env,
            status: self.state.status,
            pid: process::id(),
        };
        let words = substitute(&tokens, &self.state.aliases, &expansion).into_owned();

        // Expanded to nothing: no command ran, status stays.
        let Some(name) = words.first() else {
            return Flow::Continue;
        };

        match resolve(name, &self.state.env) {
            Ok(Resolution::Builtin(builtin)) => self.run_builtin(builtin, &words),
            Ok(Resolution::External(program)) => {
                self.output.sync();
                match self
                    .executor
                    .spawn_process(&program, &words, &self.state.env)
                {
                    Ok(code) => self.state.status = code,
                    Err(e) => self.fail(name, &e, e.status()),
                }
                Flow::Continue
            }
            Err(e) => {
                self.fail(name, &e, e.status());
                Flow::Continue
            }
        }
    }

    fn run_builtin(&mut self, builtin: Builtin, words: &[String]) -> Flow {
        log::debug!("builtin {} {:?}", builtin.name(), &words[1..]);
        match builtin.execute(&mut self.state, &words[1..], &mut self.output) {
            Ok(BuiltinOutcome::Status(code)) => {
                self.state.status = code;
                Flow::Continue
            }
            Ok(BuiltinOutcome::Exit(code)) => {
                self.state.status = code;
                Flow::Exit(code)
            }
            Err(e) => {
                self.fail(builtin.name(), &e, e.status());
                Flow::Continue
            }
        }
    }

    fn fail(&mut self, command: &str, error: &dyn std::fmt::Display, status: i32) {
        self.output.sync();
        self.state.report(command, error);
        self.state.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::SharedBuffer;

    fn engine() -> (Engine, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let output = OutputSink::new(Box::new(buffer.clone()));
        let executor = ProcessExecutor::new(false).expect("executor");
        (
            Engine::new(ShellState::for_tests(), executor, output),
            buffer,
        )
    }

    fn run(engine: &mut Engine, line: &str) -> Flow {
        let flow = engine.run_line(line);
        engine.output().sync();
        flow
    }

    #[test]
    fn test_operators_gate_segments() {
        let (mut engine, _) = engine();

        run(&mut engine, "false && setenv A 1 ; setenv B 2");
        assert_eq!(engine.state.env.get("A"), None);
        assert_eq!(engine.state.env.get("B"), Some("2"));

        run(&mut engine, "false || setenv C 3");
        assert_eq!(engine.state.env.get("C"), Some("3"));

        run(&mut engine, "true || setenv D 4");
        assert_eq!(engine.state.env.get("D"), None);
        assert_eq!(engine.state.status, 0);
    }

    #[test]
    fn test_skipped_segment_keeps_status() {
        let (mut engine, _) = engine();

        run(&mut engine, "false && true || setenv E ran");
        assert_eq!(engine.state.env.get("E"), Some("ran"));
        assert_eq!(engine.state.pending, chain::ChainOperator::Or);
    }

    #[test]
    fn test_status_variable() {
        let (mut engine, _) = engine();

        run(&mut engine, "false ; setenv S $?");
        assert_eq!(engine.state.env.get("S"), Some("1"));

        run(&mut engine, "setenv FOO bar ; setenv COPY $FOO");
        assert_eq!(engine.state.env.get("COPY"), Some("bar"));
    }

    #[test]
    fn test_builtin_output_goes_to_sink() {
        let (mut engine, buffer) = engine();

        run(&mut engine, "alias greet=help ; greet cd");
        assert!(buffer.contents().starts_with("cd [DIR | -]"));
        assert_eq!(engine.state.status, 0);
    }

    #[test]
    fn test_exit_stops_the_line() {
        let (mut engine, _) = engine();

        assert_eq!(run(&mut engine, "true ; exit 3 ; setenv X 1"), Flow::Exit(3));
        assert_eq!(engine.state.env.get("X"), None);
        assert_eq!(engine.state.status, 3);
    }

    #[test]
    fn test_failures_set_status() {
        let (mut engine, _) = engine();

        run(&mut engine, "definitely-not-a-command-xyz");
        assert_eq!(engine.state.status, 127);

        run(&mut engine, "exit abc");
        assert_eq!(engine.state.status, 2);

        run(&mut engine, "setenv ONLY");
        assert_eq!(engine.state.status, 1);
    }

    #[test]
    fn test_syntax_error_runs_nothing() {
        let (mut engine, _) = engine();

        assert_eq!(run(&mut engine, "setenv A 1 && && setenv B 2"), Flow::Continue);
        assert_eq!(engine.state.status, 2);
        assert_eq!(engine.state.env.get("A"), None);

        run(&mut engine, "setenv A 1");
        assert_eq!(engine.state.env.get("A"), Some("1"));
        assert_eq!(engine.state.line_count, 2);
    }

    #[test]
    fn test_empty_expansion_is_a_no_op() {
        let (mut engine, _) = engine();

        run(&mut engine, "false ; $NOTHING_HERE");
        assert_eq!(engine.state.status, 1);

        run(&mut engine, "   ");
        assert_eq!(engine.state.status, 1);
    }
}
