use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::config::Config;

use super::output;
use super::shell_context::{CliError, CliMode, LoopControl, ShellContext};

const KIND_WORDS: [&str; 2] = ["income", "expense"];

/// Runs the shell; script mode is selected by setting `FINPLAN_CLI_SCRIPT`.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("FINPLAN_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => {
            colored::control::set_override(false);
            for line in io::stdin().lock().lines() {
                if run_line(&mut context, &line?) == LoopControl::Exit {
                    break;
                }
            }
            Ok(())
        }
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper {
        commands: context.command_names(),
    }));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Personal finance planner. Type `help` for commands.");
    loop {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.trim()).ok();
        }
        if run_line(context, &line) == LoopControl::Exit {
            return Ok(());
        }
    }
}

/// Runs one line; command failures are reported and never end the session.
fn run_line(context: &mut ShellContext, line: &str) -> LoopControl {
    if !context.running {
        return LoopControl::Exit;
    }
    match context.process_line(line) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

/// Completes command names, transaction kinds, and config fields.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn candidates(&self, preceding: &[String]) -> Vec<&'static str> {
        let words: Vec<&str> = preceding.iter().map(String::as_str).collect();
        match words.as_slice() {
            [] => self.commands.clone(),
            ["add" | "categories" | "breakdown"] => KIND_WORDS.to_vec(),
            ["config"] => vec!["set"],
            ["config", "set"] => Config::FIELDS.to_vec(),
            _ => Vec::new(),
        }
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let preceding: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .candidates(&preceding)
            .into_iter()
            .filter(|word| word.starts_with(&needle))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}
