//! Replay script parsing.
//!
//! Reads back scripts written by [`ScriptEmitter`](crate::ScriptEmitter):
//! the header fields, the `// worker N sequence` markers and every
//! `let _ = table.<op>(..).await;` call. Anything else is ignored.

use crate::error::{LiteralError, ScriptError};
use crate::literal::Cursor;
use fuzz_core::{Command, Mode};

const CALL_PREFIX: &str = "let _ = table.";
const INLINE_FN: &str = "async fn replay(table: &dyn Table) {";

/// Commands recovered for one worker, or for the single inline sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSequence {
    pub worker: Option<u32>,
    pub commands: Vec<Command>,
}

/// A parsed replay script.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScript {
    pub seed: Option<u64>,
    pub mode: Option<Mode>,
    pub workers: Option<u32>,
    pub sequences: Vec<ScriptSequence>,
}

impl ParsedScript {
    /// Whether the script dispatches per worker.
    pub fn is_per_worker(&self) -> bool {
        self.sequences.iter().any(|s| s.worker.is_some())
    }

    pub fn total_commands(&self) -> usize {
        self.sequences.iter().map(|s| s.commands.len()).sum()
    }

    /// The sequence of `worker`, if the script has one.
    pub fn worker(&self, worker: u32) -> Option<&[Command]> {
        self.sequences
            .iter()
            .find(|s| s.worker == Some(worker))
            .map(|s| s.commands.as_slice())
    }
}

/// Parse a replay script.
pub fn parse_script(src: &str) -> Result<ParsedScript, ScriptError> {
    let mut script = ParsedScript {
        seed: None,
        mode: None,
        workers: None,
        sequences: Vec::new(),
    };

    for (index, raw) in src.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if let Some(field) = line.strip_prefix("//! ") {
            parse_header(&mut script, field, line_no)?;
        } else if let Some(worker) = worker_marker(line) {
            let worker = worker.parse().map_err(|_| ScriptError::InvalidHeader {
                line: line_no,
                field: "worker",
                value: worker.to_string(),
            })?;
            script.sequences.push(ScriptSequence {
                worker: Some(worker),
                commands: Vec::new(),
            });
        } else if line == INLINE_FN {
            script.sequences.push(ScriptSequence {
                worker: None,
                commands: Vec::new(),
            });
        } else if line.starts_with(CALL_PREFIX) {
            let command = parse_call(line)
                .map_err(|source| ScriptError::Literal {
                    line: line_no,
                    source,
                })?
                .ok_or_else(|| ScriptError::UnknownMethod {
                    line: line_no,
                    method: method_name(line).to_string(),
                })?;
            if script.sequences.is_empty() {
                script.sequences.push(ScriptSequence {
                    worker: None,
                    commands: Vec::new(),
                });
            }
            if let Some(current) = script.sequences.last_mut() {
                current.commands.push(command);
            }
        }
    }

    if script.total_commands() == 0 {
        return Err(ScriptError::Empty);
    }
    Ok(script)
}

fn parse_header(script: &mut ParsedScript, field: &str, line: usize) -> Result<(), ScriptError> {
    let Some((name, value)) = field.split_once(": ") else {
        return Ok(());
    };
    let value = value.trim();
    let invalid = |field: &'static str| ScriptError::InvalidHeader {
        line,
        field,
        value: value.to_string(),
    };

    match name {
        "seed" => {
            let number = value.split_whitespace().next().unwrap_or_default();
            script.seed = Some(number.parse().map_err(|_| invalid("seed"))?);
        }
        "mode" => script.mode = Some(value.parse().map_err(|_| invalid("mode"))?),
        "workers" => script.workers = Some(value.parse().map_err(|_| invalid("workers"))?),
        _ => {}
    }
    Ok(())
}

fn worker_marker(line: &str) -> Option<&str> {
    line.strip_prefix("// worker ")?.strip_suffix(" sequence")
}

fn method_name(line: &str) -> &str {
    let rest = line.strip_prefix(CALL_PREFIX).unwrap_or(line);
    rest.split('(').next().unwrap_or(rest)
}

/// Parse one call line. `Ok(None)` means the method is not a table operation.
pub fn parse_call(line: &str) -> Result<Option<Command>, LiteralError> {
    let mut c = Cursor::new(line);
    c.expect(CALL_PREFIX)?;
    let method = c.ident();
    c.expect("(")?;

    let command = match method {
        "get" => {
            let (key, namespace) = key_namespace(&mut c)?;
            Command::Get { key, namespace }
        }
        "set" => {
            let key = c.string()?;
            c.expect(",")?;
            let value = c.value()?;
            c.expect(",")?;
            let expire = if c.eat("None") {
                None
            } else {
                c.expect("Some(")?;
                let secs = c.uint()?;
                c.expect(")")?;
                Some(secs)
            };
            c.expect(",")?;
            let namespace = c.string()?;
            Command::Set {
                key,
                value,
                expire,
                namespace,
            }
        }
        "exists" => {
            let (key, namespace) = key_namespace(&mut c)?;
            Command::Exists { key, namespace }
        }
        "delete" => {
            let (key, namespace) = key_namespace(&mut c)?;
            Command::Delete { key, namespace }
        }
        "ttl" => {
            let (key, namespace) = key_namespace(&mut c)?;
            Command::Ttl { key, namespace }
        }
        "count" => Command::Count {
            namespace: c.string()?,
        },
        "clear" => Command::Clear {
            namespace: c.string()?,
        },
        "namespaces" => Command::Namespaces,
        "clear_all" => Command::ClearAll,
        _ => return Ok(None),
    };

    c.expect(")")?;
    c.expect(".await")?;
    c.expect(";")?;
    c.finish()?;
    Ok(Some(command))
}

fn key_namespace(c: &mut Cursor<'_>) -> Result<(String, String), LiteralError> {
    let key = c.string()?;
    c.expect(",")?;
    let namespace = c.string()?;
    Ok((key, namespace))
}
