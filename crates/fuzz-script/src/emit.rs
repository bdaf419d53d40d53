//! Replay script emission.

use crate::literal::{encode_str, encode_value};
use fuzz_core::{Command, Mode, RunOptions, PRODUCER_INDEX};
use fuzz_generator::ReplaySequence;
use std::fmt::Write;
use tracing::debug;

/// Render a command as the table call the script makes.
pub fn encode_call(command: &Command) -> String {
    match command {
        Command::Get { key, namespace } => call("get", &[encode_str(key), encode_str(namespace)]),
        Command::Set {
            key,
            value,
            expire,
            namespace,
        } => call(
            "set",
            &[
                encode_str(key),
                encode_value(value),
                match expire {
                    Some(secs) => format!("Some({secs})"),
                    None => "None".to_string(),
                },
                encode_str(namespace),
            ],
        ),
        Command::Exists { key, namespace } => {
            call("exists", &[encode_str(key), encode_str(namespace)])
        }
        Command::Delete { key, namespace } => {
            call("delete", &[encode_str(key), encode_str(namespace)])
        }
        Command::Ttl { key, namespace } => call("ttl", &[encode_str(key), encode_str(namespace)]),
        Command::Count { namespace } => call("count", &[encode_str(namespace)]),
        Command::Clear { namespace } => call("clear", &[encode_str(namespace)]),
        Command::Namespaces => call("namespaces", &[]),
        Command::ClearAll => call("clear_all", &[]),
    }
}

fn call(method: &str, args: &[String]) -> String {
    format!("let _ = table.{method}({}).await;", args.join(", "))
}

/// Renders the commands a run would execute as a standalone Rust program.
///
/// Random mode with workers emits one `match` arm per worker and a `main`
/// that runs every worker as its own task. Inline runs and queue mode emit
/// a single flat sequence, since the queue order is fixed by the producer.
#[derive(Debug, Clone)]
pub struct ScriptEmitter<'a> {
    options: &'a RunOptions,
    context: Vec<String>,
}

impl<'a> ScriptEmitter<'a> {
    pub fn new(options: &'a RunOptions) -> Self {
        Self {
            options,
            context: Vec::new(),
        }
    }

    /// Free-form lines written at the top of the header, such as the
    /// command line that reproduces the run.
    pub fn with_context<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Whether the script dispatches on a worker index.
    pub fn is_per_worker(&self) -> bool {
        self.options.mode == Mode::Random && self.options.workers > 0
    }

    /// The sequences the script contains, with their worker index when the
    /// script dispatches per worker.
    pub fn sequences(&self) -> Vec<(Option<u32>, ReplaySequence<'a>)> {
        let o = self.options;
        match o.mode {
            Mode::Random if o.workers > 0 => (0..o.workers)
                .map(|w| (Some(w), ReplaySequence::new(&o.generation, o.seed, w, o.ops)))
                .collect(),
            Mode::Random => vec![(None, ReplaySequence::new(&o.generation, o.seed, 0, o.ops))],
            Mode::Queue => vec![(
                None,
                ReplaySequence::new(&o.generation, o.seed, PRODUCER_INDEX, o.ops),
            )],
        }
    }

    /// Render the whole script.
    pub fn emit(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write(&mut out);
        out
    }

    /// Render the whole script into `out`.
    pub fn write<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        debug!(
            mode = %self.options.mode,
            workers = self.options.workers,
            ops = self.options.ops,
            "Emitting replay script"
        );
        self.write_header(out)?;
        writeln!(out)?;
        writeln!(out, "use fuzz_core::{{FieldMap, Scalar, Value}};")?;
        writeln!(out, "use fuzz_target::{{MemoryTable, Table}};")?;
        if self.is_per_worker() {
            writeln!(out, "use std::sync::Arc;")?;
            writeln!(out, "use tokio::task::JoinSet;")?;
        }
        writeln!(out)?;

        if self.is_per_worker() {
            self.write_workers(out)
        } else {
            self.write_inline(out)
        }
    }

    fn write_header<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        let o = self.options;
        writeln!(out, "//! Replay script generated by table-fuzzer.")?;
        writeln!(out, "//!")?;
        for line in &self.context {
            writeln!(out, "//! {line}")?;
        }
        if !self.context.is_empty() {
            writeln!(out, "//!")?;
        }
        writeln!(out, "//! seed: {} ({})", o.seed, o.seed_source)?;
        writeln!(out, "//! mode: {}", o.mode)?;
        writeln!(out, "//! workers: {}", o.workers)?;
        writeln!(out, "//! ops: {}", o.ops)?;
        writeln!(out, "//! keys: {}", o.generation.key_space())?;
        writeln!(out, "//! namespaces: {}", o.generation.namespaces())?;
        writeln!(out, "//! max-string-len: {}", o.generation.max_string_len())?;
        writeln!(out, "//! max-fields: {}", o.generation.max_fields())?;
        let ops: Vec<&str> = o.generation.ops().iter().map(|op| op.as_str()).collect();
        writeln!(out, "//! operations: {}", ops.join(","))?;
        if o.mode == Mode::Queue {
            writeln!(out, "//! queue: {}", o.queue_key())?;
        }
        Ok(())
    }

    fn write_workers<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        writeln!(out, "async fn work(worker: u32, table: &dyn Table) {{")?;
        writeln!(out, "    match worker {{")?;
        for (worker, sequence) in self.sequences() {
            let worker = worker.unwrap_or_default();
            writeln!(out, "        // worker {worker} sequence")?;
            writeln!(out, "        {worker} => {{")?;
            for command in &sequence {
                writeln!(out, "            {}", encode_call(&command))?;
            }
            writeln!(out, "        }}")?;
        }
        writeln!(out, "        _ => {{}}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "#[tokio::main]")?;
        writeln!(out, "async fn main() {{")?;
        writeln!(out, "    let table: Arc<dyn Table> = Arc::new(MemoryTable::new());")?;
        writeln!(out, "    let mut workers = JoinSet::new();")?;
        writeln!(out, "    for worker in 0..{}u32 {{", self.options.workers)?;
        writeln!(out, "        let table = Arc::clone(&table);")?;
        writeln!(out, "        workers.spawn(async move {{ work(worker, &*table).await }});")?;
        writeln!(out, "    }}")?;
        writeln!(out, "    while workers.join_next().await.is_some() {{}}")?;
        writeln!(out, "}}")
    }

    fn write_inline<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        writeln!(out, "async fn replay(table: &dyn Table) {{")?;
        for (_, sequence) in self.sequences() {
            for command in &sequence {
                writeln!(out, "    {}", encode_call(&command))?;
            }
        }
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "#[tokio::main]")?;
        writeln!(out, "async fn main() {{")?;
        writeln!(out, "    let table = MemoryTable::new();")?;
        writeln!(out, "    replay(&table).await;")?;
        writeln!(out, "}}")
    }
}
