//! Command generator producing one structured command per draw.

use crate::generators::generate_value;
use crate::stream::RandomStream;
use fuzz_core::{Command, GenerationConfig, Op};

/// Inclusive bounds of a generated expiry in seconds.
pub const EXPIRE_RANGE: (i64, i64) = (1, 300);

/// Generate one command from the stream.
///
/// Draws, in order: the operation; the key (keyed operations); for `set`
/// the value and then the expiry; finally the namespace unless the
/// operation is global.
pub fn generate_command(config: &GenerationConfig, stream: &mut RandomStream) -> Command {
    let ops = config.ops();
    let op = ops[stream.next_choice(ops.len())];

    // Struct fields are evaluated in source order, which fixes the draw order.
    match op {
        Op::Get => Command::Get {
            key: pick_key(config, stream),
            namespace: pick_namespace(config, stream),
        },
        Op::Set => Command::Set {
            key: pick_key(config, stream),
            value: generate_value(stream, config.max_string_len(), config.max_fields()),
            expire: pick_expire(stream),
            namespace: pick_namespace(config, stream),
        },
        Op::Exists => Command::Exists {
            key: pick_key(config, stream),
            namespace: pick_namespace(config, stream),
        },
        Op::Delete => Command::Delete {
            key: pick_key(config, stream),
            namespace: pick_namespace(config, stream),
        },
        Op::Ttl => Command::Ttl {
            key: pick_key(config, stream),
            namespace: pick_namespace(config, stream),
        },
        Op::Count => Command::Count {
            namespace: pick_namespace(config, stream),
        },
        Op::Clear => Command::Clear {
            namespace: pick_namespace(config, stream),
        },
        Op::Namespaces => Command::Namespaces,
        Op::ClearAll => Command::ClearAll,
    }
}

fn pick_key(config: &GenerationConfig, stream: &mut RandomStream) -> String {
    format!("key:{}", stream.next_choice(config.key_space() as usize))
}

fn pick_namespace(config: &GenerationConfig, stream: &mut RandomStream) -> String {
    format!("namespace:{}", stream.next_choice(config.namespaces() as usize))
}

/// No expiry with probability 1/3, otherwise a uniform draw from [`EXPIRE_RANGE`].
fn pick_expire(stream: &mut RandomStream) -> Option<u32> {
    if stream.next_int(0, 2) == 0 {
        return None;
    }
    Some(stream.next_int(EXPIRE_RANGE.0, EXPIRE_RANGE.1) as u32)
}

/// Command generator that owns its stream.
///
/// Each worker owns one generator; nothing is shared between instances.
pub struct CommandGenerator {
    /// Generation parameters
    config: GenerationConfig,
    /// Seeded stream for reproducibility
    stream: RandomStream,
    /// Number of commands generated so far
    index: u64,
}

impl CommandGenerator {
    pub fn new(config: GenerationConfig, seed: u64) -> Self {
        Self {
            config,
            stream: RandomStream::new(seed),
            index: 0,
        }
    }

    /// Number of commands generated so far.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    pub fn next_command(&mut self) -> Command {
        self.index += 1;
        generate_command(&self.config, &mut self.stream)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

impl Iterator for CommandGenerator {
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_command())
    }
}
