//! Emitted scripts carry exactly the sequences live workers execute.

use fuzz_core::{GenerationConfig, Mode, OpFilter, RunOptions, SeedSource, PRODUCER_INDEX};
use fuzz_generator::ReplaySequence;
use fuzz_script::{parse_script, ScriptEmitter};

fn options(mode: Mode, workers: u32, seed: u64) -> RunOptions {
    let ops = OpFilter::default().apply().unwrap();
    let generation = GenerationConfig::new(ops, 16, 3, 24, 4).unwrap();
    RunOptions::new(generation, 150, seed, SeedSource::Provided)
        .unwrap()
        .with_workers(workers)
        .with_mode(mode)
}

#[test]
fn test_random_mode_workers_match_live_sequences() {
    let opts = options(Mode::Random, 4, 0xDEAD_BEEF);
    let parsed = parse_script(&ScriptEmitter::new(&opts).emit()).unwrap();

    assert_eq!(parsed.sequences.len(), 4);
    assert_eq!(parsed.workers, Some(4));
    for worker in 0..4 {
        let live = ReplaySequence::new(&opts.generation, opts.seed, worker, opts.ops).build();
        assert_eq!(parsed.worker(worker), Some(live.as_slice()), "worker {worker}");
    }
}

#[test]
fn test_inline_random_matches_worker_zero() {
    let opts = options(Mode::Random, 0, 5);
    let parsed = parse_script(&ScriptEmitter::new(&opts).emit()).unwrap();

    assert!(!parsed.is_per_worker());
    let live = ReplaySequence::new(&opts.generation, 5, 0, opts.ops).build();
    assert_eq!(parsed.sequences[0].commands, live);
}

#[test]
fn test_queue_mode_matches_producer_sequence() {
    let opts = options(Mode::Queue, 6, u64::MAX);
    let parsed = parse_script(&ScriptEmitter::new(&opts).emit()).unwrap();

    assert_eq!(parsed.mode, Some(Mode::Queue));
    assert_eq!(parsed.sequences.len(), 1);
    let live = ReplaySequence::new(&opts.generation, opts.seed, PRODUCER_INDEX, opts.ops).build();
    assert_eq!(parsed.sequences[0].commands, live);
}

#[test]
fn test_emission_is_deterministic() {
    let opts = options(Mode::Random, 2, 77);
    let with_context = |opts: &RunOptions| {
        ScriptEmitter::new(opts)
            .with_context(["rerun: table-fuzzer generate --seed 77 --workers 2"])
            .emit()
    };
    assert_eq!(with_context(&opts), with_context(&opts));
}

#[test]
fn test_many_seeds_round_trip() {
    for seed in 0..25u64 {
        let opts = options(Mode::Random, 0, seed);
        let parsed = parse_script(&ScriptEmitter::new(&opts).emit()).unwrap();
        let live = ReplaySequence::new(&opts.generation, seed, 0, opts.ops).build();
        assert_eq!(parsed.sequences[0].commands, live, "seed {seed}");
    }
}
