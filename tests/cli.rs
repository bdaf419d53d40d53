//! End-to-end tests of the subcommand handlers.

use clap::Parser;
use fuzz_core::{Mode, Op, PRODUCER_INDEX};
use fuzz_generator::ReplaySequence;
use fuzz_script::parse_script;
use table_fuzzer::commands::{run_fuzz, run_generate, run_replay};
use table_fuzzer::{GenerateArgs, ReplayArgs, RunArgs};

#[derive(Parser)]
struct RunCli {
    #[command(flatten)]
    args: RunArgs,
}

#[derive(Parser)]
struct GenerateCli {
    #[command(flatten)]
    args: GenerateArgs,
}

#[derive(Parser)]
struct ReplayCli {
    #[command(flatten)]
    args: ReplayArgs,
}

fn argv<'a>(args: &'a [&'a str]) -> impl Iterator<Item = &'a str> {
    std::iter::once("table-fuzzer").chain(args.iter().copied())
}

fn run_args(args: &[&str]) -> RunArgs {
    RunCli::try_parse_from(argv(args)).unwrap().args
}

fn generate_args(args: &[&str]) -> GenerateArgs {
    GenerateCli::try_parse_from(argv(args)).unwrap().args
}

fn replay_args(args: &[&str]) -> ReplayArgs {
    ReplayCli::try_parse_from(argv(args)).unwrap().args
}

#[tokio::test]
async fn test_run_random_mode() {
    let report = run_fuzz(run_args(&[
        "--ops", "50", "--workers", "3", "--seed", "11", "--report", "none",
    ]))
    .await
    .unwrap();

    assert_eq!(report.mode, Mode::Random);
    assert_eq!(report.seed, 11);
    assert_eq!(report.workers.len(), 3);
    assert_eq!(report.total_executed, 150);
    assert_eq!(report.total_skipped, 0);
}

#[tokio::test]
async fn test_run_queue_mode_in_memory() {
    let report = run_fuzz(run_args(&[
        "--ops", "40", "--workers", "2", "--seed", "3", "--mode", "queue",
        "--queue-endpoint", "memory", "--report", "json", "--target", "null",
    ]))
    .await
    .unwrap();

    assert_eq!(report.mode, Mode::Queue);
    assert_eq!(report.total_executed, 40);
    assert_eq!(report.total_failed, 0);
}

#[tokio::test]
async fn test_run_rejects_bad_configuration() {
    let err = run_fuzz(run_args(&["--ops", "5", "--include", "nonexistent"]))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("No operations selected"));

    let err = run_fuzz(run_args(&["--ops", "5", "--mode", "burst"]))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Unknown --mode"));
}

#[tokio::test]
async fn test_generate_writes_script_matching_live_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scripts").join("replay.rs");
    let path_str = path.to_str().unwrap();

    let script = run_generate(generate_args(&[
        "--ops", "60", "--workers", "3", "--seed", "2024", "--keys", "4", "--output", path_str,
    ]))
    .await
    .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, script);
    assert!(written.contains("//! generated by: table-fuzzer generate --ops 60 --workers 3 --seed 2024"));
    assert!(written.contains("//! live run: table-fuzzer run --ops 60 --workers 3 --seed 2024"));

    let options = generate_args(&["--ops", "60", "--workers", "3", "--seed", "2024", "--keys", "4"])
        .generation
        .to_options()
        .unwrap();
    let parsed = parse_script(&written).unwrap();
    for worker in 0..3 {
        let live = ReplaySequence::new(&options.generation, 2024, worker, 60).build();
        assert_eq!(parsed.worker(worker), Some(live.as_slice()));
    }
}

#[tokio::test]
async fn test_generate_is_deterministic() {
    let args = ["--ops", "30", "--seed", "8", "--mode", "queue"];
    let first = run_generate(generate_args(&args)).await;
    let second = run_generate(generate_args(&args)).await;
    assert_eq!(first.unwrap(), second.unwrap());
}

#[tokio::test]
async fn test_generate_queue_mode_is_producer_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queue.rs");
    let args = ["--ops", "25", "--workers", "4", "--seed", "5", "--mode", "queue"];

    let mut with_output: Vec<&str> = args.to_vec();
    with_output.extend(["--output", path.to_str().unwrap()]);
    run_generate(generate_args(&with_output)).await.unwrap();

    let options = generate_args(&args).generation.to_options().unwrap();
    let parsed = parse_script(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let live = ReplaySequence::new(&options.generation, 5, PRODUCER_INDEX, 25).build();
    assert_eq!(parsed.sequences.len(), 1);
    assert_eq!(parsed.sequences[0].commands, live);
}

#[tokio::test]
async fn test_include_filter_reaches_script() {
    let script = run_generate(generate_args(&[
        "--ops", "200", "--seed", "1", "--include", "get,set",
    ]))
    .await
    .unwrap();

    let parsed = parse_script(&script).unwrap();
    assert_eq!(parsed.total_commands(), 200);
    assert!(parsed.sequences[0]
        .commands
        .iter()
        .all(|c| matches!(c.op(), Op::Get | Op::Set)));
}

#[tokio::test]
async fn test_replay_executes_generated_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replay.rs");
    let path_str = path.to_str().unwrap();

    run_generate(generate_args(&[
        "--ops", "20", "--workers", "2", "--seed", "77", "--output", path_str,
    ]))
    .await
    .unwrap();

    let report = run_replay(replay_args(&[path_str, "--report", "none"]))
        .await
        .unwrap();
    assert_eq!(report.seed, 77);
    assert_eq!(report.requested_workers, 2);
    assert_eq!(report.workers.len(), 2);
    assert_eq!(report.total_executed, 40);
}

#[tokio::test]
async fn test_replay_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.rs");
    std::fs::write(&path, "let _ = table.get(\"key:0\").await;\n").unwrap();

    let err = run_replay(replay_args(&[path.to_str().unwrap()]))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse script"));
}

#[tokio::test]
async fn test_replay_missing_file() {
    let err = run_replay(replay_args(&["/nonexistent/replay.rs"]))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read script"));
}
