mod common;

use common::RecordingBridge;
use seqwalk_core::{PlotSession, RawSettings, RunOutcome, WalkError};
use std::io::Write;
use tempfile::NamedTempFile;

fn fasta_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.as_file().sync_all().unwrap();
    file
}

fn settings_for(file: &NamedTempFile) -> RawSettings {
    RawSettings {
        input: Some(file.path().to_path_buf()),
        chunk_size_bytes: Some(8),
        ..Default::default()
    }
}

#[test]
fn missing_input_aborts_before_rendering() {
    let mut session = PlotSession::new();
    let mut bridge = RecordingBridge::default();
    let err = session
        .run(&RawSettings::default(), &mut bridge, |_| true, |_| {})
        .unwrap_err();

    assert!(matches!(err, WalkError::MissingInput));
    assert!(bridge.inits.is_empty());
    assert!(session.previous().is_none());
}

#[test]
fn first_run_never_asks_for_confirmation() {
    let file = fasta_file(">x\nACGTACGT\n");
    let mut session = PlotSession::new();
    let mut bridge = RecordingBridge::default();

    let outcome = session
        .run(&settings_for(&file), &mut bridge, |_| panic!("should not prompt"), |_| {})
        .unwrap();
    match outcome {
        RunOutcome::Completed(summary) => assert_eq!(summary.points(), 8),
        RunOutcome::Declined => panic!("first run declined"),
    }
    assert!(session.previous().is_some());
}

#[test]
fn declining_unchanged_rerun_leaves_plot_untouched() {
    let file = fasta_file(">x\nACGTACGT\n");
    let raw = settings_for(&file);
    let mut session = PlotSession::new();
    let mut bridge = RecordingBridge::default();

    session.run(&raw, &mut bridge, |_| true, |_| {}).unwrap();
    let x_before = bridge.x.clone();
    let revisions_before = bridge.revisions.clone();

    let mut asked = false;
    let outcome = session
        .run(&raw, &mut bridge, |_| { asked = true; false }, |_| {})
        .unwrap();

    assert!(asked);
    assert!(matches!(outcome, RunOutcome::Declined));
    assert_eq!(bridge.x, x_before);
    assert_eq!(bridge.revisions, revisions_before);
    assert_eq!(bridge.inits.len(), 1);
}

#[test]
fn confirming_unchanged_rerun_draws_again() {
    let file = fasta_file("ACGT\n");
    let raw = settings_for(&file);
    let mut session = PlotSession::new();
    let mut bridge = RecordingBridge::default();

    session.run(&raw, &mut bridge, |_| true, |_| {}).unwrap();
    let outcome = session.run(&raw, &mut bridge, |_| true, |_| {}).unwrap();

    assert!(matches!(outcome, RunOutcome::Completed(_)));
    assert_eq!(bridge.inits.len(), 2);
}

#[test]
fn changed_settings_skip_the_prompt() {
    let file = fasta_file("ACGT\n");
    let mut raw = settings_for(&file);
    let mut session = PlotSession::new();
    let mut bridge = RecordingBridge::default();

    session.run(&raw, &mut bridge, |_| true, |_| {}).unwrap();
    raw.set("offset", "2").unwrap();
    let outcome = session
        .run(&raw, &mut bridge, |_| panic!("settings changed, no prompt expected"), |_| {})
        .unwrap();

    match outcome {
        RunOutcome::Completed(summary) => assert_eq!(summary.points(), 2),
        RunOutcome::Declined => panic!("run declined"),
    }
}
