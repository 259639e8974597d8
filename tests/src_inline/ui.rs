use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Command, parse_command, run_with_io};
use crate::catalog::{Condition, Sample};
use crate::session::{RatingInput, Session};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("reverbeval_ui_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample(i: usize) -> Sample {
    Sample {
        id: format!("small_room_{i}_generated"),
        category: "small".to_string(),
        condition: Condition::Generated,
        text_prompt: format!("test prompt {i}"),
        dry_audio: PathBuf::from(format!("small/room_{i}/anechoic.wav")),
        wet_audio: PathBuf::from(format!("small/room_{i}/generated_reverb.wav")),
    }
}

fn session_of(n: usize) -> Session {
    let catalog: Vec<Sample> = (0..n).map(sample).collect();
    let order: Vec<usize> = (0..n).collect();
    Session::new(catalog, order)
}

fn drive(session: &mut Session, script: &str) -> (Option<super::SavedRecord>, String) {
    let results_dir = make_temp_dir();
    let mut input = Cursor::new(script.as_bytes());
    let mut out = Vec::new();
    let saved = run_with_io(session, &results_dir, &mut input, &mut out).unwrap();
    (saved, String::from_utf8(out).unwrap())
}

#[test]
fn test_scripted_session_persists_scores() {
    let mut session = session_of(2);
    let (saved, out) = drive(&mut session, "4 5\n2 3\n");

    let saved = saved.unwrap();
    assert!(out.contains(&format!("Reference ID: {}", saved.reference)));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&saved.path).unwrap()).unwrap();
    assert_eq!(value["ratings"]["small_room_0_generated"]["quality"], 4);
    assert_eq!(value["ratings"]["small_room_0_generated"]["match"], 5);
    assert_eq!(value["ratings"]["small_room_1_generated"]["quality"], 2);
}

#[test]
fn test_empty_catalog_completes_with_empty_record() {
    let mut session = session_of(0);
    let (saved, out) = drive(&mut session, "");

    let saved = saved.unwrap();
    assert!(out.contains("Evaluation complete"));
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&saved.path).unwrap()).unwrap();
    assert_eq!(value["ratings"], serde_json::json!({}));
}

#[test]
fn test_rejected_scores_reprompt() {
    let mut session = session_of(1);
    let (saved, out) = drive(&mut session, "6 6\n4 4\n");

    assert!(out.contains("rating scores must be integers"));
    let saved = saved.unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&saved.path).unwrap()).unwrap();
    assert_eq!(value["ratings"]["small_room_0_generated"]["quality"], 4);
}

#[test]
fn test_blank_line_advances_with_shown_scores() {
    let mut session = session_of(1);
    let (saved, _) = drive(&mut session, "\n");

    let saved = saved.unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&saved.path).unwrap()).unwrap();
    // Never-rated items show the neutral midpoint.
    assert_eq!(value["ratings"]["small_room_0_generated"]["quality"], 3);
    assert_eq!(value["ratings"]["small_room_0_generated"]["match"], 3);
}

#[test]
fn test_retreat_at_first_item_is_disabled() {
    let mut session = session_of(1);
    let (saved, out) = drive(&mut session, "p\n5 5\n");

    assert!(out.contains("already at the first item"));
    assert!(saved.is_some());
}

#[test]
fn test_eof_mid_session_saves_nothing() {
    let mut session = session_of(2);
    let (saved, out) = drive(&mut session, "4 4\n");

    assert!(saved.is_none());
    assert!(out.contains("nothing was saved"));
    assert!(!session.is_complete());
    // Ratings committed so far stay in memory.
    assert_eq!(session.ratings().len(), 1);
}

#[test]
fn test_parse_command_variants() {
    let shown = RatingInput {
        quality: 3,
        text_match: 3,
    };
    assert!(matches!(
        parse_command("4 5", shown),
        Ok(Command::Advance(RatingInput {
            quality: 4,
            text_match: 5
        }))
    ));
    assert!(matches!(
        parse_command("", shown),
        Ok(Command::Advance(s)) if s == shown
    ));
    assert!(matches!(
        parse_command("p", shown),
        Ok(Command::Retreat(s)) if s == shown
    ));
    assert!(matches!(
        parse_command("p 1 2", shown),
        Ok(Command::Retreat(RatingInput {
            quality: 1,
            text_match: 2
        }))
    ));
    assert!(parse_command("4", shown).is_err());
    assert!(parse_command("four five", shown).is_err());
    assert!(parse_command("1 2 3", shown).is_err());
}
