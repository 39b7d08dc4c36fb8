use std::path::PathBuf;

use sumi_types::{AppEvent, DropPayload, LanguageCode};

use crate::io::parse_command;

#[test]
fn open_takes_the_rest_of_the_line_as_path() {
    match parse_command("open /tmp/some scan.png") {
        Some(AppEvent::OpenImage(path)) => assert_eq!(path, PathBuf::from("/tmp/some scan.png")),
        other => panic!("unexpected parse: {other:?}"),
    }
}

#[test]
fn open_without_a_path_is_rejected() {
    assert!(parse_command("open").is_none());
    assert!(parse_command("open   ").is_none());
}

#[test]
fn drop_collects_a_path_list() {
    match parse_command("drop /a.png /b.png") {
        Some(AppEvent::DropImage(DropPayload::Paths(paths))) => {
            assert_eq!(paths, vec![PathBuf::from("/a.png"), PathBuf::from("/b.png")]);
        }
        other => panic!("unexpected parse: {other:?}"),
    }
}

#[test]
fn lang_requires_a_supported_code() {
    assert!(matches!(
        parse_command("lang ja"),
        Some(AppEvent::ChangeLanguage(LanguageCode::Ja))
    ));
    assert!(parse_command("lang xx").is_none());
    assert!(parse_command("lang").is_none());
}

#[test]
fn copy_with_and_without_selection() {
    assert!(matches!(
        parse_command("copy"),
        Some(AppEvent::CopyText { selection: None })
    ));
    match parse_command("copy just this part") {
        Some(AppEvent::CopyText {
            selection: Some(text),
        }) => assert_eq!(text, "just this part"),
        other => panic!("unexpected parse: {other:?}"),
    }
}

#[test]
fn bare_commands_parse() {
    assert!(matches!(parse_command("paste"), Some(AppEvent::PasteClipboard)));
    assert!(matches!(parse_command("recognize"), Some(AppEvent::Recognize)));
    assert!(matches!(parse_command("info"), Some(AppEvent::ShowInfo)));
    assert!(matches!(parse_command("quit"), Some(AppEvent::Shutdown)));
    assert!(matches!(parse_command("exit"), Some(AppEvent::Shutdown)));
    assert!(matches!(parse_command("  recognize  "), Some(AppEvent::Recognize)));
}

#[test]
fn noise_is_ignored() {
    assert!(parse_command("").is_none());
    assert!(parse_command("frobnicate").is_none());
}
