use scriptwriter_rust::editor::{format_line_at_cursor, EditingSession, MemoryStore};
use scriptwriter_rust::models::{Conf, ElementType, FormattingRuleTable, Script};
use scriptwriter_rust::parser::{add_scene_numbers, classify_text, extract_scenes, format, generate_html};
use std::sync::Arc;

use ElementType::*;

const OFFICE: &str = "INT. OFFICE - DAY\nJOHN\nHello there.\n";

#[test]
fn office_scene_is_classified() {
    let types = classify_text(OFFICE);
    assert_eq!(types[..3], [SceneHeading, Character, Dialogue]);
    // 结尾换行产生的空行
    assert_eq!(types[3], Action);
}

#[test]
fn lowercase_cut_to_is_a_transition() {
    let types = classify_text("He leaves.\n\ncut to:");
    assert_eq!(types[2], Transition);
    assert_eq!(format("cut to:", Transition, FormattingRuleTable::standard()).text, "CUT TO:");
}

#[test]
fn wrapped_parenthetical_is_left_alone() {
    assert_eq!(classify_text("(smiling)"), vec![Parenthetical]);
    assert_eq!(format("(smiling)", Parenthetical, FormattingRuleTable::standard()).text, "(smiling)");
}

#[test]
fn empty_line_is_action_and_formats_to_nothing() {
    assert_eq!(classify_text(""), vec![Action]);
    let line = format("", Action, FormattingRuleTable::standard());
    assert_eq!(line.text, "");
    assert_eq!(line.to_plain_text(), "");
}

#[test]
fn trailing_all_caps_line_is_not_a_character() {
    let types = classify_text("He turns.\n\nTHE END");
    assert_eq!(types[2], Action);
}

#[test]
fn full_scene_round_trip_through_session() {
    let text = "fade in:\n\nint. kitchen - night\n\nMARY\n(quietly)\nWhere were you?\n\nJOHN\nOut.\n\nclose up on the clock\n\ncut to:\n\next. street - night\n\nRain.";
    let mut session = EditingSession::from_text(text, &Conf::default());
    session.auto_format();

    let lines = session.lines();
    assert_eq!(lines[0].text, "FADE IN:");
    assert_eq!(lines[2].text, "INT. KITCHEN - NIGHT");
    assert_eq!(lines[4].element_type, Character);
    assert_eq!(lines[5].element_type, Parenthetical);
    assert_eq!(lines[9].element_type, Dialogue);
    assert_eq!(lines[11].text, "CLOSE UP ON THE CLOCK");
    assert_eq!(lines[11].element_type, Shot);
    assert_eq!(lines[13].text, "CUT TO:");
    assert_eq!(lines[13].element_type, Transition);

    session.add_scene_numbers();
    let scenes = session.scenes();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].location, "KITCHEN");
    assert_eq!(scenes[1].time_of_day, "NIGHT");
    assert!(scenes[1].exterior);
    assert_eq!(session.lines()[15].text, "2. EXT. STREET - NIGHT");
}

#[test]
fn scene_numbers_are_not_doubled() {
    let once = add_scene_numbers("INT. A - DAY\n\nEXT. B - NIGHT");
    let twice = add_scene_numbers(&once);
    assert_eq!(once, twice);
    assert!(!twice.contains("2. 1."));
    assert_eq!(extract_scenes(&twice.split('\n').collect::<Vec<_>>()).len(), 2);
}

#[test]
fn cursor_formatting_matches_line_formatter() {
    let buffer = "INT. OFFICE - DAY\nmary\nHi.";
    let edit = format_line_at_cursor(buffer, 19, Character, FormattingRuleTable::standard());
    let expected = format("mary", Character, FormattingRuleTable::standard()).to_plain_text();
    assert_eq!(edit.text.split('\n').nth(1), Some(expected.as_str()));
}

#[test]
fn preview_uses_the_same_classification() {
    let html = generate_html(&Script::from_text(OFFICE), FormattingRuleTable::standard());
    assert!(html.contains("class=\"scene-heading\""));
    assert!(html.contains("class=\"character\""));
    assert!(html.contains("class=\"dialogue\""));
}

#[test]
fn session_flush_reports_stats() {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditingSession::from_text(OFFICE, &Conf::default()).with_store(store.clone());
    session.flush().unwrap();

    let saved = store.latest().unwrap();
    assert_eq!(saved.content, OFFICE);
    assert_eq!(saved.stats.word_count, 7);
    assert_eq!(saved.stats.page_count, 1);
}
