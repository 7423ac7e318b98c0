use scriptwriter_rust::api::{export_to_fdx, export_to_pdf, export_to_txt, SimpleConf};
use scriptwriter_rust::editor::{EditingSession, MemoryStore};
use scriptwriter_rust::export::{export_script, ExportFormat};
use scriptwriter_rust::models::{Conf, Script};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

const SCRIPT: &str = "FADE IN:\n\nINT. OFFICE - DAY\n\nJOHN\n(smiling)\nHello there.\n\nCUT TO:";

#[tokio::test]
async fn pdf_export_writes_a_complete_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("office.pdf");
    let config = SimpleConf {
        print_title_page: true,
        title: "The Office".to_string(),
        author: "Jo Writer".to_string(),
        ..SimpleConf::default()
    };

    let result = export_to_pdf(SCRIPT.to_string(), path.to_string_lossy().to_string(), Some(config)).await;
    assert!(result.success, "{}", result.message);
    assert_eq!(result.file_path.as_deref(), Some(path.to_string_lossy().as_ref()));

    let bytes = fs::read(&path).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(text.contains("/Count 2"));
    assert!(text.contains("(THE OFFICE) Tj"));
    assert!(text.contains("(1. INT. OFFICE - DAY) Tj"));
    assert!(text.contains("(CUT TO:) Tj"));
}

#[tokio::test]
async fn failed_export_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("office.pdf");

    let result = export_to_pdf(SCRIPT.to_string(), path.to_string_lossy().to_string(), None).await;
    assert!(!result.success);
    assert!(result.file_path.is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn txt_and_fdx_exports() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("office.txt");
    let fdx = dir.path().join("office.fdx");

    let result = export_to_txt(SCRIPT.to_string(), txt.to_string_lossy().to_string(), None).await;
    assert!(result.success, "{}", result.message);
    assert_eq!(fs::read_to_string(&txt).unwrap(), SCRIPT);

    let result = export_to_fdx(SCRIPT.to_string(), fdx.to_string_lossy().to_string(), None).await;
    assert!(result.success, "{}", result.message);
    let xml = fs::read_to_string(&fdx).unwrap();
    assert!(xml.contains("<Paragraph Type=\"Transition\">\n      <Text>CUT TO:</Text>"));
    assert_eq!(xml.matches("<Paragraph ").count(), 6);
}

#[test]
fn auto_formatted_txt_is_indented() {
    let conf = Conf::default();
    let script = Script::from_text(&scriptwriter_rust::parser::format_script("int. lab - night\nANNA\nready", &conf.rules));
    let bytes = export_script(&script, ExportFormat::Txt, &conf).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "INT. LAB - NIGHT");
    assert_eq!(lines[1].trim(), "ANNA");
    assert!(lines[1].starts_with("    "));
}

#[tokio::test]
async fn autosave_is_debounced() {
    let store = Arc::new(MemoryStore::new());
    let mut conf = Conf::default();
    conf.autosave_debounce_ms = 40;
    let mut session = EditingSession::from_text("He waits.", &conf).with_store(store.clone());

    for i in 0..5 {
        session.replace_line(0, &format!("He waits {} times.", i));
        session.schedule_save();
    }
    assert!(session.has_pending_save());
    assert_eq!(store.save_count(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.latest().unwrap().content, "He waits 4 times.");
}

#[tokio::test]
async fn dropping_the_session_cancels_autosave() {
    let store = Arc::new(MemoryStore::new());
    let mut conf = Conf::default();
    conf.autosave_debounce_ms = 40;
    {
        let mut session = EditingSession::from_text("He waits.", &conf).with_store(store.clone());
        session.schedule_save();
    }
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(store.save_count(), 0);
}
