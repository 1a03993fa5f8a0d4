//! Tests for the editing session and document import/export.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use yoshiki::prelude::*;

fn session_with_grid() -> (EditorSession, String, String) {
    let mut session = EditorSession::new("Signup");
    let grid = session.add_component(FieldKind::Grid, None).unwrap();
    let text = session.add_component(FieldKind::Text, Some(grid.as_str())).unwrap();
    (session, grid, text)
}

#[test]
fn test_malformed_import_leaves_state_untouched() {
    let (mut session, _, text) = session_with_grid();
    let before = session.components().to_vec();

    let err = session
        .import_json(r#"{"components": "not-an-array"}"#)
        .unwrap_err();
    assert!(err.to_string().starts_with("Import failed"));
    assert_eq!(session.components(), before.as_slice());
    assert_eq!(session.selected_id(), Some(text.as_str()));

    assert!(session.import_json("{ not json").is_err());
    assert!(session.import_json(r#"{"name": "x"}"#).is_err());
    assert_eq!(session.components(), before.as_slice());
}

#[test]
fn test_export_then_import_round_trips() {
    let (mut session, _, _) = session_with_grid();
    session.rename_form("Signup Form");
    let json = session.export_json().unwrap();

    let mut other = EditorSession::default();
    other.import_json(&json).unwrap();
    assert_eq!(other.form_name(), "Signup Form");
    assert_eq!(other.components(), session.components());
    assert_eq!(other.selected_id(), None);
    assert_eq!(session.document().export_file_name(), "signup-form.json");
}

#[test]
fn test_import_recomputes_parent_links() {
    let json = r#"{
        "name": "Imported",
        "components": [
            {
                "id": "grid_1",
                "type": "grid",
                "name": "grid1",
                "props": { "columns": 2 },
                "children": [
                    { "id": "text_1", "type": "text", "name": "text1", "props": {}, "parentId": "stale" }
                ]
            }
        ]
    }"#;
    let mut session = EditorSession::default();
    session.import_json(json).unwrap();

    let child = yoshiki::tree::find(session.components(), "text_1").unwrap();
    assert_eq!(child.parent_id.as_deref(), Some("grid_1"));
}

#[test]
fn test_move_and_select() {
    let mut session = EditorSession::default();
    let first = session.add_component(FieldKind::Text, None).unwrap();
    let second = session.add_component(FieldKind::Email, None).unwrap();

    session.move_component(1, 0, None);
    let ids: Vec<_> = session.components().iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, vec![second.clone(), first.clone()]);

    session.select(Some(first.as_str()));
    assert_eq!(session.selected().map(|n| n.name.as_str()), Some("text1"));
    session.select(Some("missing"));
    assert_eq!(session.selected_id(), None);
}

#[test]
fn test_generate_uses_form_name_and_switches_tab() {
    let mut session = EditorSession::with_document(FormDocument {
        components: create_email_form(),
        ..FormDocument::new("Contact")
    });
    let generated = session.generate().unwrap().clone();
    assert!(generated.schema.contains("export const ContactSchema"));
    assert_eq!(session.tab(), Tab::Code);
    assert_eq!(session.generated(), Some(&generated));

    session.clear();
    assert!(session.components().is_empty());
    assert!(matches!(session.generate(), Err(SessionError::EmptyForm)));
}

#[test]
fn test_update_component_through_session() {
    let (mut session, _, text) = session_with_grid();
    let node = session
        .selected()
        .cloned()
        .unwrap()
        .with_prop("label", "Nickname");
    session.update_component(node);

    let updated = yoshiki::tree::find(session.components(), &text).unwrap();
    assert_eq!(updated.label(), "Nickname");
}
