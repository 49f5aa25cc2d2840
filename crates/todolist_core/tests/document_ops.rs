use std::collections::HashSet;
use todolist_core::{Document, SequentialIds, TimestampIds, ValidationError};

fn document_with_lists(ids: &mut SequentialIds, names: &[&str]) -> Document {
    names.iter().fold(Document::new(), |document, name| {
        document.add_list(ids, name).unwrap()
    })
}

#[test]
fn groceries_scenario_runs_end_to_end() {
    let mut ids = SequentialIds::new(1);
    let document = Document::new();
    assert!(document.lists().is_empty());
    assert_eq!(document.active_list_id(), None);

    let document = document.add_list(&mut ids, "Groceries").unwrap();
    assert_eq!(document.lists().len(), 1);
    let groceries = &document.lists()[0];
    assert_eq!(groceries.name, "Groceries");
    assert_eq!(document.active_list_id(), Some(groceries.id));
    let groceries_id = groceries.id;

    let document = document.add_todo(&mut ids, groceries_id, "Milk").unwrap();
    let todos = &document.list(groceries_id).unwrap().todos;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "Milk");
    assert!(!todos[0].completed);
    let milk_id = todos[0].id;

    let document = document.toggle_todo(groceries_id, milk_id);
    assert!(document.list(groceries_id).unwrap().todos[0].completed);

    let document = document.delete_list(groceries_id);
    assert!(document.lists().is_empty());
    assert_eq!(document.active_list_id(), None);
}

#[test]
fn deleting_active_list_selects_first_remaining() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A", "B"]);
    let a_id = document.lists()[0].id;
    let b_id = document.lists()[1].id;

    let document = document.select_list(a_id);
    assert_eq!(document.active_list_id(), Some(a_id));

    let document = document.delete_list(a_id);
    assert_eq!(document.active_list_id(), Some(b_id));
}

#[test]
fn deleting_inactive_list_keeps_selection() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A", "B", "C"]);
    let a_id = document.lists()[0].id;
    let c_id = document.lists()[2].id;
    assert_eq!(document.active_list_id(), Some(c_id));

    let document = document.delete_list(a_id);
    assert_eq!(document.active_list_id(), Some(c_id));
    assert_eq!(document.lists().len(), 2);
}

#[test]
fn new_list_always_becomes_active() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A", "B"]);
    let a_id = document.lists()[0].id;
    let document = document.select_list(a_id);

    let document = document.add_list(&mut ids, "  Trip  ").unwrap();
    let newest = document.lists().last().unwrap();
    assert_eq!(newest.name, "Trip");
    assert_eq!(document.active_list_id(), Some(newest.id));
}

#[test]
fn toggle_twice_restores_document() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A"]);
    let list_id = document.lists()[0].id;
    let document = document.add_todo(&mut ids, list_id, "one").unwrap();
    let document = document.add_todo(&mut ids, list_id, "two").unwrap();

    for todo in &document.list(list_id).unwrap().todos {
        let round_trip = document
            .toggle_todo(list_id, todo.id)
            .toggle_todo(list_id, todo.id);
        assert_eq!(round_trip, document);
    }
}

#[test]
fn blank_input_is_rejected_without_state_change() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A"]);
    let list_id = document.lists()[0].id;

    assert_eq!(
        document.add_list(&mut ids, "").unwrap_err(),
        ValidationError::BlankListName
    );
    assert_eq!(
        document.add_list(&mut ids, "   ").unwrap_err(),
        ValidationError::BlankListName
    );
    assert_eq!(
        document.add_todo(&mut ids, list_id, "").unwrap_err(),
        ValidationError::BlankTodoText
    );
    assert_eq!(
        document.add_todo(&mut ids, list_id, "\t\n").unwrap_err(),
        ValidationError::BlankTodoText
    );
    assert_eq!(document.lists().len(), 1);
    assert!(document.lists()[0].todos.is_empty());
}

#[test]
fn unresolved_ids_are_silent_noops() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A", "B"]);
    let list_id = document.lists()[0].id;
    let document = document.add_todo(&mut ids, list_id, "keep").unwrap();

    assert_eq!(document.delete_list(999), document);
    assert_eq!(document.select_list(999), document);
    assert_eq!(document.add_todo(&mut ids, 999, "orphan").unwrap(), document);
    assert_eq!(document.toggle_todo(999, 1), document);
    assert_eq!(document.toggle_todo(list_id, 999), document);
    assert_eq!(document.delete_todo(999, 1), document);
    assert_eq!(document.delete_todo(list_id, 999), document);
}

#[test]
fn delete_todo_removes_by_identity_and_keeps_order() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A"]);
    let list_id = document.lists()[0].id;
    let document = ["one", "two", "three"]
        .iter()
        .fold(document, |document, text| {
            document.add_todo(&mut ids, list_id, text).unwrap()
        });
    let middle = document.list(list_id).unwrap().todos[1].id;

    let document = document.delete_todo(list_id, middle);
    let texts: Vec<&str> = document
        .list(list_id)
        .unwrap()
        .todos
        .iter()
        .map(|todo| todo.text.as_str())
        .collect();
    assert_eq!(texts, vec!["one", "three"]);
}

#[test]
fn todos_are_scoped_to_their_list() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["A", "B"]);
    let a_id = document.lists()[0].id;
    let b_id = document.lists()[1].id;

    let document = document.add_todo(&mut ids, a_id, "only in A").unwrap();
    let todo_id = document.list(a_id).unwrap().todos[0].id;

    assert_eq!(document.toggle_todo(b_id, todo_id), document);
    assert!(document.list(b_id).unwrap().todos.is_empty());
}

#[test]
fn selection_invariant_holds_across_mixed_sequences() {
    let mut ids = SequentialIds::new(1);
    let mut document = Document::new();
    let mut created = Vec::new();

    // Deterministic mix of adds, selects and deletes, including stale ids.
    for step in 0..60_i64 {
        document = match step % 5 {
            0 | 3 => {
                let next = document.add_list(&mut ids, &format!("list {step}")).unwrap();
                created.push(next.lists().last().unwrap().id);
                next
            }
            1 => document.select_list(created[(step as usize * 7) % created.len()]),
            2 => document.delete_list(created[(step as usize * 3) % created.len()]),
            _ => document.delete_list(step * 1_000),
        };

        document.validate().unwrap();
        match document.active_list_id() {
            None => assert!(document.lists().is_empty()),
            Some(id) => assert!(document.lists().iter().any(|list| list.id == id)),
        }
    }
}

#[test]
fn created_ids_are_pairwise_distinct() {
    let mut ids = TimestampIds::new();
    let mut document = Document::new();
    for index in 0..200 {
        document = document.add_list(&mut ids, &format!("list {index}")).unwrap();
    }
    let list_ids: HashSet<i64> = document.lists().iter().map(|list| list.id).collect();
    assert_eq!(list_ids.len(), 200);

    let target = document.lists()[0].id;
    for index in 0..200 {
        document = document
            .add_todo(&mut ids, target, &format!("todo {index}"))
            .unwrap();
    }
    let todo_ids: HashSet<i64> = document
        .list(target)
        .unwrap()
        .todos
        .iter()
        .map(|todo| todo.id)
        .collect();
    assert_eq!(todo_ids.len(), 200);
}

#[test]
fn active_list_follows_selection() {
    let mut ids = SequentialIds::new(1);
    let document = document_with_lists(&mut ids, &["Work", "Home"]);
    let work_id = document.lists()[0].id;

    let document = document.select_list(work_id);
    assert_eq!(document.active_list().unwrap().name, "Work");
    assert_eq!(Document::new().active_list(), None);
}
