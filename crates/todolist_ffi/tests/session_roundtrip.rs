mod common;

use todolist_ffi::api::{
    add_list, add_todo, app_snapshot, delete_list, select_list, toggle_todo,
};

#[test]
fn calls_share_one_session_and_persist_each_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::use_store_in(dir.path());

    let empty = app_snapshot();
    assert!(empty.lists.is_empty());
    assert_eq!(empty.active_list_id, None);

    let created = add_list("  Groceries ".to_string());
    assert!(created.ok, "{}", created.message);
    let groceries = created.snapshot.lists[0].id;
    assert_eq!(created.snapshot.lists[0].name, "Groceries");
    assert_eq!(created.snapshot.active_list_id, Some(groceries));

    let with_milk = add_todo(groceries, "Milk".to_string());
    assert!(with_milk.ok);
    let milk = with_milk.snapshot.lists[0].todos[0].id;
    assert!(toggle_todo(groceries, milk).ok);

    let later = app_snapshot();
    assert!(later.lists[0].todos[0].completed);

    let stored = common::stored_document(&path).unwrap();
    assert_eq!(stored.active_list_id(), Some(groceries));
    assert!(stored.list(groceries).unwrap().todos[0].completed);

    let rejected = add_list("   ".to_string());
    assert!(!rejected.ok);
    assert_eq!(rejected.message, "list name must not be blank");
    assert_eq!(rejected.snapshot.lists.len(), 1);

    let stale = select_list(groceries + 1_000);
    assert!(stale.ok);
    assert_eq!(stale.snapshot.active_list_id, Some(groceries));

    let removed = delete_list(groceries);
    assert!(removed.ok);
    assert!(removed.snapshot.lists.is_empty());
    assert_eq!(removed.snapshot.active_list_id, None);
    assert!(common::stored_document(&path).unwrap().is_empty());
}
