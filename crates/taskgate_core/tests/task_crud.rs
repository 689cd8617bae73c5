use std::collections::HashSet;
use taskgate_core::{InMemoryTaskRepository, NewTask, RepoError, TaskRepository, TaskService};

#[test]
fn create_appends_with_next_id_and_keeps_order() {
    let repo = InMemoryTaskRepository::seeded();

    let created = repo.create_task(&NewTask::named("X", false)).unwrap();
    assert_eq!(created.id, 6);
    assert_eq!(created.name, "X");
    assert!(!created.done);

    let ids: Vec<_> = repo.list_tasks().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn delete_removes_exactly_one_and_preserves_order() {
    let repo = InMemoryTaskRepository::seeded();

    assert_eq!(repo.delete_task(3).unwrap(), 3);
    let ids: Vec<_> = repo.list_tasks().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

#[test]
fn delete_missing_id_leaves_list_unchanged() {
    let repo = InMemoryTaskRepository::seeded();
    let before = repo.list_tasks().unwrap();

    let err = repo.delete_task(42).unwrap_err();
    assert_eq!(err, RepoError::NotFound(42));
    assert_eq!(repo.list_tasks().unwrap(), before);
}

#[test]
fn mark_done_is_visible_in_later_list() {
    let repo = InMemoryTaskRepository::seeded();
    let created = repo.create_task(&NewTask::named("pending", false)).unwrap();

    repo.mark_done(created.id).unwrap();
    let listed = repo.list_tasks().unwrap();
    let stored = listed.iter().find(|t| t.id == created.id).unwrap();
    assert!(stored.done);

    // Marking again is a no-op success.
    assert!(repo.mark_done(created.id).unwrap().done);
}

#[test]
fn ids_stay_strictly_increasing_across_deletes() {
    let repo = InMemoryTaskRepository::new();
    let mut seen = HashSet::new();
    let mut last = 0;

    for round in 0..20 {
        let task = repo
            .create_task(&NewTask::named(format!("task-{round}"), false))
            .unwrap();
        assert!(task.id > last);
        assert!(seen.insert(task.id));
        last = task.id;

        if round % 3 == 0 {
            repo.delete_task(task.id).unwrap();
        }
    }
}

#[test]
fn reference_scenario_through_service() {
    let service = TaskService::new(InMemoryTaskRepository::seeded());

    let created = service.create(&NewTask::named("X", false)).unwrap();
    assert_eq!(
        serde_json::to_value(&created).unwrap(),
        serde_json::json!({"id": 6, "name": "X", "done": false})
    );
    assert_eq!(service.list().unwrap().len(), 6);

    assert_eq!(service.delete(4).unwrap(), 4);
    let listed = service.list().unwrap();
    assert_eq!(listed.len(), 5);
    assert!(listed.iter().all(|t| t.id != 4));

    let err = service.delete(4).unwrap_err();
    assert_eq!(err.code(), "not_found");
}
