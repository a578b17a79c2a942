use chrono::NaiveDate;
use flock_core::db::open_db_in_memory;
use flock_core::{
    AttendanceEntry, AttendanceService, AttendanceStatus, Group, GroupDraft, GroupService,
    MeetingSheet, Person, PersonRepository, ServiceError, SqliteAttendanceRepository,
    SqliteGroupRepository, SqlitePersonRepository, ValidationError,
};
use rusqlite::Connection;

fn draft(name: &str, leader1: &str, host1: &str) -> GroupDraft {
    GroupDraft {
        name: name.to_string(),
        leader1_name: leader1.to_string(),
        leader2_name: None,
        host1_name: host1.to_string(),
        host2_name: None,
    }
}

fn create_group(conn: &mut Connection, draft: &GroupDraft) -> Result<Group, ServiceError> {
    let repo = SqliteGroupRepository::new(conn);
    let mut service = GroupService::new(repo);
    service.create_group(draft)
}

fn people_in_group(conn: &mut Connection, group_id: i64) -> Vec<Person> {
    let repo = SqlitePersonRepository::new(conn);
    repo.list_people_in_group(group_id).unwrap()
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

#[test]
fn create_group_creates_people_for_distinct_roster_names() {
    let mut conn = open_db_in_memory().unwrap();

    let mut submitted = draft("Vine North", "Joana", "Marcos");
    submitted.leader2_name = Some("Pedro".to_string());
    let group = create_group(&mut conn, &submitted).unwrap();

    assert!(group.id > 0);
    assert_eq!(group.name, "Vine North");
    assert_eq!(group.leader1_name, "Joana");
    assert_eq!(group.leader2_name.as_deref(), Some("Pedro"));
    assert_eq!(group.host1_name, "Marcos");
    assert!(group.created_at > 0);
    assert!(group.updated_at > 0);

    let people = people_in_group(&mut conn, group.id);
    assert_eq!(people.len(), 3);

    let joana = people.iter().find(|p| p.name == "Joana").unwrap();
    assert!(joana.is_leader);
    assert!(joana.is_member_of_church);
    assert_eq!(joana.group_id, Some(group.id));

    let marcos = people.iter().find(|p| p.name == "Marcos").unwrap();
    assert!(!marcos.is_leader);
    assert!(marcos.is_member_of_church);

    let pedro = people.iter().find(|p| p.name == "Pedro").unwrap();
    assert!(pedro.is_leader);
}

#[test]
fn create_group_deduplicates_roster_names_preferring_leader_role() {
    let mut conn = open_db_in_memory().unwrap();

    let mut submitted = draft("Vine East", "Ana", " Ana ");
    submitted.host2_name = Some("Bia".to_string());
    let group = create_group(&mut conn, &submitted).unwrap();

    let people = people_in_group(&mut conn, group.id);
    assert_eq!(people.len(), 2);

    let ana = people.iter().find(|p| p.name == "Ana").unwrap();
    assert!(ana.is_leader, "leader role must win over host role");

    let bia = people.iter().find(|p| p.name == "Bia").unwrap();
    assert!(!bia.is_leader);
}

#[test]
fn create_group_rejects_blank_required_fields_without_writes() {
    let mut conn = open_db_in_memory().unwrap();

    let err = create_group(&mut conn, &draft("  ", "Joana", "Marcos")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankGroupName)
    ));

    let err = create_group(&mut conn, &draft("Vine North", "", "Marcos")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankLeaderName)
    ));

    let err = create_group(&mut conn, &draft("Vine North", "Joana", " ")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankHostName)
    ));

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM groups;"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM people;"), 0);
}

#[test]
fn update_group_rewrites_fields_without_touching_people() {
    let mut conn = open_db_in_memory().unwrap();
    let group = create_group(&mut conn, &draft("Vine North", "Joana", "Marcos")).unwrap();

    conn.execute("UPDATE groups SET updated_at = 1000 WHERE id = ?1;", [group.id])
        .unwrap();

    let mut replacement = draft("Vine South", "Rute", "Noemi");
    replacement.leader2_name = Some("   ".to_string());
    let updated = {
        let repo = SqliteGroupRepository::new(&mut conn);
        let service = GroupService::new(repo);
        service.update_group(group.id, &replacement).unwrap()
    };

    assert_eq!(updated.name, "Vine South");
    assert_eq!(updated.leader1_name, "Rute");
    assert_eq!(updated.leader2_name, None, "blank optional collapses to NULL");
    assert_eq!(updated.host1_name, "Noemi");
    assert!(updated.updated_at > 1000);

    let mut names: Vec<String> = people_in_group(&mut conn, group.id)
        .into_iter()
        .map(|p| p.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Joana".to_string(), "Marcos".to_string()]);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM people;"), 2);
}

#[test]
fn update_missing_group_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();

    let err = {
        let repo = SqliteGroupRepository::new(&mut conn);
        let service = GroupService::new(repo);
        service
            .update_group(4242, &draft("Vine North", "Joana", "Marcos"))
            .unwrap_err()
    };

    assert!(matches!(err, ServiceError::GroupNotFound(4242)));
}

#[test]
fn get_group_and_list_groups_read_back_created_rows() {
    let mut conn = open_db_in_memory().unwrap();
    create_group(&mut conn, &draft("Vine South", "Rute", "Noemi")).unwrap();
    let north = create_group(&mut conn, &draft("Vine North", "Joana", "Marcos")).unwrap();

    let repo = SqliteGroupRepository::new(&mut conn);
    let service = GroupService::new(repo);

    let fetched = service.get_group(north.id).unwrap().unwrap();
    assert_eq!(fetched, north);
    assert_eq!(service.get_group(4242).unwrap(), None);

    let listed = service.list_groups().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Vine North", "listing is ordered by name");
    assert_eq!(listed[1].name, "Vine South");
}

#[test]
fn delete_group_removes_attendance_and_detaches_people() {
    let mut conn = open_db_in_memory().unwrap();
    let group = create_group(&mut conn, &draft("Vine North", "Joana", "Marcos")).unwrap();
    let people = people_in_group(&mut conn, group.id);
    assert_eq!(people.len(), 2);

    let sheet = MeetingSheet {
        meeting_date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
        group_id: group.id,
        entries: people
            .iter()
            .map(|p| AttendanceEntry {
                person_id: p.id,
                status: AttendanceStatus::Returning,
            })
            .collect(),
        note: None,
    };
    {
        let repo = SqliteAttendanceRepository::new(&mut conn);
        let mut service = AttendanceService::new(repo);
        service.record_attendance(&sheet).unwrap();
    }
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM attendance_records;"), 2);

    let deleted = {
        let repo = SqliteGroupRepository::new(&mut conn);
        let mut service = GroupService::new(repo);
        service.delete_group(group.id).unwrap()
    };
    assert_eq!(deleted.id, group.id);
    assert_eq!(deleted.name, "Vine North");

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM groups;"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM attendance_records;"), 0);

    for person in &people {
        let survived = {
            let repo = SqlitePersonRepository::new(&mut conn);
            repo.get_person(person.id).unwrap().unwrap()
        };
        assert_eq!(survived.group_id, None, "people survive detached");
    }
}

#[test]
fn delete_missing_group_errors_and_changes_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    create_group(&mut conn, &draft("Vine North", "Joana", "Marcos")).unwrap();

    let err = {
        let repo = SqliteGroupRepository::new(&mut conn);
        let mut service = GroupService::new(repo);
        service.delete_group(999).unwrap_err()
    };

    assert!(matches!(err, ServiceError::GroupNotFound(999)));
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM groups;"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM people;"), 2);
}
