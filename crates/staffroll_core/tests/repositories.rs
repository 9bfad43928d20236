use chrono::NaiveDate;
use staffroll_core::db::open_db_in_memory;
use staffroll_core::{
    Address, Department, DepartmentRepository, Employee, EmployeeRepository, RepoError, Sport,
    SportRepository, SqliteDepartmentRepository, SqliteEmployeeRepository, SqliteSportRepository,
};

fn employee(name: &str, email: &str, department_id: i64) -> Employee {
    let mut employee = Employee::new(
        name,
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email,
    );
    employee.department_id = department_id;
    employee.address = Address {
        street: "12th Main St".to_string(),
        city: "Tambaram".to_string(),
        state: "Tamil Nadu".to_string(),
        zip: "600045".to_string(),
    };
    employee
}

#[test]
fn department_save_assigns_id_and_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::new(&conn);

    let mut saved = repo.save(&Department::new("IT")).unwrap();
    assert_eq!(saved.id, Some(1));

    saved.soft_delete();
    repo.save(&saved).unwrap();

    let loaded = repo.find_by_id(1).unwrap().unwrap();
    assert!(loaded.is_deleted);
    assert_eq!(repo.find_all().unwrap().len(), 1);
    assert!(repo.exists_by_name("IT").unwrap());
    assert!(!repo.exists_by_name("HR").unwrap());
}

#[test]
fn department_save_with_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::new(&conn);

    let ghost = Department {
        id: Some(99),
        ..Department::new("Ghost")
    };
    let err = repo.save(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "department", id: 99 }));
}

#[test]
fn duplicate_names_hit_the_unique_index() {
    let conn = open_db_in_memory().unwrap();
    let departments = SqliteDepartmentRepository::new(&conn);
    let sports = SqliteSportRepository::new(&conn);

    departments.save(&Department::new("IT")).unwrap();
    let err = departments.save(&Department::new("IT")).unwrap_err();
    assert!(matches!(err, RepoError::UniqueViolation(_)));

    sports.save(&Sport::new("Chess")).unwrap();
    let err = sports.save(&Sport::new("Chess")).unwrap_err();
    assert!(matches!(err, RepoError::UniqueViolation(_)));
}

#[test]
fn sport_find_returns_inactive_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSportRepository::new(&conn);

    let mut sport = repo.save(&Sport::new("Chess")).unwrap();
    sport.deactivate();
    repo.save(&sport).unwrap();

    let loaded = repo.find_by_id(sport.id.unwrap()).unwrap().unwrap();
    assert!(!loaded.is_active);
    assert_eq!(repo.find_all().unwrap(), vec![loaded]);
}

#[test]
fn employee_save_persists_address_department_and_sports() {
    let conn = open_db_in_memory().unwrap();
    let department = SqliteDepartmentRepository::new(&conn)
        .save(&Department::new("IT"))
        .unwrap();
    let sports = SqliteSportRepository::new(&conn);
    let chess = sports.save(&Sport::new("Chess")).unwrap();
    let rugby = sports.save(&Sport::new("Rugby")).unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut ann = employee("Ann", "ann@example.com", department.id.unwrap());
    ann.sport_ids = [rugby.id.unwrap(), chess.id.unwrap()].into_iter().collect();
    let id = repo.save(&ann).unwrap();

    let record = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(record.employee.id, Some(id));
    assert_eq!(record.employee.address, ann.address);
    assert_eq!(record.department_name.as_deref(), Some("IT"));
    let names: Vec<_> = record.sports.iter().map(|sport| sport.name.as_str()).collect();
    assert_eq!(names, vec!["Chess", "Rugby"]);
    assert_eq!(record.employee.sport_ids, ann.sport_ids);
}

#[test]
fn employee_resave_replaces_address_and_sport_links() {
    let conn = open_db_in_memory().unwrap();
    let department = SqliteDepartmentRepository::new(&conn)
        .save(&Department::new("IT"))
        .unwrap();
    let chess = SqliteSportRepository::new(&conn)
        .save(&Sport::new("Chess"))
        .unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut ann = employee("Ann", "ann@example.com", department.id.unwrap());
    ann.sport_ids.insert(chess.id.unwrap());
    let id = repo.save(&ann).unwrap();

    ann.id = Some(id);
    ann.address.city = "Chennai".to_string();
    ann.sport_ids.clear();
    assert_eq!(repo.save(&ann).unwrap(), id);

    let record = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(record.employee.address.city, "Chennai");
    assert!(record.sports.is_empty());
    assert!(repo.find_by_sport_id(chess.id.unwrap()).unwrap().is_empty());
}

#[test]
fn failed_employee_save_leaves_nothing_behind() {
    let conn = open_db_in_memory().unwrap();
    let department = SqliteDepartmentRepository::new(&conn)
        .save(&Department::new("IT"))
        .unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut ann = employee("Ann", "ann@example.com", department.id.unwrap());
    ann.sport_ids.insert(404);
    assert!(repo.save(&ann).is_err());

    assert!(repo.find_all().unwrap().is_empty());
    let addresses: i64 = conn
        .query_row("SELECT COUNT(*) FROM addresses;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(addresses, 0);
}

#[test]
fn duplicate_email_is_a_unique_violation() {
    let conn = open_db_in_memory().unwrap();
    let department = SqliteDepartmentRepository::new(&conn)
        .save(&Department::new("IT"))
        .unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    repo.save(&employee("Ann", "shared@example.com", department.id.unwrap()))
        .unwrap();
    let err = repo
        .save(&employee("Bob", "shared@example.com", department.id.unwrap()))
        .unwrap_err();
    assert!(matches!(err, RepoError::UniqueViolation(_)));
}

#[test]
fn back_reference_queries_filter_by_link() {
    let conn = open_db_in_memory().unwrap();
    let departments = SqliteDepartmentRepository::new(&conn);
    let it = departments.save(&Department::new("IT")).unwrap();
    let hr = departments.save(&Department::new("HR")).unwrap();
    let chess = SqliteSportRepository::new(&conn)
        .save(&Sport::new("Chess"))
        .unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut ann = employee("Ann", "ann@example.com", it.id.unwrap());
    ann.sport_ids.insert(chess.id.unwrap());
    let ann_id = repo.save(&ann).unwrap();
    let bob_id = repo
        .save(&employee("Bob", "bob@example.com", hr.id.unwrap()))
        .unwrap();

    let in_it = repo.find_by_department_id(it.id.unwrap()).unwrap();
    assert_eq!(in_it.len(), 1);
    assert_eq!(in_it[0].employee.id, Some(ann_id));

    let in_hr = repo.find_by_department_id(hr.id.unwrap()).unwrap();
    assert_eq!(in_hr[0].employee.id, Some(bob_id));

    let chess_players = repo.find_by_sport_id(chess.id.unwrap()).unwrap();
    assert_eq!(chess_players.len(), 1);
    assert_eq!(chess_players[0].employee.id, Some(ann_id));

    assert!(repo
        .exists_by_name_and_department_id("Ann", it.id.unwrap())
        .unwrap());
    assert!(!repo
        .exists_by_name_and_department_id("Ann", hr.id.unwrap())
        .unwrap());
}

#[test]
fn invalid_persisted_flags_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO sports (name, is_active) VALUES ('Chess', 7);",
    )
    .unwrap();

    let err = SqliteSportRepository::new(&conn).find_by_id(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
