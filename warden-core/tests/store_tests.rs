use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use warden_core::auth::password::{Argon2Hasher, verify_password};
use warden_core::db;
use warden_core::error::WardenError;
use warden_core::models::user::Gender;
use warden_core::models::{role_permission, user_role};
use warden_core::seed::Bootstrap;
use warden_core::seed::catalog::PermissionName;
use warden_core::seed::confirm::AssumeYes;
use warden_core::store::{
    CreateOutcome, NewPermission, NewRole, NewUser, PermissionStore, Profile, RoleStore,
    SqlPermissionStore, SqlRoleStore, SqlUserStore, UserStore,
};

/// In-memory SQLite must stay on a single pooled connection, otherwise
/// every connection sees its own empty database.
async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.expect("connect");
    db::run_migrations(&db).await.expect("migrate");
    db
}

fn new_permission(name: &str) -> NewPermission {
    NewPermission {
        name: name.to_string(),
        description: format!("test permission {name}"),
    }
}

fn new_user(username: &str, roles: Vec<i32>) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: "$argon2id$test-only".to_string(),
        roles,
        profile: Profile {
            user_code: "T001".to_string(),
            full_name: "Test User".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
            address: "Test Address".to_string(),
            gender: Gender::Male,
        },
    }
}

// ═══ Permission store ═══

#[tokio::test]
async fn test_permission_create_and_conflict() {
    let db = test_db().await;
    let store = SqlPermissionStore::new(db);

    let outcome = store.create(new_permission("ban_users")).await.expect("create");
    let created = match outcome {
        CreateOutcome::Created(model) => model,
        CreateOutcome::AlreadyExists => panic!("first insert must create"),
    };
    assert!(created.id > 0);
    assert_eq!(created.name, "ban_users");

    let outcome = store.create(new_permission("ban_users")).await.expect("create");
    assert!(matches!(outcome, CreateOutcome::AlreadyExists));

    let all = store.find_all().await.expect("find_all");
    assert_eq!(all.len(), 1);
}

// ═══ Role store ═══

#[tokio::test]
async fn test_role_create_persists_ordered_grants() {
    let db = test_db().await;
    let permissions = SqlPermissionStore::new(db.clone());
    let roles = SqlRoleStore::new(db.clone());

    let mut ids = Vec::new();
    for name in ["view_reports", "export_reports"] {
        match permissions.create(new_permission(name)).await.expect("create") {
            CreateOutcome::Created(model) => ids.push(model.id),
            CreateOutcome::AlreadyExists => panic!("fresh database"),
        }
    }

    let outcome = roles
        .create(NewRole {
            name: "auditor".to_string(),
            description: "Read-only reporting".to_string(),
            grant_all: false,
            permissions: ids.clone(),
        })
        .await
        .expect("create");
    let role = match outcome {
        CreateOutcome::Created(model) => model,
        CreateOutcome::AlreadyExists => panic!("first insert must create"),
    };
    assert!(!role.grant_all);

    use sea_orm::EntityTrait;
    let mut links = role_permission::Entity::find()
        .all(&db)
        .await
        .expect("links");
    links.sort_by_key(|l| l.position);
    let linked: Vec<i32> = links.iter().map(|l| l.permission_id).collect();
    assert_eq!(linked, ids);

    let outcome = roles
        .create(NewRole {
            name: "auditor".to_string(),
            description: "duplicate".to_string(),
            grant_all: false,
            permissions: Vec::new(),
        })
        .await
        .expect("create");
    assert!(matches!(outcome, CreateOutcome::AlreadyExists));
}

// ═══ User store ═══

#[tokio::test]
async fn test_user_create_find_and_conflict() {
    let db = test_db().await;
    let store = SqlUserStore::new(db);

    assert!(store.find_by_username("alice").await.expect("lookup").is_none());

    let created = store.create(new_user("alice", Vec::new())).await.expect("create");
    assert_eq!(created.username, "alice");

    let found = store
        .find_by_username("alice")
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(found.id, created.id);

    let err = store
        .create(new_user("alice", Vec::new()))
        .await
        .expect_err("duplicate username");
    assert!(matches!(err, WardenError::Conflict(_)));
}

// ═══ End-to-end over SQL stores ═══

#[tokio::test]
async fn test_sql_bootstrap_end_to_end_and_idempotent() {
    let db = test_db().await;
    let permissions = SqlPermissionStore::new(db.clone());
    let roles = SqlRoleStore::new(db.clone());
    let users = SqlUserStore::new(db.clone());
    // Cheap parameters: this test cares about wiring, not hash strength.
    let hasher = Argon2Hasher::new(1024, 1, 1).expect("params");

    let bootstrap = Bootstrap {
        permissions: &permissions,
        roles: &roles,
        users: &users,
        hasher: &hasher,
        confirm: &AssumeYes,
    };

    let report = bootstrap.run().await.expect("first run");
    assert_eq!(
        report.permissions.expect("stage ran").created,
        PermissionName::ALL.len()
    );
    assert_eq!(report.roles.expect("stage ran").created, 2);
    assert_eq!(report.users.expect("stage ran").created, 2);

    let admin = users
        .find_by_username("admin")
        .await
        .expect("lookup")
        .expect("admin seeded");
    assert_ne!(admin.password_hash, "123456");
    assert!(verify_password("123456", &admin.password_hash).expect("verify"));

    use sea_orm::EntityTrait;
    let memberships = user_role::Entity::find().all(&db).await.expect("links");
    assert_eq!(memberships.len(), 2);

    let report = bootstrap.run().await.expect("second run");
    let summary = report.permissions.expect("stage ran");
    assert_eq!(summary.created, 0);
    assert_eq!(summary.skipped, PermissionName::ALL.len());
    assert_eq!(report.roles.expect("stage ran").created, 0);
    assert_eq!(report.users.expect("stage ran").created, 0);

    // The stored credential survives the second run untouched.
    let after = users
        .find_by_username("admin")
        .await
        .expect("lookup")
        .expect("admin still present");
    assert_eq!(after.password_hash, admin.password_hash);
}
