//! Database-level tests for the annotation repositories, focused on the
//! short-id collision retry and the soft-delete invariants.

use sqlx::PgPool;
use threadnote_core::id::generate_annotation_id;
use threadnote_db::models::annotation::{AnnotationListParams, CreateAnnotation, UpdateAnnotation};
use threadnote_db::models::annotation_comment::CreateAnnotationComment;
use threadnote_db::repositories::{AnnotationCommentRepo, AnnotationRepo};

fn new_annotation(user_email: &str) -> CreateAnnotation {
    CreateAnnotation {
        user_email: user_email.to_string(),
        text: "check budget".to_string(),
        annotation_label: "task".to_string(),
        position: "p1".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_assigns_an_eight_char_id(pool: PgPool) {
    let row = AnnotationRepo::create(&pool, "msg-1", &new_annotation("a@x.com"))
        .await
        .unwrap();
    assert_eq!(row.id.len(), 8);
    assert_eq!(row.email_id, "msg-1");
    assert!(!row.is_deleted);
}

#[sqlx::test(migrations = "./migrations")]
async fn forced_collision_triggers_exactly_one_retry(pool: PgPool) {
    let existing = AnnotationRepo::create(&pool, "msg-1", &new_annotation("a@x.com"))
        .await
        .unwrap();

    // First candidate collides with the existing row, second is fresh.
    let mut ids = vec![generate_annotation_id(), existing.id.clone()];
    let row = AnnotationRepo::create_with_id_source(&pool, "msg-1", &new_annotation("b@x.com"), || {
        ids.pop().unwrap()
    })
    .await
    .unwrap();

    assert_ne!(row.id, existing.id);
    assert!(ids.is_empty(), "both candidate ids should have been drawn");
}

#[sqlx::test(migrations = "./migrations")]
async fn three_consecutive_collisions_exhaust_the_retry_budget(pool: PgPool) {
    let existing = AnnotationRepo::create(&pool, "msg-1", &new_annotation("a@x.com"))
        .await
        .unwrap();

    let mut attempts = 0;
    let err = AnnotationRepo::create_with_id_source(&pool, "msg-1", &new_annotation("b@x.com"), || {
        attempts += 1;
        existing.id.clone()
    })
    .await
    .unwrap_err();

    assert_eq!(attempts, 3);
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("annotations_pkey"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn soft_deleted_rows_are_hidden_but_persist(pool: PgPool) {
    let row = AnnotationRepo::create(&pool, "msg-1", &new_annotation("a@x.com"))
        .await
        .unwrap();

    assert!(AnnotationRepo::soft_delete(&pool, "msg-1", &row.id)
        .await
        .unwrap());

    // Hidden from normal reads.
    assert!(AnnotationRepo::find(&pool, "msg-1", &row.id)
        .await
        .unwrap()
        .is_none());
    let listed = AnnotationRepo::list(&pool, "msg-1", &AnnotationListParams::default())
        .await
        .unwrap();
    assert!(listed.is_empty());

    // Still present via the internal bypass, flagged deleted.
    let hidden = AnnotationRepo::find_any(&pool, "msg-1", &row.id)
        .await
        .unwrap()
        .unwrap();
    assert!(hidden.is_deleted);

    // Deleting again affects nothing.
    assert!(!AnnotationRepo::soft_delete(&pool, "msg-1", &row.id)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn lookups_match_ids_case_insensitively(pool: PgPool) {
    let row = AnnotationRepo::create(&pool, "Msg-Mixed", &new_annotation("a@x.com"))
        .await
        .unwrap();

    let found = AnnotationRepo::find(&pool, "MSG-MIXED", &row.id.to_uppercase())
        .await
        .unwrap();
    assert!(found.is_some(), "id and email_id lookups should ignore case");
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_and_searches(pool: PgPool) {
    AnnotationRepo::create(&pool, "msg-1", &new_annotation("a@x.com"))
        .await
        .unwrap();
    let mut other = new_annotation("b@x.com");
    other.text = "sync on Tuesday".to_string();
    other.annotation_label = "meeting_request".to_string();
    AnnotationRepo::create(&pool, "msg-1", &other).await.unwrap();
    // Different thread, must never appear.
    AnnotationRepo::create(&pool, "msg-2", &new_annotation("a@x.com"))
        .await
        .unwrap();

    let by_label = AnnotationRepo::list(
        &pool,
        "msg-1",
        &AnnotationListParams {
            annotation_label: Some("meeting_request".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_label.len(), 1);
    assert_eq!(by_label[0].user_email, "b@x.com");

    let by_search = AnnotationRepo::list(
        &pool,
        "msg-1",
        &AnnotationListParams {
            search: Some("budget".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].user_email, "a@x.com");

    let total = AnnotationRepo::count(&pool, "msg-1", &AnnotationListParams::default())
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_applies_only_present_fields(pool: PgPool) {
    let row = AnnotationRepo::create(&pool, "msg-1", &new_annotation("a@x.com"))
        .await
        .unwrap();

    let updated = AnnotationRepo::update(
        &pool,
        "msg-1",
        &row.id,
        &UpdateAnnotation {
            text: Some("updated".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.text, "updated");
    assert_eq!(updated.position, "p1");
    assert_eq!(updated.annotation_label, "task");
    assert!(updated.updated_at >= row.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_comment_by_same_author_is_a_unique_violation(pool: PgPool) {
    let annotation = AnnotationRepo::create(&pool, "msg-1", &new_annotation("a@x.com"))
        .await
        .unwrap();

    let comment = CreateAnnotationComment {
        author_email: "b@x.com".to_string(),
        text: "looks good".to_string(),
    };
    AnnotationCommentRepo::create(&pool, &annotation.id, &comment)
        .await
        .unwrap();

    let err = AnnotationCommentRepo::create(&pool, &annotation.id, &comment)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_annotation_comments_author"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}
