//! Edit form engine tests: seeding, field edits, array items, the
//! submit/cancel lifecycle and image uploads.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use corpsite::forms::{
    EditSession, FieldDescriptor, FieldKind, FormDraft, FormError, FormState, ImageTarget,
};

fn stats_field() -> FieldDescriptor {
    FieldDescriptor::array(
        "stats",
        "Stats",
        vec![FieldDescriptor::item("value", "Value"), FieldDescriptor::item("label", "Label")],
    )
}

/// Save callback that records what it was handed.
fn recorder() -> (Arc<Mutex<Vec<Value>>>, impl Fn(Value) -> std::future::Ready<Result<(), String>>) {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let sink = saved.clone();
    let save = move |v: Value| {
        sink.lock().unwrap().push(v);
        std::future::ready(Ok(()))
    };
    (saved, save)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[test]
fn test_seed_fills_missing_keys_by_kind() {
    let fields = vec![
        FieldDescriptor::text("title", "Title"),
        FieldDescriptor::textarea("body", "Body"),
        FieldDescriptor::image("image", "Image"),
        FieldDescriptor::select("status", "Status", &["running", "completed"]).with_default("running"),
        FieldDescriptor::object("info", "Info", vec![FieldDescriptor::text("phone", "Phone")]),
        stats_field(),
    ];
    let draft = FormDraft::seed(fields, &json!({"title": "Kept", "extra": 1}));

    assert_eq!(
        draft.to_value(),
        json!({
            "title": "Kept",
            "extra": 1,
            "body": "",
            "image": "",
            "status": "running",
            "info": {},
            "stats": []
        })
    );
}

#[test]
fn test_seed_from_non_object_starts_empty() {
    let draft = FormDraft::seed(vec![FieldDescriptor::text("title", "Title")], &json!("oops"));
    assert_eq!(draft.to_value(), json!({"title": ""}));
}

#[test]
fn test_unknown_kind_string_reads_as_text() {
    let field: FieldDescriptor =
        serde_json::from_value(json!({"name": "count", "label": "Count", "type": "number"}))
            .expect("descriptor");
    assert_eq!(field.kind, FieldKind::Text);
}

// ---------------------------------------------------------------------------
// Field edits
// ---------------------------------------------------------------------------

#[test]
fn test_set_field_is_last_write_wins_and_idempotent() {
    let mut draft = FormDraft::seed(vec![FieldDescriptor::textarea("body", "Body")], &json!({}));
    draft.set_field("body", "first").unwrap();
    draft.set_field("body", "second").unwrap();
    let once = draft.to_value();
    draft.set_field("body", "second").unwrap();

    assert_eq!(draft.text("body"), "second");
    assert_eq!(draft.to_value(), once);
}

#[test]
fn test_set_unknown_field_is_rejected_without_change() {
    let mut draft = FormDraft::seed(vec![FieldDescriptor::text("title", "Title")], &json!({"title": "A"}));
    let err = draft.set_field("nope", "x").unwrap_err();
    assert_eq!(err, FormError::UnknownField("nope".to_string()));
    assert_eq!(draft.to_value(), json!({"title": "A"}));
}

#[test]
fn test_select_rejects_values_outside_options() {
    let mut draft = FormDraft::seed(
        vec![FieldDescriptor::select("status", "Status", &["running", "completed"])],
        &json!({"status": "running"}),
    );
    assert!(matches!(
        draft.set_field("status", "paused"),
        Err(FormError::InvalidOption { .. })
    ));
    draft.set_field("status", "completed").unwrap();
    assert_eq!(draft.text("status"), "completed");
}

#[test]
fn test_object_sub_field_edit_keeps_siblings() {
    let mut draft = FormDraft::seed(
        vec![FieldDescriptor::object(
            "info",
            "Info",
            vec![FieldDescriptor::text("phone", "Phone"), FieldDescriptor::text("email", "Email")],
        )],
        &json!({"info": {"phone": "1", "email": "a@b.c"}}),
    );
    draft.set_object_field("info", "phone", "2").unwrap();
    assert_eq!(draft.value("info"), Some(&json!({"phone": "2", "email": "a@b.c"})));
    assert!(matches!(
        draft.set_object_field("info", "fax", "3"),
        Err(FormError::UnknownSubField { .. })
    ));
}

// ---------------------------------------------------------------------------
// Array items
// ---------------------------------------------------------------------------

#[test]
fn test_add_item_uses_sub_field_defaults() {
    let field = FieldDescriptor::array(
        "projects",
        "Projects",
        vec![
            FieldDescriptor::item("title", "Title"),
            FieldDescriptor::select("status", "", &["running", "completed"]).with_default("running"),
        ],
    );
    let mut draft = FormDraft::seed(vec![field], &json!({}));
    let index = draft.add_item("projects").unwrap();

    assert_eq!(index, 0);
    assert_eq!(draft.items("projects"), &[json!({"title": "", "status": "running"})]);
}

#[test]
fn test_remove_item_preserves_order() {
    let mut draft = FormDraft::seed(
        vec![stats_field()],
        &json!({"stats": [
            {"value": "1", "label": "A"},
            {"value": "2", "label": "B"},
            {"value": "3", "label": "C"}
        ]}),
    );
    let removed = draft.remove_item("stats", 1).unwrap();

    assert_eq!(removed, json!({"value": "2", "label": "B"}));
    assert_eq!(
        draft.items("stats"),
        &[json!({"value": "1", "label": "A"}), json!({"value": "3", "label": "C"})]
    );
    assert!(matches!(
        draft.remove_item("stats", 5),
        Err(FormError::IndexOutOfRange { index: 5, len: 2, .. })
    ));
}

#[test]
fn test_set_item_field_out_of_range() {
    let mut draft = FormDraft::seed(vec![stats_field()], &json!({}));
    assert!(matches!(
        draft.set_item_field("stats", 0, "value", "9"),
        Err(FormError::IndexOutOfRange { .. })
    ));
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_scenario_edit_title_then_submit() {
    let mut session = EditSession::new();
    session
        .open(vec![FieldDescriptor::text("title", "Title")], &json!({"title": "Old"}), "Edit Hero")
        .unwrap();
    session.edit(|d| d.set_field("title", "New")).unwrap();

    let (saved, save) = recorder();
    let result = session.submit(save).await.unwrap();

    assert_eq!(result, json!({"title": "New"}));
    assert_eq!(saved.lock().unwrap().as_slice(), &[json!({"title": "New"})]);
    assert_eq!(session.state(), FormState::Closed);
    assert!(session.draft().is_none());
}

#[tokio::test]
async fn test_scenario_add_then_remove_first_item() {
    let mut session = EditSession::new();
    session
        .open(vec![stats_field()], &json!({"stats": [{"value": "10", "label": "A"}]}), "Edit Stats")
        .unwrap();
    session.edit(|d| d.add_item("stats")).unwrap();
    session.edit(|d| d.remove_item("stats", 0)).unwrap();

    let (saved, save) = recorder();
    session.submit(save).await.unwrap();

    assert_eq!(
        saved.lock().unwrap().as_slice(),
        &[json!({"stats": [{"value": "", "label": ""}]})]
    );
}

#[tokio::test]
async fn test_submit_hands_over_exact_draft() {
    let fields = vec![
        FieldDescriptor::text("title", "Title"),
        FieldDescriptor::textarea("subtitle", "Subtitle"),
        FieldDescriptor::image("backgroundImage", "Background"),
        stats_field(),
    ];
    let mut session = EditSession::new();
    session.open(fields, &json!({"title": "T"}), "Edit").unwrap();
    session
        .edit(|d| {
            d.set_field("title", "T2")?;
            d.set_field("subtitle", "S")?;
            d.set_field("backgroundImage", "/img/bg.jpg")?;
            d.add_item("stats")?;
            d.set_item_field("stats", 0, "value", "5")?;
            d.set_item_field("stats", 0, "label", "Years")
        })
        .unwrap();
    let expected = session.draft().unwrap().to_value();

    let (saved, save) = recorder();
    session.submit(save).await.unwrap();

    assert_eq!(saved.lock().unwrap().as_slice(), &[expected]);
}

#[test]
fn test_open_then_cancel_never_saves() {
    let mut session = EditSession::new();
    session.open(vec![FieldDescriptor::text("title", "Title")], &json!({"title": "Old"}), "Edit").unwrap();
    session.edit(|d| d.set_field("title", "Changed")).unwrap();
    session.cancel().unwrap();

    assert_eq!(session.state(), FormState::Closed);
    assert!(session.draft().is_none());
    assert_eq!(session.edit(|d| d.set_field("title", "x")), Err(FormError::NotOpen));
}

#[test]
fn test_reopen_resets_the_draft() {
    let mut session = EditSession::new();
    let fields = vec![FieldDescriptor::text("title", "Title")];
    session.open(fields.clone(), &json!({"title": "Old"}), "Edit").unwrap();
    session.edit(|d| d.set_field("title", "Unsaved")).unwrap();
    session.open(fields, &json!({"title": "Old"}), "Edit").unwrap();

    assert_eq!(session.draft().unwrap().text("title"), "Old");
}

#[tokio::test]
async fn test_failed_save_keeps_form_open_with_draft() {
    let mut session = EditSession::new();
    session.open(vec![FieldDescriptor::text("title", "Title")], &json!({"title": "Old"}), "Edit").unwrap();
    session.edit(|d| d.set_field("title", "New")).unwrap();

    let err = session
        .submit(|_| std::future::ready(Err::<(), _>("disk full")))
        .await
        .unwrap_err();

    assert_eq!(err, FormError::Save("disk full".to_string()));
    assert_eq!(session.state(), FormState::Open);
    assert_eq!(session.draft().unwrap().text("title"), "New");
    assert_eq!(session.last_error(), Some("Failed to save: disk full"));

    let (saved, save) = recorder();
    session.submit(save).await.unwrap();
    assert_eq!(saved.lock().unwrap().as_slice(), &[json!({"title": "New"})]);
}

#[test]
fn test_pending_save_blocks_edits_cancel_and_reopen() {
    let mut session = EditSession::new();
    let fields = vec![FieldDescriptor::text("title", "Title")];
    session.open(fields.clone(), &json!({}), "Edit").unwrap();
    let ticket = session.begin_submit().unwrap();

    assert!(session.is_saving());
    assert_eq!(session.edit(|d| d.set_field("title", "x")), Err(FormError::Busy("save")));
    assert_eq!(session.cancel(), Err(FormError::Busy("save")));
    assert_eq!(session.open(fields, &json!({}), "Edit"), Err(FormError::Busy("save")));
    assert!(matches!(session.begin_submit(), Err(FormError::Busy("save"))));

    session.finish_submit(ticket, Ok(())).unwrap();
    assert_eq!(session.state(), FormState::Closed);
}

#[test]
fn test_abort_cancels_pending_save_token() {
    let mut session = EditSession::new();
    session.open(vec![FieldDescriptor::text("title", "Title")], &json!({}), "Edit").unwrap();
    assert!(!session.abort());

    let ticket = session.begin_submit().unwrap();
    assert!(session.abort());
    assert!(ticket.token().is_cancelled());

    let err = session.finish_submit(ticket, Err(FormError::Cancelled)).unwrap_err();
    assert_eq!(err, FormError::Cancelled);
    assert_eq!(session.state(), FormState::Open);
    assert!(!session.abort_handle().is_cancelled());
}

#[test]
fn test_abort_unblocks_reopen() {
    let mut session = EditSession::new();
    let fields = vec![FieldDescriptor::image("image", "Image")];
    session.open(fields.clone(), &json!({"image": "/a.jpg"}), "Edit").unwrap();
    let ticket = session.begin_upload(ImageTarget::Field("image".to_string())).unwrap();

    assert_eq!(session.open(fields.clone(), &json!({}), "Edit"), Err(FormError::Busy("upload")));
    assert!(session.abort());
    session.finish_upload(ticket, Err(FormError::Cancelled)).unwrap_err();

    session.open(fields, &json!({"image": "/a.jpg"}), "Edit").unwrap();
    let old = session.begin_upload(ImageTarget::Field("image".to_string())).unwrap();
    session.finish_upload(old, Ok("/b.jpg".to_string())).unwrap();
    assert_eq!(session.draft().unwrap().text("image"), "/b.jpg");
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_scenario_failed_upload_then_retry() {
    let mut session = EditSession::new();
    session
        .open(vec![FieldDescriptor::image("image", "Image")], &json!({"image": "/old.jpg"}), "Edit")
        .unwrap();
    let target = ImageTarget::Field("image".to_string());

    let err = session
        .upload_image(target.clone(), |_| std::future::ready(Err::<String, _>("network down")))
        .await
        .unwrap_err();
    assert_eq!(err, FormError::Upload("network down".to_string()));
    assert_eq!(session.draft().unwrap().text("image"), "/old.jpg");
    assert_eq!(session.state(), FormState::Open);
    assert!(!session.is_uploading());

    session
        .upload_image(target, |_| std::future::ready(Ok::<_, String>("/uploads/new.jpg".to_string())))
        .await
        .unwrap();
    assert_eq!(session.draft().unwrap().text("image"), "/uploads/new.jpg");
}

#[tokio::test]
async fn test_upload_into_array_item() {
    let field = FieldDescriptor::array(
        "services",
        "Services",
        vec![
            FieldDescriptor::item("title", "Title"),
            FieldDescriptor::item("image", "Image").with_kind(FieldKind::Image),
        ],
    );
    let mut session = EditSession::new();
    session
        .open(vec![field], &json!({"services": [{"title": "A", "image": ""}]}), "Edit")
        .unwrap();
    let target = ImageTarget::Item { field: "services".to_string(), index: 0, sub: "image".to_string() };
    session
        .upload_image(target, |_| std::future::ready(Ok::<_, String>("/uploads/s.png".to_string())))
        .await
        .unwrap();

    assert_eq!(session.draft().unwrap().items("services"), &[json!({"title": "A", "image": "/uploads/s.png"})]);
}

#[test]
fn test_upload_target_must_be_an_image_slot() {
    let mut session = EditSession::new();
    session
        .open(vec![FieldDescriptor::text("title", "Title"), stats_field()], &json!({}), "Edit")
        .unwrap();

    assert!(matches!(
        session.begin_upload(ImageTarget::Field("title".to_string())),
        Err(FormError::WrongKind { .. })
    ));
    assert!(matches!(
        session.begin_upload(ImageTarget::Item { field: "stats".to_string(), index: 0, sub: "value".to_string() }),
        Err(FormError::WrongKind { .. })
    ));
    assert!(!session.is_uploading());
}

#[test]
fn test_pending_upload_blocks_second_upload_and_save() {
    let mut session = EditSession::new();
    session.open(vec![FieldDescriptor::image("image", "Image")], &json!({}), "Edit").unwrap();
    let ticket = session.begin_upload(ImageTarget::Field("image".to_string())).unwrap();

    assert!(matches!(
        session.begin_upload(ImageTarget::Field("image".to_string())),
        Err(FormError::Busy("upload"))
    ));
    assert!(matches!(session.begin_submit(), Err(FormError::Busy("upload"))));
    assert_eq!(session.cancel(), Err(FormError::Busy("upload")));
    assert_eq!(FormError::Busy("upload").to_string(), "The upload is still in progress");

    session.finish_upload(ticket, Ok("/x.png".to_string())).unwrap();
    session.cancel().unwrap();
}
