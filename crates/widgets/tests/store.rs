use widgets::{Error, core::error::ErrorClass, form::FormError, prelude::*};

fn submit(db: &Db, name: &str, weight: impl std::fmt::Display) -> Result<Widget, FormError> {
    WidgetForm::new(FormData::new().with("name", name).with("weight", weight)).save(&db.session())
}

fn widget_count(db: &Db) -> usize {
    db.session()
        .load::<Widget>()
        .count()
        .expect("count should succeed")
}

#[test]
fn saved_widget_is_found_by_name() {
    let db = Db::new();

    let saved = submit(&db, "Test Widget", 50).expect("valid form should save");
    assert!(saved.id.is_some(), "store should assign an identity");

    let found = db
        .session()
        .load::<Widget>()
        .filter_eq("name", "Test Widget")
        .one()
        .expect("saved widget should be found by name");

    assert_eq!(found, saved);
    assert_eq!(found.to_string(), "Test Widget");
    assert!((found.weight - 50.0).abs() < f64::EPSILON);
}

#[test]
fn invalid_forms_persist_nothing() {
    let db = Db::new();

    for weight in ["-10", "0", "150", "heavy", ""] {
        let err = submit(&db, "Test Widget", weight).expect_err("invalid weight should not save");
        assert!(
            matches!(err, FormError::Invalid(_)),
            "weight {weight:?} should be rejected by the form, got {err}"
        );
    }

    assert_eq!(widget_count(&db), 0);
}

#[test]
fn padded_name_is_stored_trimmed() {
    let db = Db::new();

    submit(&db, "   Test Widget \t", 10).expect("padded name should save");

    let exists = db
        .session()
        .load::<Widget>()
        .filter_eq("name", "Test Widget")
        .exists()
        .expect("lookup should succeed");
    assert!(exists);
}

#[test]
fn bound_form_updates_in_place() {
    let db = Db::new();
    let saved = submit(&db, "Test Widget", 50).expect("valid form should save");

    let edit = WidgetForm::for_instance(
        saved.clone(),
        FormData::new().with("name", "Renamed").with("weight", 75),
    );
    let updated = edit.save(&db.session()).expect("update should save");

    assert_eq!(updated.id, saved.id, "update must keep identity");
    assert_eq!(widget_count(&db), 1);
    assert_eq!(
        db.session()
            .load::<Widget>()
            .by_id(saved.id.expect("saved widget has an id"))
            .one()
            .expect("updated widget should load")
            .name,
        "Renamed"
    );
}

#[test]
fn bound_form_revalidates() {
    let db = Db::new();
    let saved = submit(&db, "Test Widget", 50).expect("valid form should save");

    let edit = WidgetForm::for_instance(
        saved.clone(),
        FormData::new().with("name", "Test Widget").with("weight", 500),
    );
    let err = edit
        .save(&db.session())
        .expect_err("out-of-range update must be rejected");

    assert!(
        err.form_errors()
            .is_some_and(|e| e.contains("weight", "Weight must be 100 or less."))
    );

    let stored = db
        .session()
        .load::<Widget>()
        .by_id(saved.id.expect("saved widget has an id"))
        .one()
        .expect("original widget should still load");
    assert_eq!(stored, saved, "rejected update must leave the row unchanged");
}

#[test]
fn unsaved_instance_is_inserted() {
    let db = Db::new();

    let form = WidgetForm::for_instance(
        Widget::new("draft", 1.0),
        FormData::new().with("name", "Test Widget").with("weight", 50),
    );
    let saved = form.save(&db.session()).expect("unsaved instance should insert");

    assert!(saved.id.is_some(), "store should assign an identity");
    assert_eq!(saved.name, "Test Widget");
    assert_eq!(widget_count(&db), 1);
}

#[test]
fn updating_a_deleted_widget_is_not_found() {
    let db = Db::new();
    let saved = submit(&db, "Test Widget", 50).expect("valid form should save");

    db.session()
        .delete::<Widget>()
        .by_id(saved.id.expect("saved widget has an id"))
        .execute()
        .expect("delete should succeed");

    let err = WidgetForm::for_instance(saved, FormData::new().with("name", "x").with("weight", 1))
        .save(&db.session())
        .expect_err("update of a missing row must fail");

    let err = Error::from(err);
    assert!(err.form_errors().is_none());
    assert!(matches!(
        err,
        Error::Form(FormError::Store(ref e)) if e.is_not_found()
    ));
}

#[test]
fn session_writes_enforce_weight_range() {
    let db = Db::new();

    let err = db
        .session()
        .insert(Widget::new("Test Widget", -10.0))
        .expect_err("session insert must validate");

    assert_eq!(err.class, ErrorClass::Validation);
    assert_eq!(
        err.issues().and_then(|m| m.get("weight")),
        Some(&vec!["Weight must be positive.".to_string()])
    );
    assert_eq!(widget_count(&db), 0);
}

#[test]
fn atomic_batch_with_one_invalid_widget_writes_nothing() {
    let db = Db::new();

    let err = db
        .session()
        .insert_many(vec![
            Widget::new("a", 1.0),
            Widget::new("b", 101.0),
            Widget::new("c", 2.0),
        ])
        .expect_err("batch with an invalid widget must fail");

    assert_eq!(err.class, ErrorClass::Validation);
    assert_eq!(widget_count(&db), 0);
}

#[test]
fn raw_store_writes_bypass_validation() {
    let db = Db::new();

    let stored = db
        .store_mut()
        .expect("store should be free")
        .insert_raw(Widget::new("unchecked", 500.0))
        .expect("raw insert should not validate");
    let id = stored.id.expect("raw insert assigns an identity");

    let loaded = db
        .session()
        .load::<Widget>()
        .by_id(id)
        .one()
        .expect("raw row should load");
    assert!((loaded.weight - 500.0).abs() < f64::EPSILON);
}

#[test]
fn delete_removes_the_row() {
    let db = Db::new();
    submit(&db, "Test Widget", 50).expect("valid form should save");
    submit(&db, "Other", 5).expect("valid form should save");

    let removed = db
        .session()
        .delete::<Widget>()
        .filter_eq("name", "Test Widget")
        .execute()
        .expect("delete should succeed");

    assert_eq!(removed, 1);
    assert_eq!(widget_count(&db), 1);
    assert!(
        !db.session()
            .load::<Widget>()
            .filter_eq("name", "Test Widget")
            .exists()
            .expect("lookup should succeed")
    );
}

#[test]
fn lookup_by_weight_value() {
    let db = Db::new();
    submit(&db, "Light", 1).expect("valid form should save");
    submit(&db, "Heavy", 100).expect("valid form should save");

    let heavy = db
        .session()
        .load::<Widget>()
        .filter_eq("weight", 100.0)
        .first()
        .expect("lookup should succeed")
        .expect("a widget weighs 100");

    assert_eq!(heavy.to_string(), "Heavy");
}
