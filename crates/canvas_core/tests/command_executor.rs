use canvas_core::{
    Command, CommandEffect, CommandError, CommandExecutor, CommandVerb, ElementId, ElementKind,
    ElementStore, InMemoryElementStore, Shape,
};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

fn executor() -> CommandExecutor<InMemoryElementStore> {
    CommandExecutor::new(InMemoryElementStore::new())
}

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn create(executor: &mut CommandExecutor<InMemoryElementStore>, kind: &str) -> ElementId {
    match executor
        .execute(&Command::new("create").with_element_type(kind))
        .unwrap()
    {
        CommandEffect::Created(id) => id,
        other => panic!("unexpected effect: {other:?}"),
    }
}

#[test]
fn create_requires_element_type() {
    let mut executor = executor();

    let err = executor.execute(&Command::new("create")).unwrap_err();
    assert_eq!(err, CommandError::MissingElementType);
    assert!(executor.store().is_empty());
}

#[test]
fn create_rejects_unknown_element_type() {
    let mut executor = executor();

    let err = executor
        .execute(&Command::new("create").with_element_type("hexagon"))
        .unwrap_err();
    assert_eq!(err, CommandError::UnknownElementType("hexagon".to_string()));
    assert!(executor.store().is_empty());
}

#[test]
fn unknown_verb_fails_without_mutation() {
    let mut executor = executor();
    create(&mut executor, "circle");

    let err = executor
        .execute(&Command::new("explode").with_element_id("x"))
        .unwrap_err();
    assert_eq!(err, CommandError::UnknownVerb("explode".to_string()));
    assert_eq!(executor.store().len(), 1);
}

#[test]
fn create_fills_variant_defaults() {
    let mut executor = executor();

    let id = create(&mut executor, "text");
    let element = executor.store().get(&id).unwrap();
    assert_eq!(
        element.props.shape,
        Shape::Text {
            text: "Text".to_string(),
            font_size: 1.0,
            font_color: None,
        }
    );
    assert_eq!(element.props.color, "#ffffff");
    assert_eq!(element.props.opacity, 1.0);

    let id = create(&mut executor, "Image");
    assert_eq!(executor.store().get(&id).unwrap().kind(), ElementKind::Image);
}

#[test]
fn create_applies_params_over_defaults() {
    let mut executor = executor();

    let command = Command::new("create")
        .with_element_type("polygon")
        .with_params(params(json!({
            "points": [[0, 0, 0], [2, 0, 0], [1, 2, 0]],
            "filled": false,
            "rotation": [0, 0, 1.57]
        })));
    let effect = executor.execute(&command).unwrap();
    let id = effect.element_id().unwrap().clone();

    let element = executor.store().get(&id).unwrap();
    assert_eq!(element.props.rotation, [0.0, 0.0, 1.57]);
    match &element.props.shape {
        Shape::Polygon {
            points,
            filled,
            line_width,
        } => {
            assert_eq!(points.len(), 3);
            assert!(!filled);
            assert_eq!(*line_width, 1.0);
        }
        other => panic!("unexpected shape: {other:?}"),
    }
}

#[test]
fn create_accepts_float_segment_count() {
    let mut executor = executor();

    let command = Command::new("create")
        .with_element_type("circle")
        .with_params(params(json!({"segments": 32.0})));
    let id = executor.execute(&command).unwrap().element_id().unwrap().clone();

    assert!(matches!(
        executor.store().get(&id).unwrap().props.shape,
        Shape::Circle { segments: Some(segments), .. } if segments == 32.0
    ));
}

#[test]
fn create_with_ill_typed_params_is_malformed() {
    let mut executor = executor();

    let command = Command::new("create")
        .with_element_type("circle")
        .with_params(params(json!({"radius": "big"})));
    let err = executor.execute(&command).unwrap_err();
    assert!(matches!(err, CommandError::MalformedCommand(_)));
    assert!(executor.store().is_empty());
}

#[test]
fn every_create_issues_a_new_id() {
    let mut executor = executor();
    let mut issued = HashSet::new();

    for kind in ["circle", "rectangle", "line", "polygon", "text", "image"] {
        let before = executor.store().len();
        let id = create(&mut executor, kind);
        assert_eq!(executor.store().len(), before + 1);
        assert!(issued.insert(id));
    }
    executor.execute(&Command::new("clear")).unwrap();
    let id = create(&mut executor, "circle");
    assert!(issued.insert(id));
}

#[test]
fn update_cannot_change_variant() {
    let mut executor = executor();
    let id = create(&mut executor, "circle");

    let command = Command::new("update")
        .with_element_id(id.as_str())
        .with_params(params(json!({
            "type": "rectangle",
            "variant": "rectangle",
            "elementType": "rectangle",
            "radius": 4
        })));
    let effect = executor.execute(&command).unwrap();

    assert_eq!(effect, CommandEffect::Updated(id.clone()));
    let element = executor.store().get(&id).unwrap();
    assert_eq!(element.kind(), ElementKind::Circle);
    assert!(matches!(element.props.shape, Shape::Circle { radius, .. } if radius == 4.0));
}

#[test]
fn update_requires_reference() {
    let mut executor = executor();

    let err = executor
        .execute(&Command::new("update").with_params(params(json!({"color": "#000000"}))))
        .unwrap_err();
    assert_eq!(err, CommandError::MissingReference(CommandVerb::Update));
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut executor = executor();
    let id = create(&mut executor, "rectangle");
    let before = executor.store().snapshot();

    let err = executor
        .execute(
            &Command::new("update")
                .with_element_id("bogus-id")
                .with_params(params(json!({"color": "#00ff00"}))),
        )
        .unwrap_err();

    assert_eq!(err, CommandError::NotFound(ElementId::from("bogus-id")));
    assert_eq!(executor.store().snapshot(), before);
    assert_eq!(executor.store().get(&id).unwrap().props.color, "#ffffff");
}

#[test]
fn update_with_ill_typed_patch_is_malformed() {
    let mut executor = executor();
    let id = create(&mut executor, "line");
    let before = executor.store().snapshot();

    let err = executor
        .execute(
            &Command::new("update")
                .with_element_id(id.as_str())
                .with_params(params(json!({"lineWidth": [1, 2]}))),
        )
        .unwrap_err();
    assert!(matches!(err, CommandError::MalformedCommand(_)));
    assert_eq!(executor.store().snapshot(), before);
}

#[test]
fn delete_is_idempotent() {
    let mut executor = executor();
    let id = create(&mut executor, "circle");
    create(&mut executor, "circle");
    let delete = Command::new("delete").with_element_id(id.as_str());

    let first = executor.execute(&delete).unwrap();
    assert_eq!(
        first,
        CommandEffect::Deleted {
            id: id.clone(),
            existed: true
        }
    );
    let size_after_first = executor.store().len();

    let second = executor.execute(&delete).unwrap();
    assert_eq!(second, CommandEffect::Deleted { id, existed: false });
    assert_eq!(executor.store().len(), size_after_first);
    assert_eq!(size_after_first, 1);
}

#[test]
fn delete_requires_reference() {
    let mut executor = executor();
    let err = executor.execute(&Command::new("delete")).unwrap_err();
    assert_eq!(err, CommandError::MissingReference(CommandVerb::Delete));
}

#[test]
fn select_moves_selection_between_elements() {
    let mut executor = executor();
    let a = create(&mut executor, "circle");
    let b = create(&mut executor, "rectangle");

    executor
        .execute(&Command::new("select").with_element_id(a.as_str()))
        .unwrap();
    let effect = executor
        .execute(&Command::new("select").with_element_id(b.as_str()))
        .unwrap();

    assert_eq!(effect, CommandEffect::Selected(b.clone()));
    let store = executor.store();
    assert_eq!(store.selected_id(), Some(&b));
    assert!(store.is_selected(&b));
    assert!(!store.is_selected(&a));
    assert_eq!(store.snapshot().selected().count(), 1);
}

#[test]
fn select_does_not_verify_existence() {
    let mut executor = executor();
    create(&mut executor, "circle");

    let effect = executor
        .execute(&Command::new("select").with_element_id("nowhere"))
        .unwrap();
    assert_eq!(effect, CommandEffect::Selected(ElementId::from("nowhere")));
    assert_eq!(
        executor.store().selected_id(),
        Some(&ElementId::from("nowhere"))
    );
    assert_eq!(executor.store().snapshot().selected().count(), 0);
}

#[test]
fn select_requires_reference() {
    let mut executor = executor();
    let err = executor.execute(&Command::new("select")).unwrap_err();
    assert_eq!(err, CommandError::MissingReference(CommandVerb::Select));
}

#[test]
fn deselect_clears_selection() {
    let mut executor = executor();
    let id = create(&mut executor, "text");
    executor
        .execute(&Command::new("select").with_element_id(id.as_str()))
        .unwrap();

    assert_eq!(
        executor.execute(&Command::new("deselect")).unwrap(),
        CommandEffect::Deselected
    );
    assert_eq!(
        executor.execute(&Command::new("deselect")).unwrap(),
        CommandEffect::Deselected
    );
    assert_eq!(executor.store().selected_id(), None);
    assert_eq!(executor.store().snapshot().selected().count(), 0);
}

#[test]
fn clear_removes_everything() {
    let mut executor = executor();
    let id = create(&mut executor, "circle");
    create(&mut executor, "image");
    executor
        .execute(&Command::new("select").with_element_id(id.as_str()))
        .unwrap();

    let effect = executor.execute(&Command::new("clear")).unwrap();
    assert_eq!(effect, CommandEffect::Cleared { removed: 2 });
    assert_eq!(effect.element_id(), None);
    assert!(executor.store().is_empty());
    assert_eq!(executor.store().selected_id(), None);
}
