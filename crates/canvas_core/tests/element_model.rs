use canvas_core::{Element, ElementId, ElementKind, ElementProps, Shape};
use serde_json::json;

#[test]
fn props_new_sets_shared_defaults() {
    let props = ElementProps::new(ElementKind::Circle);

    assert_eq!(props.position, [0.0, 0.0, 0.0]);
    assert_eq!(props.rotation, [0.0, 0.0, 0.0]);
    assert_eq!(props.scale, [1.0, 1.0, 1.0]);
    assert_eq!(props.color, "#ffffff");
    assert_eq!(props.opacity, 1.0);
    assert_eq!(
        props.shape,
        Shape::Circle {
            radius: 1.0,
            segments: None,
            filled: true,
            line_width: 1.0,
        }
    );
}

#[test]
fn variant_defaults_match_protocol() {
    assert_eq!(
        Shape::default_for(ElementKind::Rectangle),
        Shape::Rectangle {
            width: 2.0,
            height: 1.0,
            filled: true,
            line_width: 1.0,
        }
    );
    assert_eq!(
        Shape::default_for(ElementKind::Line),
        Shape::Line {
            points: vec![[0.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
            line_width: 1.0,
        }
    );
    assert_eq!(
        Shape::default_for(ElementKind::Text),
        Shape::Text {
            text: "Text".to_string(),
            font_size: 1.0,
            font_color: None,
        }
    );
    assert_eq!(
        Shape::default_for(ElementKind::Image),
        Shape::Image {
            url: "/logo.jpg".to_string(),
            width: 3.0,
            height: 2.0,
        }
    );
    for kind in ElementKind::ALL {
        assert_eq!(Shape::default_for(kind).kind(), kind);
    }
}

#[test]
fn element_serializes_as_flat_wire_object() {
    let element = Element::new(
        ElementId::from("el-1"),
        ElementProps::new(ElementKind::Rectangle),
    );

    let json = serde_json::to_value(&element).unwrap();
    assert_eq!(json["id"], "el-1");
    assert_eq!(json["type"], "rectangle");
    assert_eq!(json["width"], 2.0);
    assert_eq!(json["lineWidth"], 1.0);
    assert_eq!(json["scale"], json!([1.0, 1.0, 1.0]));
    assert!(json.get("selected").is_none());

    let decoded: Element = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, element);
}

#[test]
fn optional_fields_are_omitted_when_unset() {
    let json = serde_json::to_value(ElementProps::new(ElementKind::Text)).unwrap();
    assert_eq!(json["fontSize"], 1.0);
    assert!(json.get("fontColor").is_none());
}

#[test]
fn from_params_overlays_defaults() {
    let params = json!({"radius": 2, "segments": 48, "color": "#ff0000", "position": [1, 2, 3]});
    let props = ElementProps::from_params(ElementKind::Circle, params.as_object()).unwrap();

    assert_eq!(props.color, "#ff0000");
    assert_eq!(props.position, [1.0, 2.0, 3.0]);
    assert_eq!(props.opacity, 1.0);
    assert_eq!(
        props.shape,
        Shape::Circle {
            radius: 2.0,
            segments: Some(48.0),
            filled: true,
            line_width: 1.0,
        }
    );
}

#[test]
fn from_params_ignores_fields_of_other_variants() {
    let params = json!({"width": 9, "text": "ignored"});
    let props = ElementProps::from_params(ElementKind::Circle, params.as_object()).unwrap();
    assert_eq!(props, ElementProps::new(ElementKind::Circle));
}

#[test]
fn opacity_is_not_clamped() {
    let params = json!({"opacity": 3.5});
    let props = ElementProps::from_params(ElementKind::Image, params.as_object()).unwrap();
    assert_eq!(props.opacity, 3.5);
}

#[test]
fn from_params_rejects_wrong_value_types() {
    let params = json!({"points": "not a list"});
    assert!(ElementProps::from_params(ElementKind::Line, params.as_object()).is_err());
}

#[test]
fn generated_ids_are_distinct() {
    let a = ElementId::generate();
    let b = ElementId::generate();
    assert_ne!(a, b);
    assert!(!a.as_str().is_empty());
}
