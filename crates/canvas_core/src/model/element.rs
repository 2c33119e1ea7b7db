//! Element schema.
//!
//! # Responsibility
//! - Define the canonical shape record consumed by render observers.
//! - Provide per-variant defaults and the shallow-merge used by patches.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another element.
//! - `Shape` carries the variant tag; patches can never change it.
//! - Numeric fields are stored as given (no clamping of `opacity`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Three-component vector used for positions, rotations, scales and points.
pub type Vec3 = [f64; 3];

/// Patch keys that never reach element fields.
///
/// `id` is store-assigned, `selected` is derived from scene selection, and the
/// remaining keys name the variant, which is immutable.
pub const RESERVED_PATCH_KEYS: &[&str] = &["id", "type", "variant", "elementType", "selected"];

const DEFAULT_COLOR: &str = "#ffffff";
const DEFAULT_TEXT: &str = "Text";
const DEFAULT_IMAGE_URL: &str = "/logo.jpg";

/// Opaque element identifier.
///
/// Agents may reference ids that were never issued (e.g. `select bogus-id`),
/// so this wraps an arbitrary string rather than a parsed UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Closed set of element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Circle,
    Rectangle,
    Line,
    Polygon,
    Text,
    Image,
}

impl ElementKind {
    /// All variants in protocol order.
    pub const ALL: [Self; 6] = [
        Self::Circle,
        Self::Rectangle,
        Self::Line,
        Self::Polygon,
        Self::Text,
        Self::Image,
    ];

    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Line => "line",
            Self::Polygon => "polygon",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = UnknownElementKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownElementKind(value.to_string()))
    }
}

/// Raised when a variant name is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownElementKind(pub String);

impl Display for UnknownElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown element type: {}", self.0)
    }
}

impl Error for UnknownElementKind {}

/// Variant-specific geometry and styling.
///
/// Serialized with a `type` tag so the flattened element reads as one flat
/// object on the wire, e.g. `{"type":"circle","radius":1,...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Shape {
    Circle {
        radius: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        segments: Option<f64>,
        filled: bool,
        line_width: f64,
    },
    Rectangle {
        width: f64,
        height: f64,
        filled: bool,
        line_width: f64,
    },
    Line {
        points: Vec<Vec3>,
        line_width: f64,
    },
    /// Fewer than three points render as an outline only.
    Polygon {
        points: Vec<Vec3>,
        filled: bool,
        line_width: f64,
    },
    Text {
        text: String,
        font_size: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_color: Option<String>,
    },
    /// Only the URL is stored; fetching is the renderer's job.
    Image { url: String, width: f64, height: f64 },
}

impl Shape {
    /// Returns the default geometry for `kind`.
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Circle => Self::Circle {
                radius: 1.0,
                segments: None,
                filled: true,
                line_width: 1.0,
            },
            ElementKind::Rectangle => Self::Rectangle {
                width: 2.0,
                height: 1.0,
                filled: true,
                line_width: 1.0,
            },
            ElementKind::Line => Self::Line {
                points: vec![[0.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
                line_width: 1.0,
            },
            ElementKind::Polygon => Self::Polygon {
                points: vec![
                    [-1.0, -1.0, 0.0],
                    [1.0, -1.0, 0.0],
                    [1.0, 1.0, 0.0],
                    [-1.0, 1.0, 0.0],
                ],
                filled: true,
                line_width: 1.0,
            },
            ElementKind::Text => Self::Text {
                text: DEFAULT_TEXT.to_string(),
                font_size: 1.0,
                font_color: None,
            },
            ElementKind::Image => Self::Image {
                url: DEFAULT_IMAGE_URL.to_string(),
                width: 3.0,
                height: 2.0,
            },
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Circle { .. } => ElementKind::Circle,
            Self::Rectangle { .. } => ElementKind::Rectangle,
            Self::Line { .. } => ElementKind::Line,
            Self::Polygon { .. } => ElementKind::Polygon,
            Self::Text { .. } => ElementKind::Text,
            Self::Image { .. } => ElementKind::Image,
        }
    }
}

/// Every element field except the store-assigned id.
///
/// This is what `ElementStore::add` accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementProps {
    #[serde(flatten)]
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: String,
    pub opacity: f64,
}

impl ElementProps {
    /// Creates props for `kind` with every field at its default.
    pub fn new(kind: ElementKind) -> Self {
        Self::with_shape(Shape::default_for(kind))
    }

    /// Wraps explicit geometry with the shared transform/style defaults.
    pub fn with_shape(shape: Shape) -> Self {
        Self {
            shape,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
            color: DEFAULT_COLOR.to_string(),
            opacity: 1.0,
        }
    }

    /// Builds props for `kind`, filling every field absent from `params`
    /// with the variant default.
    ///
    /// # Errors
    /// - Returns an error when a supplied value does not fit its field type.
    pub fn from_params(
        kind: ElementKind,
        params: Option<&Map<String, Value>>,
    ) -> Result<Self, serde_json::Error> {
        let defaults = Self::new(kind);
        match params {
            Some(patch) => defaults.merged(patch),
            None => Ok(defaults),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.shape.kind()
    }

    /// Returns a copy with `patch` shallow-merged over the current fields.
    ///
    /// Keys listed in `RESERVED_PATCH_KEYS` are skipped. Keys that are not
    /// fields of this variant are dropped.
    ///
    /// # Errors
    /// - Returns an error when a patched value does not fit its field type;
    ///   `self` is never modified.
    pub fn merged(&self, patch: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut value {
            for (key, field) in patch {
                if is_reserved_patch_key(key) {
                    continue;
                }
                fields.insert(key.clone(), field.clone());
            }
        }
        serde_json::from_value(value)
    }
}

/// Returns whether `key` must be stripped from create params and patches.
pub fn is_reserved_patch_key(key: &str) -> bool {
    RESERVED_PATCH_KEYS.contains(&key)
}

/// One scene element as stored.
///
/// `selected` is not stored here; the scene derives it from its selection
/// key (see `store::SceneSnapshot`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Element {
    pub fn new(id: ElementId, props: ElementProps) -> Self {
        Self { id, props }
    }

    pub fn kind(&self) -> ElementKind {
        self.props.kind()
    }
}
