//! Scene objects: text, shapes, lines, icons and images.

use design_pad_config::HexColor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};

/// Unique identifier for a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Create a new unique object ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 2D point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "600")]
    SemiBold,
    #[serde(rename = "bold")]
    Bold,
}

/// Closed shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle { width: f32, height: f32 },
    Circle { radius: f32 },
    Triangle { width: f32, height: f32 },
    /// Arbitrary polygon, points relative to the object origin.
    Polygon { points: Vec<Point> },
}

/// Open strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "line", rename_all = "snake_case")]
pub enum LineKind {
    Straight { from: Point, to: Point },
    /// SVG path data, e.g. `M 50 100 Q 125 50 200 100`.
    Curved { path: String },
    Arrow { from: Point, to: Point, head_size: f32 },
}

/// What an object is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    Text {
        text: String,
        font_size: f32,
        font_weight: FontWeight,
        font_family: String,
    },
    Shape {
        shape: ShapeKind,
    },
    Line {
        line: LineKind,
    },
    /// Emoji or symbol glyph drawn as text.
    Icon {
        glyph: String,
        font_size: f32,
        font_family: String,
    },
    /// Raster image; `width`/`height` are the natural pixel size.
    Image { src: String, width: f32, height: f32 },
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Shape { .. } => "shape",
            Self::Line { .. } => "line",
            Self::Icon { .. } => "icon",
            Self::Image { .. } => "image",
        }
    }

    /// Unscaled bounding size, for kinds whose size is known without layout.
    pub fn intrinsic_size(&self) -> Option<(f32, f32)> {
        match self {
            Self::Shape { shape } => match shape {
                ShapeKind::Rectangle { width, height } | ShapeKind::Triangle { width, height } => {
                    Some((*width, *height))
                }
                ShapeKind::Circle { radius } => Some((radius * 2.0, radius * 2.0)),
                ShapeKind::Polygon { points } => bounding_size(points),
            },
            Self::Line { line } => match line {
                LineKind::Straight { from, to } | LineKind::Arrow { from, to, .. } => {
                    bounding_size(&[*from, *to])
                }
                LineKind::Curved { .. } => None,
            },
            Self::Image { width, height, .. } => Some((*width, *height)),
            Self::Text { .. } | Self::Icon { .. } => None,
        }
    }
}

fn bounding_size(points: &[Point]) -> Option<(f32, f32)> {
    let first = points.first()?;
    let (mut min, mut max) = (*first, *first);
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((max.x - min.x, max.y - min.y))
}

/// Position, scale, rotation and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub left: f32,
    pub top: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Rotation in degrees, `0.0..360.0`.
    pub angle: f32,
    /// `0.0..=1.0`
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            opacity: 1.0,
        }
    }
}

impl Transform {
    pub fn at(left: f32, top: f32) -> Self {
        Self {
            left,
            top,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    pub fill: Option<HexColor>,
    pub stroke: Option<HexColor>,
    pub stroke_width: f32,
}

/// Which edge a resize targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// A single editable property, as set from the properties panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperty {
    Left(f32),
    Top(f32),
    Angle(f32),
    Opacity(f32),
    FontSize(f32),
    FontFamily(String),
    Fill(HexColor),
    Stroke(HexColor),
    StrokeWidth(f32),
}

impl ObjectProperty {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left(_) => "left",
            Self::Top(_) => "top",
            Self::Angle(_) => "angle",
            Self::Opacity(_) => "opacity",
            Self::FontSize(_) => "fontSize",
            Self::FontFamily(_) => "fontFamily",
            Self::Fill(_) => "fill",
            Self::Stroke(_) => "stroke",
            Self::StrokeWidth(_) => "strokeWidth",
        }
    }
}

/// An object placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
    pub transform: Transform,
    pub style: Style,
}

impl SceneObject {
    pub fn new(kind: ObjectKind, transform: Transform, style: Style) -> Self {
        Self {
            id: ObjectId::new(),
            kind,
            transform,
            style,
        }
    }

    /// Copy of this object under a fresh ID, shifted by `offset` on both axes.
    pub fn duplicate(&self, offset: f32) -> Self {
        let mut copy = self.clone();
        copy.id = ObjectId::new();
        copy.transform.left += offset;
        copy.transform.top += offset;
        copy
    }

    /// Applies a property change.
    ///
    /// The value is validated before anything is written, so on error the
    /// object is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the property does not fit this object kind or
    /// the value is out of range.
    pub fn apply(&mut self, property: ObjectProperty) -> EditorResult<()> {
        let name = property.name();
        let kind = self.kind.name();
        let mismatch = || EditorError::PropertyMismatch {
            property: name,
            kind,
        };

        match property {
            ObjectProperty::Left(v) => self.transform.left = finite(name, v)?,
            ObjectProperty::Top(v) => self.transform.top = finite(name, v)?,
            ObjectProperty::Angle(v) => self.transform.angle = finite(name, v)?.rem_euclid(360.0),
            ObjectProperty::Opacity(v) => self.transform.opacity = finite(name, v)?.clamp(0.0, 1.0),
            ObjectProperty::FontSize(v) => {
                let v = positive(name, v)?;
                match &mut self.kind {
                    ObjectKind::Text { font_size, .. } | ObjectKind::Icon { font_size, .. } => {
                        *font_size = v;
                    }
                    _ => return Err(mismatch()),
                }
            }
            ObjectProperty::FontFamily(family) => match &mut self.kind {
                ObjectKind::Text { font_family, .. } | ObjectKind::Icon { font_family, .. } => {
                    *font_family = family;
                }
                _ => return Err(mismatch()),
            },
            ObjectProperty::Fill(color) => match self.kind {
                ObjectKind::Text { .. } | ObjectKind::Icon { .. } | ObjectKind::Shape { .. } => {
                    self.style.fill = Some(color);
                }
                _ => return Err(mismatch()),
            },
            ObjectProperty::Stroke(color) => match self.kind {
                ObjectKind::Shape { .. } | ObjectKind::Line { .. } => {
                    self.style.stroke = Some(color);
                }
                _ => return Err(mismatch()),
            },
            ObjectProperty::StrokeWidth(v) => {
                let v = finite(name, v)?;
                if v < 0.0 {
                    return Err(EditorError::InvalidValue {
                        property: name,
                        value: v,
                    });
                }
                match self.kind {
                    ObjectKind::Shape { .. } | ObjectKind::Line { .. } => {
                        self.style.stroke_width = v;
                    }
                    _ => return Err(mismatch()),
                }
            }
        }
        Ok(())
    }

    /// Scales uniformly so the chosen edge measures `value` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive values and for objects without an
    /// intrinsic size (text and icons) or with a zero-length edge.
    pub fn scale_to(&mut self, dimension: Dimension, value: f32) -> EditorResult<()> {
        let property = match dimension {
            Dimension::Width => "width",
            Dimension::Height => "height",
        };
        let value = positive(property, value)?;
        let (width, height) = self
            .kind
            .intrinsic_size()
            .ok_or(EditorError::NoIntrinsicSize(self.kind.name()))?;
        let base = match dimension {
            Dimension::Width => width,
            Dimension::Height => height,
        };
        if base <= 0.0 {
            return Err(EditorError::NoIntrinsicSize(self.kind.name()));
        }
        let scale = value / base;
        if !scale.is_finite() {
            return Err(EditorError::InvalidValue { property, value });
        }
        self.transform.scale_x = scale;
        self.transform.scale_y = scale;
        Ok(())
    }

    pub fn scale_to_width(&mut self, width: f32) -> EditorResult<()> {
        self.scale_to(Dimension::Width, width)
    }

    pub fn scale_to_height(&mut self, height: f32) -> EditorResult<()> {
        self.scale_to(Dimension::Height, height)
    }

    /// Current on-canvas size, when the kind has an intrinsic size.
    pub fn scaled_size(&self) -> Option<(f32, f32)> {
        let (w, h) = self.kind.intrinsic_size()?;
        Some((w * self.transform.scale_x, h * self.transform.scale_y))
    }
}

fn finite(property: &'static str, value: f32) -> EditorResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EditorError::InvalidValue { property, value })
    }
}

fn positive(property: &'static str, value: f32) -> EditorResult<f32> {
    match finite(property, value) {
        Ok(v) if v > 0.0 => Ok(v),
        _ => Err(EditorError::InvalidValue { property, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: f32, height: f32) -> SceneObject {
        SceneObject::new(
            ObjectKind::Shape {
                shape: ShapeKind::Rectangle { width, height },
            },
            Transform::at(100.0, 100.0),
            Style::default(),
        )
    }

    fn text() -> SceneObject {
        SceneObject::new(
            ObjectKind::Text {
                text: "Hello".into(),
                font_size: 16.0,
                font_weight: FontWeight::Normal,
                font_family: "Inter".into(),
            },
            Transform::default(),
            Style::default(),
        )
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ObjectId::new(), ObjectId::new());
    }

    #[test]
    fn test_common_properties_apply_to_every_kind() {
        let mut obj = text();
        obj.apply(ObjectProperty::Left(12.0)).unwrap();
        obj.apply(ObjectProperty::Top(34.0)).unwrap();
        obj.apply(ObjectProperty::Angle(400.0)).unwrap();
        obj.apply(ObjectProperty::Opacity(1.7)).unwrap();
        assert_eq!(obj.transform.left, 12.0);
        assert_eq!(obj.transform.top, 34.0);
        assert!((obj.transform.angle - 40.0).abs() < 1e-4);
        assert_eq!(obj.transform.opacity, 1.0);
    }

    #[test]
    fn test_negative_angle_wraps() {
        let mut obj = rect(10.0, 10.0);
        obj.apply(ObjectProperty::Angle(-90.0)).unwrap();
        assert!((obj.transform.angle - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_font_size_on_shape_is_mismatch() {
        let mut obj = rect(10.0, 10.0);
        let before = obj.clone();
        let err = obj.apply(ObjectProperty::FontSize(20.0)).unwrap_err();
        assert!(matches!(
            err,
            EditorError::PropertyMismatch {
                property: "fontSize",
                kind: "shape"
            }
        ));
        assert_eq!(obj, before);
    }

    #[test]
    fn test_text_properties() {
        let mut obj = text();
        obj.apply(ObjectProperty::FontSize(40.0)).unwrap();
        obj.apply(ObjectProperty::FontFamily("Arial".into()))
            .unwrap();
        obj.apply(ObjectProperty::Fill(HexColor::rgb(255, 0, 0)))
            .unwrap();
        match &obj.kind {
            ObjectKind::Text {
                font_size,
                font_family,
                ..
            } => {
                assert_eq!(*font_size, 40.0);
                assert_eq!(font_family, "Arial");
            }
            other => panic!("unexpected kind {other:?}"),
        }
        assert_eq!(obj.style.fill, Some(HexColor::rgb(255, 0, 0)));
        assert!(obj.apply(ObjectProperty::Stroke(HexColor::BLACK)).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut obj = rect(10.0, 10.0);
        assert!(obj.apply(ObjectProperty::Left(f32::NAN)).is_err());
        assert!(obj.apply(ObjectProperty::StrokeWidth(-1.0)).is_err());
        let mut t = text();
        assert!(t.apply(ObjectProperty::FontSize(0.0)).is_err());
    }

    #[test]
    fn test_scale_to_width_is_uniform() {
        let mut obj = rect(100.0, 50.0);
        obj.scale_to_width(200.0).unwrap();
        assert_eq!(obj.transform.scale_x, 2.0);
        assert_eq!(obj.transform.scale_y, 2.0);
        assert_eq!(obj.scaled_size(), Some((200.0, 100.0)));
    }

    #[test]
    fn test_scale_to_height_on_circle() {
        let mut obj = SceneObject::new(
            ObjectKind::Shape {
                shape: ShapeKind::Circle { radius: 50.0 },
            },
            Transform::default(),
            Style::default(),
        );
        obj.scale_to_height(50.0).unwrap();
        assert_eq!(obj.transform.scale_y, 0.5);
    }

    #[test]
    fn test_scale_text_has_no_intrinsic_size() {
        let mut obj = text();
        assert!(matches!(
            obj.scale_to(Dimension::Width, 100.0),
            Err(EditorError::NoIntrinsicSize("text"))
        ));
    }

    #[test]
    fn test_scale_flat_line_height_fails() {
        let mut obj = SceneObject::new(
            ObjectKind::Line {
                line: LineKind::Straight {
                    from: Point::new(50.0, 100.0),
                    to: Point::new(200.0, 100.0),
                },
            },
            Transform::default(),
            Style::default(),
        );
        assert!(obj.scale_to(Dimension::Height, 10.0).is_err());
        obj.scale_to(Dimension::Width, 300.0).unwrap();
        assert_eq!(obj.transform.scale_x, 2.0);
    }

    #[test]
    fn test_scale_overflowing_to_infinity_is_rejected() {
        let mut obj = rect(1e-40, 1.0);
        let err = obj.scale_to_width(200.0).unwrap_err();
        assert!(matches!(err, EditorError::InvalidValue { property: "width", .. }));
        assert_eq!(obj.transform.scale_x, 1.0);
        assert_eq!(obj.transform.scale_y, 1.0);
    }

    #[test]
    fn test_duplicate_gets_new_id_and_offset() {
        let obj = rect(10.0, 10.0);
        let copy = obj.duplicate(10.0);
        assert_ne!(copy.id, obj.id);
        assert_eq!(copy.transform.left, 110.0);
        assert_eq!(copy.transform.top, 110.0);
        assert_eq!(copy.kind, obj.kind);
    }

    #[test]
    fn test_json_shape_is_tagged() {
        let obj = rect(100.0, 100.0);
        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["type"], "shape");
        assert_eq!(value["shape"]["shape"], "rectangle");
        let back: SceneObject = serde_json::from_value(value).unwrap();
        assert_eq!(back, obj);
    }
}
