//! Ready-made objects offered by the sidebar: text styles, shapes, lines
//! and icons.

use std::f32::consts::PI;

use design_pad_config::HexColor;

use crate::object::{
    FontWeight, LineKind, ObjectKind, Point, SceneObject, ShapeKind, Style, Transform,
};

/// Where new objects are dropped on the canvas.
const DROP_LEFT: f32 = 100.0;
const DROP_TOP: f32 = 100.0;

const STAR_OUTER_RADIUS: f32 = 50.0;
const STAR_INNER_RADIUS: f32 = 25.0;

/// Width new images are scaled to.
pub const IMAGE_DROP_WIDTH: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPreset {
    Heading,
    Subheading,
    Body,
}

impl TextPreset {
    pub fn build(self, font_family: &str) -> SceneObject {
        let (text, font_size, font_weight) = match self {
            Self::Heading => ("Add a heading", 32.0, FontWeight::Bold),
            Self::Subheading => ("Add a subheading", 24.0, FontWeight::SemiBold),
            Self::Body => ("Add a little bit of body text", 16.0, FontWeight::Normal),
        };
        SceneObject::new(
            ObjectKind::Text {
                text: text.to_string(),
                font_size,
                font_weight,
                font_family: font_family.to_string(),
            },
            Transform::at(DROP_LEFT, DROP_TOP),
            Style {
                fill: Some(HexColor::BLACK),
                ..Style::default()
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePreset {
    Rectangle,
    Circle,
    Triangle,
    Star,
}

impl ShapePreset {
    pub fn build(self) -> SceneObject {
        let (shape, fill) = match self {
            Self::Rectangle => (
                ShapeKind::Rectangle {
                    width: 100.0,
                    height: 100.0,
                },
                HexColor::rgb(0x8b, 0x5c, 0xf6),
            ),
            Self::Circle => (
                ShapeKind::Circle { radius: 50.0 },
                HexColor::rgb(0x06, 0xb6, 0xd4),
            ),
            Self::Triangle => (
                ShapeKind::Triangle {
                    width: 100.0,
                    height: 100.0,
                },
                HexColor::rgb(0xf5, 0x9e, 0x0b),
            ),
            Self::Star => (
                ShapeKind::Polygon {
                    points: star_points(),
                },
                HexColor::rgb(0xef, 0x44, 0x44),
            ),
        };
        SceneObject::new(
            ObjectKind::Shape { shape },
            Transform::at(DROP_LEFT, DROP_TOP),
            Style {
                fill: Some(fill),
                ..Style::default()
            },
        )
    }
}

/// Five-pointed star: ten vertices alternating outer and inner radius.
fn star_points() -> Vec<Point> {
    (0..10)
        .map(|i| {
            let angle = i as f32 * PI / 5.0;
            let radius = if i % 2 == 0 {
                STAR_OUTER_RADIUS
            } else {
                STAR_INNER_RADIUS
            };
            Point::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePreset {
    Straight,
    Curved,
    Arrow,
}

impl LinePreset {
    pub fn build(self) -> SceneObject {
        let line = match self {
            Self::Straight => LineKind::Straight {
                from: Point::new(50.0, 100.0),
                to: Point::new(200.0, 100.0),
            },
            Self::Curved => LineKind::Curved {
                path: "M 50 100 Q 125 50 200 100".to_string(),
            },
            Self::Arrow => LineKind::Arrow {
                from: Point::new(50.0, 100.0),
                to: Point::new(180.0, 100.0),
                head_size: 20.0,
            },
        };
        SceneObject::new(
            ObjectKind::Line { line },
            Transform::default(),
            Style {
                fill: None,
                stroke: Some(HexColor::BLACK),
                stroke_width: 2.0,
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPreset {
    Heart,
    Star,
    Check,
    Arrow,
}

impl IconPreset {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Heart => "❤️",
            Self::Star => "⭐",
            Self::Check => "✅",
            Self::Arrow => "➡️",
        }
    }

    pub fn build(self) -> SceneObject {
        SceneObject::new(
            ObjectKind::Icon {
                glyph: self.glyph().to_string(),
                font_size: 48.0,
                font_family: "Arial".to_string(),
            },
            Transform::at(DROP_LEFT, DROP_TOP),
            Style::default(),
        )
    }
}

/// An image object at the drop point, not yet scaled.
pub fn image(src: &str, natural_width: f32, natural_height: f32) -> SceneObject {
    SceneObject::new(
        ObjectKind::Image {
            src: src.to_string(),
            width: natural_width,
            height: natural_height,
        },
        Transform::at(DROP_LEFT, DROP_TOP),
        Style::default(),
    )
}
