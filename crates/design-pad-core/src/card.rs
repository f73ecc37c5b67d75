//! Invitation cards: SVG templates with `{{key}}` placeholders filled from
//! a form, plus the text layout used by the card preview.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use design_pad_config::HexColor;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CARD_COLOR: &str = "#800000";
pub const DEFAULT_CARD_BORDER: &str = "floral";
pub const DEFAULT_CARD_FONT: &str = "Mukta";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid"));

/// Values entered for an invitation card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFields {
    pub name: String,
    pub heading: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub invitor: String,
    pub coordinator: String,
    pub color: String,
    pub border: String,
    pub font: String,
}

impl CardFields {
    /// Fills empty color, border and font with the card defaults.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        for (value, default) in [
            (&mut self.color, DEFAULT_CARD_COLOR),
            (&mut self.border, DEFAULT_CARD_BORDER),
            (&mut self.font, DEFAULT_CARD_FONT),
        ] {
            if value.trim().is_empty() {
                *value = default.to_string();
            }
        }
        self
    }

    /// Value for a placeholder key, or `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "heading" => &self.heading,
            "date" => &self.date,
            "time" => &self.time,
            "venue" => &self.venue,
            "invitor" => &self.invitor,
            "coordinator" => &self.coordinator,
            "color" => &self.color,
            "border" => &self.border,
            "font" => &self.font,
            _ => return None,
        };
        Some(value)
    }
}

/// Replaces every known `{{key}}` in `svg` with the escaped field value.
///
/// Unknown placeholders are left as they are. Defaults are applied to
/// color, border and font before filling.
pub fn fill_card_template(svg: &str, fields: &CardFields) -> String {
    let fields = fields.clone().with_defaults();
    PLACEHOLDER
        .replace_all(svg, |caps: &Captures| match fields.get(&caps[1]) {
            Some(value) => escape_xml(value).into_owned(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Card types and the template file each one renders from.
#[derive(Debug, Clone)]
pub struct CardCatalog {
    root: PathBuf,
    templates: BTreeMap<String, String>,
}

impl CardCatalog {
    /// A catalog rooted at `root` with the wedding card registered.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut catalog = Self {
            root: root.into(),
            templates: BTreeMap::new(),
        };
        catalog.register("विवाह", "wedding.svg");
        catalog
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registers (or replaces) a card type.
    pub fn register(&mut self, kind: impl Into<String>, file_name: impl Into<String>) {
        self.templates.insert(kind.into(), file_name.into());
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn template_path(&self, kind: &str) -> Option<PathBuf> {
        self.templates.get(kind).map(|file| self.root.join(file))
    }

    /// Reads the raw SVG template for `kind`.
    pub fn load(&self, kind: &str) -> Result<String> {
        let Some(path) = self.template_path(kind) else {
            bail!("Unknown card type: {kind}");
        };
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read card template {}", path.display()))
    }

    /// Loads the template for `kind` and fills it with `fields`.
    pub fn render(&self, kind: &str, fields: &CardFields) -> Result<String> {
        let svg = self.load(kind)?;
        tracing::debug!("Rendering {kind} card");
        Ok(fill_card_template(&svg, fields))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One line of preview text and where it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: TextAlign,
}

/// Preview text layout over a card image of a given width.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPreviewLayout {
    pub width: f32,
    pub align: TextAlign,
    /// Pixel size shared by every preview line.
    pub font_size: f32,
    pub font_color: HexColor,
    pub font_family: String,
}

impl CardPreviewLayout {
    const MARGIN: f32 = 50.0;
    const FIRST_LINE_Y: f32 = 100.0;
    const LINE_SPACING: f32 = 50.0;
    const DEFAULT_FONT_SIZE: f32 = 24.0;

    /// Layout in the card's default maroon Mukta at 24px.
    pub fn new(width: f32, align: TextAlign) -> Self {
        Self {
            width,
            align,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_color: HexColor::rgb(0x80, 0x00, 0x00),
            font_family: DEFAULT_CARD_FONT.to_string(),
        }
    }

    #[must_use]
    pub fn with_font(mut self, size: f32, color: HexColor, family: impl Into<String>) -> Self {
        self.font_size = size;
        self.font_color = color;
        self.font_family = family.into();
        self
    }

    /// CSS font shorthand for the preview text, e.g. `24px Mukta`.
    pub fn font_css(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }

    /// Anchor x for the current alignment.
    pub fn anchor_x(&self) -> f32 {
        match self.align {
            TextAlign::Left => Self::MARGIN,
            TextAlign::Center => self.width / 2.0,
            TextAlign::Right => self.width - Self::MARGIN,
        }
    }

    /// Name, date, time and venue, top to bottom.
    pub fn placements(&self, fields: &CardFields) -> Vec<TextPlacement> {
        let x = self.anchor_x();
        [&fields.name, &fields.date, &fields.time, &fields.venue]
            .into_iter()
            .enumerate()
            .map(|(i, text)| TextPlacement {
                text: text.clone(),
                x,
                y: Self::FIRST_LINE_Y + i as f32 * Self::LINE_SPACING,
                align: self.align,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fields() -> CardFields {
        CardFields {
            name: "Asha & Ravi".to_string(),
            heading: "शुभ विवाह".to_string(),
            date: "2026-12-01".to_string(),
            time: "18:00".to_string(),
            venue: "Garden Hall".to_string(),
            ..CardFields::default()
        }
    }

    #[test]
    fn test_defaults_fill_only_empty_values() {
        let f = CardFields {
            color: "#003366".to_string(),
            border: "  ".to_string(),
            ..CardFields::default()
        }
        .with_defaults();
        assert_eq!(f.color, "#003366");
        assert_eq!(f.border, "floral");
        assert_eq!(f.font, "Mukta");
    }

    #[test]
    fn test_fill_replaces_all_occurrences() {
        let svg = "<text>{{name}}</text><title>{{name}}</title><text>{{date}}</text>";
        let out = fill_card_template(svg, &fields());
        assert_eq!(
            out,
            "<text>Asha &amp; Ravi</text><title>Asha &amp; Ravi</title><text>2026-12-01</text>"
        );
    }

    #[test]
    fn test_fill_applies_style_defaults() {
        let svg = r#"<text fill="{{color}}" font-family="{{font}}" class="{{border}}"/>"#;
        let out = fill_card_template(svg, &CardFields::default());
        assert_eq!(
            out,
            r##"<text fill="#800000" font-family="Mukta" class="floral"/>"##
        );
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let out = fill_card_template("{{name}} {{rsvp}} {{ name }}", &fields());
        assert_eq!(out, "Asha &amp; Ravi {{rsvp}} {{ name }}");
    }

    #[test]
    fn test_empty_fields_blank_out_placeholders() {
        let out = fill_card_template("[{{invitor}}][{{coordinator}}]", &CardFields::default());
        assert_eq!(out, "[][]");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(
            escape_xml(r#"<a href="x">'b'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&apos;b&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_catalog_render() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("wedding.svg"),
            "<svg><text>{{heading}}</text><text>{{venue}}</text></svg>",
        )
        .unwrap();

        let catalog = CardCatalog::new(dir.path());
        assert_eq!(catalog.kinds().collect::<Vec<_>>(), vec!["विवाह"]);
        let out = catalog.render("विवाह", &fields()).unwrap();
        assert_eq!(out, "<svg><text>शुभ विवाह</text><text>Garden Hall</text></svg>");
    }

    #[test]
    fn test_catalog_errors() {
        let dir = TempDir::new().unwrap();
        let mut catalog = CardCatalog::new(dir.path());
        assert!(catalog.render("birthday", &fields()).is_err());

        catalog.register("जन्मदिन", "birthday.svg");
        assert_eq!(
            catalog.template_path("जन्मदिन"),
            Some(dir.path().join("birthday.svg"))
        );
        let err = catalog.load("जन्मदिन").unwrap_err();
        assert!(format!("{err:#}").contains("birthday.svg"));
    }

    #[test]
    fn test_preview_layout() {
        let f = fields();
        let left = CardPreviewLayout::new(600.0, TextAlign::Left).placements(&f);
        assert_eq!(left.len(), 4);
        assert_eq!(left[0].text, "Asha & Ravi");
        assert_eq!(
            left.iter().map(|p| p.y).collect::<Vec<_>>(),
            vec![100.0, 150.0, 200.0, 250.0]
        );
        assert!(left.iter().all(|p| p.x == 50.0));

        assert_eq!(CardPreviewLayout::new(600.0, TextAlign::Center).anchor_x(), 300.0);
        assert_eq!(CardPreviewLayout::new(600.0, TextAlign::Right).anchor_x(), 550.0);
    }

    #[test]
    fn test_preview_font() {
        let layout = CardPreviewLayout::new(400.0, TextAlign::Left);
        assert_eq!(layout.font_css(), "24px Mukta");
        assert_eq!(layout.font_color.to_hex(), DEFAULT_CARD_COLOR);

        let layout = layout.with_font(32.0, HexColor::rgb(0x1e, 0x3a, 0x8a), "Noto Serif");
        assert_eq!(layout.font_css(), "32px Noto Serif");
        assert_eq!(layout.font_color.to_hex(), "#1e3a8a");
    }
}
