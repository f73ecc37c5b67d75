//! Starter design templates.

use std::str::FromStr;

use design_pad_config::HexColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    SocialPost,
    BusinessCard,
    Invitation,
}

/// Canvas setup a template starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLayout {
    pub name: &'static str,
    pub category: &'static str,
    pub width: u32,
    pub height: u32,
    pub background: HexColor,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [Self::SocialPost, Self::BusinessCard, Self::Invitation];

    pub fn slug(self) -> &'static str {
        match self {
            Self::SocialPost => "social-post",
            Self::BusinessCard => "business-card",
            Self::Invitation => "invitation",
        }
    }

    pub fn layout(self) -> TemplateLayout {
        match self {
            Self::SocialPost => TemplateLayout {
                name: "Social Media Post",
                category: "social",
                width: 400,
                height: 400,
                background: HexColor::rgb(0x8b, 0x5c, 0xf6),
            },
            Self::BusinessCard => TemplateLayout {
                name: "Business Card",
                category: "business",
                width: 400,
                height: 250,
                background: HexColor::rgb(0x06, 0xb6, 0xd4),
            },
            Self::Invitation => TemplateLayout {
                name: "Invitation",
                category: "events",
                width: 400,
                height: 500,
                background: HexColor::rgb(0xf5, 0x9e, 0x0b),
            },
        }
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == s)
            .ok_or_else(|| format!("unknown template: {s}"))
    }
}
