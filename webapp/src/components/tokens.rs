use std::fmt;

use crate::common::class_list;

// token tables for the primitives
//
// each primitive declares which role tokens and which computed properties its debug overlay
// reads back.  the class names here line up with assets/components.css, and the inline style
// values only ever point at role tokens

// computed properties shared by the surface-like primitives
const SURFACE_PROPERTIES: [&str; 6] = [
    "background-color",
    "color",
    "border-color",
    "box-shadow",
    "border-radius",
    "padding-top",
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_owned()).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Brand,
    BrandAlt,
    Accent,
    Muted,
    Neutral,
}

impl Tone {
    // background and foreground tokens for a solid fill
    pub fn fill(&self) -> (&'static str, &'static str) {
        match self {
            Tone::Brand => ("--brand", "--on-brand"),
            Tone::BrandAlt => ("--brand-alt", "--on-brand-alt"),
            Tone::Accent => ("--accent", "--on-accent"),
            Tone::Muted => ("--muted", "--on-muted"),
            Tone::Neutral => ("--surface", "--on-surface"),
        }
    }

    // the color used when the tone is only a line (outline and link variants)
    pub fn stroke(&self) -> &'static str {
        match self {
            Tone::Neutral => "--border",
            _ => self.fill().0,
        }
    }

    // tokens a card or section of this tone paints with
    //
    // brand-alt has no surface treatment of its own and falls back to brand
    pub fn surface_tokens(&self) -> &'static [&'static str] {
        match self {
            Tone::Neutral => &["--surface", "--on-surface", "--border"],
            Tone::Brand | Tone::BrandAlt => &["--brand", "--on-brand"],
            Tone::Muted => &["--muted", "--on-muted"],
            Tone::Accent => &["--accent", "--on-accent"],
        }
    }

    fn surface_class(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Brand | Tone::BrandAlt => "brand",
            Tone::Muted => "muted",
            Tone::Accent => "accent",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Solid,
    Outline,
    Link,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Sm => write!(f, "sm"),
            Size::Md => write!(f, "md"),
            Size::Lg => write!(f, "lg"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Align::Left => write!(f, "left"),
            Align::Center => write!(f, "center"),
            Align::Right => write!(f, "right"),
        }
    }
}

// button

pub const BUTTON_TOKENS: [&str; 18] = [
    "--brand",
    "--on-brand",
    "--brand-alt",
    "--on-brand-alt",
    "--accent",
    "--on-accent",
    "--muted",
    "--on-muted",
    "--surface",
    "--on-surface",
    "--border",
    "--space-2",
    "--space-3",
    "--space-4",
    "--space-5",
    "--space-6",
    "--space-7",
    "--r-full",
];

pub const BUTTON_PROPERTIES: [&str; 7] = [
    "background-color",
    "color",
    "border-color",
    "padding-top",
    "padding-left",
    "border-radius",
    "box-shadow",
];

pub fn button_classes(
    variant: Variant,
    size: Size,
    loading: bool,
    block: bool,
    extra: Option<&str>,
) -> String {
    class_list([
        Some("btn"),
        (variant == Variant::Outline).then_some("btn-outline"),
        (variant == Variant::Link).then_some("btn-link"),
        (size == Size::Sm).then_some("btn-sm"),
        (size == Size::Lg).then_some("btn-lg"),
        loading.then_some("btn--loading"),
        block.then_some("w-full"),
        extra,
    ])
}

// the .btn rule reads --btn-bg/--btn-fg/--btn-shadow, so tone and variant only have to set those
pub fn button_style(tone: Tone, variant: Variant) -> String {
    let (bg, fg) = tone.fill();
    let stroke = tone.stroke();

    match variant {
        Variant::Solid => format!("--btn-bg: var({bg}); --btn-fg: var({fg});"),
        Variant::Outline => format!(
            "--btn-bg: transparent; --btn-fg: var({stroke}); --btn-shadow: inset 0 0 0 1px var({stroke});"
        ),
        Variant::Link => {
            format!("--btn-bg: transparent; --btn-fg: var({stroke}); --btn-shadow: none;")
        }
    }
}

// card

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardLook {
    pub tone: Tone,
    pub elevation: u8,
    pub radius: Size,
    pub padding: Size,
}

impl Default for CardLook {
    fn default() -> Self {
        CardLook {
            tone: Tone::Neutral,
            elevation: 1,
            radius: Size::Md,
            padding: Size::Md,
        }
    }
}

impl CardLook {
    // elevation is clamped to the four shadow steps
    fn shadow_step(&self) -> u8 {
        self.elevation.min(3)
    }

    pub fn classes(&self, align: Align, interactive: bool, extra: Option<&str>) -> String {
        let tone = format!("card--{}", self.tone.surface_class());
        let elevation = format!("card--e{}", self.shadow_step());
        let radius = format!("card--r-{}", self.radius);
        let padding = format!("card--p-{}", self.padding);
        let align = (align != Align::Left).then(|| format!("ta-{align}"));

        class_list([
            Some("card"),
            Some(tone.as_str()),
            Some(elevation.as_str()),
            Some(radius.as_str()),
            Some(padding.as_str()),
            align.as_deref(),
            interactive.then_some("card--interactive"),
            extra,
        ])
    }

    // tone tokens, then the one padding, radius and shadow token this card actually uses
    pub fn tokens(&self) -> Vec<String> {
        let padding = match self.padding {
            Size::Sm => "--space-4",
            Size::Md => "--space-6",
            Size::Lg => "--space-8",
        };
        let radius = match self.radius {
            Size::Sm => "--r-sm",
            Size::Md => "--r-md",
            Size::Lg => "--r-lg",
        };
        let shadow = match self.shadow_step() {
            0 => "--shadow-none",
            1 => "--shadow-sm",
            2 => "--shadow-md",
            _ => "--shadow-lg",
        };

        let mut tokens = owned(self.tone.surface_tokens());
        tokens.extend(owned(&[padding, radius, shadow]));
        tokens
    }

    pub fn properties(&self) -> Vec<String> {
        owned(&SURFACE_PROPERTIES)
    }
}

// input

pub const INPUT_TOKENS: [&str; 5] = [
    "--control-pad-y",
    "--control-pad-x",
    "--control-radius",
    "--border",
    "--focus-ring",
];

pub const INPUT_PROPERTIES: [&str; 4] =
    ["padding-top", "padding-left", "border-radius", "border-color"];

// typography

pub const HEADING_TOKENS: [&str; 9] = [
    "--font-display",
    "--text-xl",
    "--text-2xl",
    "--text-3xl",
    "--text-4xl",
    "--text-5xl",
    "--text-6xl",
    "--text-hero",
    "--fg",
];

pub const HEADING_PROPERTIES: [&str; 6] = [
    "font-family",
    "font-size",
    "color",
    "margin-bottom",
    "line-height",
    "letter-spacing",
];

pub const TEXT_TOKENS: [&str; 7] = [
    "--font-body",
    "--text-xs",
    "--text-sm",
    "--text-base",
    "--text-lg",
    "--text-xl",
    "--fg",
];

pub const TEXT_PROPERTIES: [&str; 5] =
    ["font-family", "font-size", "color", "margin-bottom", "line-height"];

// levels outside 1..=6 are clamped
pub fn heading_level(level: u8) -> u8 {
    level.clamp(1, 6)
}

// size "hero" is the only one that isn't a level
pub fn heading_classes(
    level: u8,
    size: Option<&str>,
    align: Align,
    no_margin: bool,
    extra: Option<&str>,
) -> String {
    let size = match size {
        Some(size) => format!("h-{size}"),
        None => format!("h-{}", heading_level(level)),
    };
    let align = format!("ta-{align}");

    class_list([
        Some("typo-heading"),
        Some(size.as_str()),
        Some(align.as_str()),
        no_margin.then_some("u-mb-0"),
        extra,
    ])
}

pub fn text_classes(size: &str, align: Align, no_margin: bool, extra: Option<&str>) -> String {
    let size = format!("t-{size}");
    let align = format!("ta-{align}");

    class_list([
        Some("typo-text"),
        Some(size.as_str()),
        Some(align.as_str()),
        no_margin.then_some("u-mb-0"),
        extra,
    ])
}

// section

pub fn section_classes(size: Size, tone: Tone, center: bool, extra: Option<&str>) -> String {
    let size = format!("section--{size}");
    let tone = match tone {
        Tone::Neutral => "section--surface",
        Tone::Brand | Tone::BrandAlt => "section--brand",
        Tone::Muted => "section--muted",
        Tone::Accent => "section--accent",
    };

    class_list([
        Some("section"),
        Some(size.as_str()),
        Some(tone),
        center.then_some("section--center"),
        extra,
    ])
}

pub fn section_tokens(tone: Tone) -> Vec<String> {
    let mut tokens = owned(tone.surface_tokens());
    tokens.extend(owned(&[
        "--container",
        "--space-5",
        "--section-py-sm",
        "--section-py-md",
        "--section-py-lg",
    ]));
    tokens
}

pub const SECTION_PROPERTIES: [&str; 4] =
    ["background-color", "color", "padding-top", "padding-bottom"];

pub fn names(list: &[&str]) -> Vec<String> {
    owned(list)
}
