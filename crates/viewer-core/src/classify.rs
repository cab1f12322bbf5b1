//! Name-driven part taxonomy.
//!
//! Every rule table here is matched by substring against the part's display
//! name and the first matching row wins, so a name such as `BoxCylinder`
//! classifies as a box.

use crate::constants::{HIGHLIGHT_BOX_HEX, HIGHLIGHT_CYLINDER_HEX, HIGHLIGHT_LINE_HEX};
use crate::state::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Box,
    Cylinder,
    Line,
}

impl PartKind {
    /// Render colour used while the pointer hovers a part of this kind.
    pub fn highlight_color(self) -> Color {
        Color::from_hex(self.highlight_hex())
    }

    pub fn highlight_hex(self) -> u32 {
        match self {
            PartKind::Box => HIGHLIGHT_BOX_HEX,
            PartKind::Cylinder => HIGHLIGHT_CYLINDER_HEX,
            PartKind::Line => HIGHLIGHT_LINE_HEX,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct KindRule {
    pub pattern: &'static str,
    pub kind: PartKind,
}

pub const KIND_RULES: &[KindRule] = &[
    KindRule {
        pattern: "Box",
        kind: PartKind::Box,
    },
    KindRule {
        pattern: "Cylinder",
        kind: PartKind::Cylinder,
    },
    KindRule {
        pattern: "Line",
        kind: PartKind::Line,
    },
];

/// Parts whose name contains any of these are excluded from hover and click.
pub const FIXED_PART_PATTERNS: &[&str] = &[
    "Cylinder005",
    "Cylinder006",
    "Cylinder007",
    "Cylinder008",
    "Cylinder009",
    "Cylinder010",
];

pub fn classify(name: &str) -> Option<PartKind> {
    KIND_RULES
        .iter()
        .find(|rule| name.contains(rule.pattern))
        .map(|rule| rule.kind)
}

pub fn is_fixed(name: &str) -> bool {
    FIXED_PART_PATTERNS.iter().any(|p| name.contains(*p))
}

/// Content shown in the overlay panel for a focused part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
}

pub const DEFAULT_INFO: PartInfo = PartInfo {
    title: "Part details",
    description: "A component of the assembly.",
    image_url: "https://picsum.photos/800/400",
};

pub const INFO_RULES: &[(&str, PartInfo)] = &[
    (
        "Box",
        PartInfo {
            title: "Box details",
            description: "A box component. As a load-bearing part of the equipment it is stable \
                          and carries heavy loads, and it plays a key role in the production line.",
            image_url: "https://images.unsplash.com/photo-1567361808960-dec9cb578182?w=800",
        },
    ),
    (
        "Cylinder",
        PartInfo {
            title: "Cylinder details",
            description: "A cylinder component. Cylindrical structures are common in industrial \
                          plants, where they store and convey material.",
            image_url: "https://images.unsplash.com/photo-1581092160562-40aa08e78837?w=800",
        },
    ),
    (
        "Line",
        PartInfo {
            title: "Line details",
            description: "A line component. Lines mark connections, transport paths and \
                          boundaries between the larger pieces of the system.",
            image_url: "https://images.unsplash.com/photo-1581092335397-9583eb92d232?w=800",
        },
    ),
];

pub fn info_for(name: &str) -> &'static PartInfo {
    INFO_RULES
        .iter()
        .find(|(pattern, _)| name.contains(*pattern))
        .map(|(_, info)| info)
        .unwrap_or(&DEFAULT_INFO)
}
