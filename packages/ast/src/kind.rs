use serde::{Serialize, Serializer};
use std::fmt;

/// Block type of a node.
///
/// Built-in blocks get their own variant so the engine can match on them;
/// anything registered later travels as `Custom` and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    Heading,
    Text,
    Hero,
    Card,
    Gallery,
    Button,
    Image,
    Flex,
    Grid,
    Spacer,
    Divider,
    Alert,
    Custom(String),
}

impl BlockKind {
    /// Every built-in block, in palette order
    pub const BUILTINS: [BlockKind; 12] = [
        BlockKind::Heading,
        BlockKind::Text,
        BlockKind::Hero,
        BlockKind::Card,
        BlockKind::Gallery,
        BlockKind::Button,
        BlockKind::Image,
        BlockKind::Flex,
        BlockKind::Grid,
        BlockKind::Spacer,
        BlockKind::Divider,
        BlockKind::Alert,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "Heading" => BlockKind::Heading,
            "Text" => BlockKind::Text,
            "Hero" => BlockKind::Hero,
            "Card" => BlockKind::Card,
            "Gallery" => BlockKind::Gallery,
            "Button" => BlockKind::Button,
            "Image" => BlockKind::Image,
            "Flex" => BlockKind::Flex,
            "Grid" => BlockKind::Grid,
            "Spacer" => BlockKind::Spacer,
            "Divider" => BlockKind::Divider,
            "Alert" => BlockKind::Alert,
            other => BlockKind::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Heading => "Heading",
            BlockKind::Text => "Text",
            BlockKind::Hero => "Hero",
            BlockKind::Card => "Card",
            BlockKind::Gallery => "Gallery",
            BlockKind::Button => "Button",
            BlockKind::Image => "Image",
            BlockKind::Flex => "Flex",
            BlockKind::Grid => "Grid",
            BlockKind::Spacer => "Spacer",
            BlockKind::Divider => "Divider",
            BlockKind::Alert => "Alert",
            BlockKind::Custom(name) => name,
        }
    }

    /// Plain text block, the only kind the HTML bridge reads or writes
    pub fn is_text(&self) -> bool {
        matches!(self, BlockKind::Text)
    }

    /// Layout containers that hold child blocks in their `items` slot
    pub fn is_container(&self) -> bool {
        matches!(self, BlockKind::Flex | BlockKind::Grid)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, BlockKind::Custom(_))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BlockKind {
    fn from(name: &str) -> Self {
        BlockKind::from_name(name)
    }
}

impl Serialize for BlockKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
