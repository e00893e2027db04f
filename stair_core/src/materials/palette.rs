//! Frame color palette.
//!
//! Each powder-coat color for the frame comes paired with a composite board
//! color. The two are independent values: recoloring the frame never touches
//! the boards' color lookup, and grated sheets always take the frame color.

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Format as `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

/// Bolts are bare steel whatever the frame color.
pub const FASTENER_COLOR: Rgb = Rgb(0xC0C0C0);

/// Frame powder-coat color (RAL code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrameColor {
    /// Jet black, paired with wenge boards
    #[default]
    #[serde(rename = "RAL9005")]
    Ral9005,
    /// Chocolate brown, paired with brown boards
    #[serde(rename = "RAL8017")]
    Ral8017,
    /// Graphite grey, paired with grey boards
    #[serde(rename = "RAL7024")]
    Ral7024,
}

/// Resolved color pair for one palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub frame: Rgb,
    pub composite_board: Rgb,
}

impl FrameColor {
    /// All frame colors for UI selection
    pub const ALL: [FrameColor; 3] = [FrameColor::Ral9005, FrameColor::Ral8017, FrameColor::Ral7024];

    /// RAL code string
    pub fn code(&self) -> &'static str {
        match self {
            FrameColor::Ral9005 => "RAL9005",
            FrameColor::Ral8017 => "RAL8017",
            FrameColor::Ral7024 => "RAL7024",
        }
    }

    /// Parse `RAL9005`, `ral 9005`, `9005`
    pub fn from_str_flexible(s: &str) -> StairResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-', '_'], "");
        match normalized.trim_start_matches("RAL") {
            "9005" => Ok(FrameColor::Ral9005),
            "8017" => Ok(FrameColor::Ral8017),
            "7024" => Ok(FrameColor::Ral7024),
            _ => Err(StairError::unknown_color(s)),
        }
    }

    /// Frame and composite board colors
    pub fn palette(&self) -> PaletteEntry {
        match self {
            FrameColor::Ral9005 => PaletteEntry {
                frame: Rgb(0x000000),
                composite_board: Rgb(0x382B22),
            },
            FrameColor::Ral8017 => PaletteEntry {
                frame: Rgb(0x44322D),
                composite_board: Rgb(0x8B4513),
            },
            FrameColor::Ral7024 => PaletteEntry {
                frame: Rgb(0x474A51),
                composite_board: Rgb(0x808080),
            },
        }
    }

    /// Name of the board color that goes with this frame
    pub fn composite_board_name(&self) -> &'static str {
        match self {
            FrameColor::Ral9005 => "Wenge",
            FrameColor::Ral8017 => "Brown",
            FrameColor::Ral7024 => "Grey",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FrameColor::Ral9005 => "RAL 9005 Jet black",
            FrameColor::Ral8017 => "RAL 8017 Chocolate brown",
            FrameColor::Ral7024 => "RAL 7024 Graphite grey",
        }
    }
}

impl std::fmt::Display for FrameColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_values() {
        assert_eq!(FrameColor::Ral9005.palette().frame, Rgb(0x000000));
        assert_eq!(FrameColor::Ral9005.palette().composite_board, Rgb(0x382B22));
        assert_eq!(FrameColor::Ral7024.palette().frame.to_hex(), "#474A51");
    }

    #[test]
    fn test_board_colors_are_distinct_from_frame() {
        for color in FrameColor::ALL {
            let entry = color.palette();
            assert_ne!(entry.frame, entry.composite_board);
        }
    }

    #[test]
    fn test_parsing() {
        assert_eq!(FrameColor::from_str_flexible("ral 8017").unwrap(), FrameColor::Ral8017);
        assert_eq!(FrameColor::from_str_flexible("7024").unwrap(), FrameColor::Ral7024);
        assert!(FrameColor::from_str_flexible("RAL1000").is_err());

        let parsed: FrameColor = serde_json::from_str("\"RAL9005\"").unwrap();
        assert_eq!(parsed, FrameColor::Ral9005);
    }
}
