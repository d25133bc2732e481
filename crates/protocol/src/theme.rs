use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,

    Primary,
    Secondary,

    // Block chain accents, cycled by experience index
    AccentIndigo,
    AccentSky,
    AccentAmber,
    AccentEmerald,
    AccentPink,
    BlockInactive,
    ConnectorMuted,

    // Progress indicator
    ProgressTrack,
    ProgressVisited,
    ProgressUpcoming,

    // Chess gallery
    BoardLight,
    BoardDark,
    BoardFrame,
    ActiveRing,
    PieceBlack,
    PieceQueen,
    ProjectEmerald,
    ProjectBlue,
    ProjectPurple,
    ProjectOrange,

    // Skills constellation
    CategoryProgramming,
    CategoryData,
    CategoryDevOps,
    CategoryTools,
    CategoryLanguages,
    CategoryOther,
    HoverHighlight,

    // Contact modal
    ModalBackdrop,
    LinkedIn,
}

impl ThemeToken {
    /// Block chain accents in cycle order.
    pub const ACCENTS: [ThemeToken; 5] = [
        ThemeToken::AccentIndigo,
        ThemeToken::AccentSky,
        ThemeToken::AccentAmber,
        ThemeToken::AccentEmerald,
        ThemeToken::AccentPink,
    ];

    /// Accent for the block at `index`, cycling through [`Self::ACCENTS`].
    pub fn accent(index: usize) -> ThemeToken {
        Self::ACCENTS[index % Self::ACCENTS.len()]
    }
}
