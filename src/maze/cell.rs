use crossterm::style::{Color, StyledContent, Stylize};

use std::fmt;

/// State of one grid unit.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Wall,
    Open,
    Start,
    End,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Whether an agent may stand on this cell.
    pub fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Styled two-column symbol used by the terminal adapters.
    pub fn styled(self) -> StyledContent<&'static str> {
        match self {
            Cell::Wall => "⬜".with(Color::White),
            Cell::Open => "  ".with(Color::Reset),
            Cell::Start => "🟩".with(Color::Green),
            Cell::End => "🟥".with(Color::Red),
        }
    }
}

/// Overlay markers drawn on top of the grid, never stored in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The player's current position in play mode.
    Player,
    /// A cell that entered the solver's frontier.
    Frontier,
    /// A cell on the reconstructed shortest path.
    FinalPath,
}

impl Marker {
    pub fn styled(self) -> StyledContent<&'static str> {
        match self {
            Marker::Player => "🟡".with(Color::Yellow),
            Marker::Frontier => "* ".with(Color::Blue),
            Marker::FinalPath => "🟨".with(Color::Yellow),
        }
    }
}

fn write_symbol(f: &mut fmt::Formatter<'_>, styled_symbol: StyledContent<&str>) -> fmt::Result {
    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(
            styled_symbol.content().width(),
            Cell::CELL_WIDTH as usize,
            "Each cell must occupy exactly two character widths."
        );
    }

    write!(f, "{}", styled_symbol)
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_symbol(f, self.styled())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_symbol(f, self.styled())
    }
}
