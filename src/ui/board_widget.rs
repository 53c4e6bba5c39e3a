use crate::game::{Board, Piece};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn piece_color(piece: Piece) -> Color {
    match piece {
        Piece::X => Color::Red,
        Piece::O => Color::Yellow,
    }
}

/// Build the board as styled lines: column numbers, the grid with the top
/// row first, and a marker under the selected (0-indexed) column.
pub fn board_lines(board: &Board, selected_column: usize) -> Vec<Line<'static>> {
    let cols = board.cols();
    let mut lines = Vec::with_capacity(board.rows() + 4);

    let mut header = vec![Span::raw("   ")];
    for col in 0..cols {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            header.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            header.push(Span::raw(label));
        }
    }
    header.push(Span::raw("  "));
    lines.push(Line::from(header));

    let rule = "═".repeat(cols * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in (0..board.rows()).rev() {
        let mut spans = vec![Span::raw("  ║")];
        for col in 0..cols {
            let span = match board.get(row, col) {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(piece) => Span::styled(
                    format!(" {piece} "),
                    Style::default()
                        .fg(piece_color(piece))
                        .add_modifier(Modifier::BOLD),
                ),
            };
            spans.push(span);
        }
        spans.push(Span::raw(" ║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let mut indicator = vec![Span::raw("   ")];
    for col in 0..cols {
        if col == selected_column {
            indicator.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator.push(Span::raw("   "));
        }
    }
    indicator.push(Span::raw("  "));
    lines.push(Line::from(indicator));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_board_lines_layout() {
        let mut board = Board::new(2, 3).unwrap();
        board.play(Piece::X, 2);
        let lines = board_lines(&board, 1);

        assert_eq!(lines.len(), 2 + 4);
        assert_eq!(text(&lines[0]), "    1  2  3   ");
        assert_eq!(text(&lines[2]), "  ║ .  .  .  ║");
        assert_eq!(text(&lines[3]), "  ║ .  X  .  ║");
        assert_eq!(text(&lines[5]), "       ▲      ");
    }
}
