use crossterm::style::Stylize;

use crate::{game::grid::Grid, models::Position};

/// Tab-separated rows, with found words drawn in their highlight colour
pub fn render_grid(grid: &Grid) -> String {
    render_with(grid, |pos, letter| match grid.highlight(pos) {
        Some(color) => letter.with(color).bold().to_string(),
        None => letter.to_string(),
    })
}

/// Same layout as `render_grid` without any colour codes
pub fn render_plain(grid: &Grid) -> String {
    render_with(grid, |_, letter| letter.to_string())
}

fn render_with(grid: &Grid, cell: impl Fn(Position, char) -> String) -> String {
    grid.rows()
        .enumerate()
        .map(|(row, letters)| {
            letters
                .iter()
                .enumerate()
                .map(|(col, letter)| cell(Position::new(row, col), *letter))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    #[test]
    fn test_render_plain() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_cell(Position::new(0, 0), 'H');
        grid.set_cell(Position::new(0, 1), 'I');

        assert_eq!(render_plain(&grid), "H\tI\n*\t*");
    }

    #[test]
    fn test_render_grid_colours_only_highlighted_cells() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_cell(Position::new(1, 0), 'Z');
        grid.set_highlight(Position::new(1, 0), Color::Cyan);

        let rendered = render_grid(&grid);
        let rows: Vec<&str> = rendered.lines().collect();

        assert_eq!(rows[0], "*\t*");
        assert!(rows[1].contains('Z'));
        assert!(rows[1].contains('\u{1b}'), "Highlighted cell should carry ANSI codes");
        assert!(rows[1].ends_with("\t*"));
    }
}
