pub mod hints;
pub mod toast;

use ratatui::layout::Rect;

/// Rectangle of at most `width` by `height` centred in `area`.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centres_and_clamps() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_fixed(50, 20, area), Rect::new(25, 10, 50, 20));
        assert_eq!(centered_fixed(200, 80, area), area);
    }
}
