use ferritris_engine::PieceKind;
use ratatui::style::Color;

/// RGB for each piece kind, matching the classic palette: cyan I,
/// yellow O, magenta T, blue J, orange L, green S, red Z.
const fn piece_rgb(kind: PieceKind) -> (u8, u8, u8) {
    match kind {
        PieceKind::I => (0, 255, 255),
        PieceKind::O => (255, 255, 0),
        PieceKind::T => (255, 0, 255),
        PieceKind::J => (0, 0, 255),
        PieceKind::L => (255, 165, 0),
        PieceKind::S => (0, 255, 0),
        PieceKind::Z => (255, 0, 0),
    }
}

#[must_use]
pub fn piece_color(kind: PieceKind) -> Color {
    let (r, g, b) = piece_rgb(kind);
    Color::Rgb(r, g, b)
}

/// Piece color dimmed toward the background by the line-clear fade
/// intensity (0 = full color, 1 = gone).
#[must_use]
pub fn faded_piece_color(kind: PieceKind, intensity: f32) -> Color {
    let (r, g, b) = piece_rgb(kind);
    let keep = 1.0 - intensity.clamp(0.0, 1.0);
    Color::Rgb(scale(r, keep), scale(g, keep), scale(b, keep))
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(channel: u8, keep: f32) -> u8 {
    (f32::from(channel) * keep) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        for kind in PieceKind::ALL {
            assert_eq!(faded_piece_color(kind, 0.0), piece_color(kind));
            assert_eq!(faded_piece_color(kind, 1.0), Color::Rgb(0, 0, 0));
        }
    }

    #[test]
    fn test_fade_is_clamped() {
        assert_eq!(
            faded_piece_color(PieceKind::Z, -5.0),
            piece_color(PieceKind::Z)
        );
        assert_eq!(faded_piece_color(PieceKind::Z, 5.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_half_fade_halves_channels() {
        assert_eq!(
            faded_piece_color(PieceKind::Z, 0.5),
            Color::Rgb(127, 0, 0)
        );
    }
}
