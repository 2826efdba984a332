use glam::Vec2;
use tinct_engine::paint::Color;
use tinct_engine::pipeline::PolygonVertex;

/// Reorders a convex polygon's corners, given in perimeter order, so a
/// triangle strip over the result covers the polygon.
///
/// The strip zigzags between both ends of the outline: `0, 1, n-1, 2, n-2, ...`.
pub fn fan_to_strip<T: Copy>(outline: &[T]) -> Vec<T> {
    let Some((&first, rest)) = outline.split_first() else {
        return Vec::new();
    };

    let mut strip = Vec::with_capacity(outline.len());
    strip.push(first);

    let (mut lo, mut hi) = (0, rest.len());
    let mut from_front = true;
    while lo < hi {
        if from_front {
            strip.push(rest[lo]);
            lo += 1;
        } else {
            hi -= 1;
            strip.push(rest[hi]);
        }
        from_front = !from_front;
    }
    strip
}

/// Polygon built by clicking corners one after another.
#[derive(Debug, Clone)]
pub struct PolygonEditor {
    outline: Vec<PolygonVertex>,
    palette: Vec<Color>,
}

impl PolygonEditor {
    /// An empty palette colors every corner white.
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            outline: Vec::new(),
            palette,
        }
    }

    /// Appends a corner at `position` (clip space), colored from the palette.
    pub fn push(&mut self, position: Vec2) {
        let color = if self.palette.is_empty() {
            Color::white()
        } else {
            self.palette[self.outline.len() % self.palette.len()]
        };
        self.outline.push(PolygonVertex::new(position, color));
    }

    /// Removes the newest corner. False when there was none.
    pub fn undo(&mut self) -> bool {
        self.outline.pop().is_some()
    }

    pub fn len(&self) -> usize {
        self.outline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Corners in click order.
    pub fn outline(&self) -> &[PolygonVertex] {
        &self.outline
    }

    /// Corners in triangle-strip order, ready for `PolygonPipeline::make_source`.
    pub fn strip(&self) -> Vec<PolygonVertex> {
        fan_to_strip(&self.outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── fan_to_strip ──────────────────────────────────────────────────────

    #[test]
    fn short_outlines_are_unchanged() {
        assert_eq!(fan_to_strip::<u8>(&[]), Vec::<u8>::new());
        assert_eq!(fan_to_strip(&[7]), vec![7]);
        assert_eq!(fan_to_strip(&[1, 2]), vec![1, 2]);
        assert_eq!(fan_to_strip(&[1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn quad_zigzags() {
        assert_eq!(fan_to_strip(&[0, 1, 2, 3]), vec![0, 1, 3, 2]);
    }

    #[test]
    fn longer_outlines_alternate_ends() {
        assert_eq!(fan_to_strip(&[0, 1, 2, 3, 4]), vec![0, 1, 4, 2, 3]);
        assert_eq!(fan_to_strip(&[0, 1, 2, 3, 4, 5]), vec![0, 1, 5, 2, 4, 3]);
    }

    #[test]
    fn strip_keeps_every_corner_once() {
        let outline: Vec<u32> = (0..11).collect();
        let mut strip = fan_to_strip(&outline);
        strip.sort_unstable();
        assert_eq!(strip, outline);
    }

    // ── editor ────────────────────────────────────────────────────────────

    #[test]
    fn corners_take_palette_colors_in_turn() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let mut editor = PolygonEditor::new(vec![red, blue]);

        for i in 0..3 {
            editor.push(Vec2::new(i as f32 * 0.1, 0.0));
        }

        let colors: Vec<_> = editor.outline().iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![red.to_array(), blue.to_array(), red.to_array()]);
    }

    #[test]
    fn undo_removes_newest_corner() {
        let mut editor = PolygonEditor::new(Vec::new());
        editor.push(Vec2::new(-1.0, -1.0));
        editor.push(Vec2::new(1.0, -1.0));

        assert!(editor.undo());
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.outline()[0].position, [-1.0, -1.0]);
        assert_eq!(editor.outline()[0].color, Color::white().to_array());

        assert!(editor.undo());
        assert!(!editor.undo());
        assert!(editor.is_empty());
        assert!(editor.strip().is_empty());
    }

    #[test]
    fn strip_reorders_clicked_square() {
        let mut editor = PolygonEditor::new(Vec::new());
        for (x, y) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            editor.push(Vec2::new(x, y));
        }

        let positions: Vec<_> = editor.strip().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[-0.5, -0.5], [0.5, -0.5], [-0.5, 0.5], [0.5, 0.5]]
        );
    }
}
