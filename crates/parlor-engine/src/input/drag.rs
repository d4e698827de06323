use glam::Vec2;

/// A rectangle centred on `center`, used for pointer hit tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub center: Vec2,
    pub half: Vec2,
}

impl HitBox {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half.x && d.y <= self.half.y
    }
}

/// Index of the first hit box containing `p`.
/// Callers pass boxes front-to-back when overlap matters.
pub fn hit_test(boxes: impl IntoIterator<Item = HitBox>, p: Vec2) -> Option<usize> {
    boxes.into_iter().position(|b| b.contains(p))
}

/// The item currently held by the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    /// Game-defined index of the dragged item.
    pub index: usize,
    /// Pointer position minus item position at grab time.
    pub offset: Vec2,
}

/// Pointer drag tracking: at most one item is held at a time.
#[derive(Debug, Default)]
pub struct DragState {
    grab: Option<Grab>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start holding `index`, grabbed at `pointer` while the item sits at `item_pos`.
    /// Returns false (and changes nothing) if something is already held.
    pub fn begin(&mut self, index: usize, pointer: Vec2, item_pos: Vec2) -> bool {
        if self.grab.is_some() {
            return false;
        }
        self.grab = Some(Grab {
            index,
            offset: pointer - item_pos,
        });
        true
    }

    /// Where the held item should be drawn for a pointer at `pointer`.
    pub fn follow(&self, pointer: Vec2) -> Option<(usize, Vec2)> {
        self.grab.map(|g| (g.index, pointer - g.offset))
    }

    /// Release the held item, if any.
    pub fn end(&mut self) -> Option<Grab> {
        self.grab.take()
    }

    pub fn held(&self) -> Option<usize> {
        self.grab.map(|g| g.index)
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_box_edges_are_inside() {
        let b = HitBox::new(Vec2::new(100.0, 100.0), Vec2::splat(60.0));
        assert!(b.contains(Vec2::new(130.0, 70.0)));
        assert!(!b.contains(Vec2::new(130.1, 100.0)));
    }

    #[test]
    fn hit_test_returns_first_match() {
        let boxes = [
            HitBox::new(Vec2::ZERO, Vec2::splat(10.0)),
            HitBox::new(Vec2::new(2.0, 0.0), Vec2::splat(10.0)),
        ];
        assert_eq!(hit_test(boxes, Vec2::new(3.0, 0.0)), Some(0));
        assert_eq!(hit_test(boxes, Vec2::new(6.0, 0.0)), Some(1));
        assert_eq!(hit_test(boxes, Vec2::new(50.0, 0.0)), None);
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut drag = DragState::new();
        assert!(drag.begin(3, Vec2::new(105.0, 95.0), Vec2::new(100.0, 100.0)));
        assert!(!drag.begin(4, Vec2::ZERO, Vec2::ZERO), "only one item at a time");
        assert_eq!(drag.follow(Vec2::new(205.0, 195.0)), Some((3, Vec2::new(200.0, 200.0))));
        assert_eq!(drag.end().map(|g| g.index), Some(3));
        assert!(!drag.is_dragging());
    }
}
