//! Letter tiles and drop zones for one word.
//!
//! Tiles and zones live in plain vectors and refer to each other by index.
//! A zone records which tile sits in it and a tile records its zone; every
//! transition below updates both sides together.

use glam::Vec2;
use parlor_engine::{hit_test, HitBox, Rng};

pub const TILE_SIZE: f32 = 60.0;
pub const TILE_PADDING: f32 = 10.0;
/// Vertical centre of the drop zone row.
pub const ZONE_Y: f32 = 300.0;
/// Vertical centre of the loose tile row.
pub const TILE_Y: f32 = 450.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LetterTile {
    pub letter: char,
    /// Zone holding this tile.
    pub zone: Option<usize>,
    /// Resting position when not placed.
    pub origin: Vec2,
    pub pos: Vec2,
}

impl LetterTile {
    pub fn placed(&self) -> bool {
        self.zone.is_some()
    }

    pub fn hit_box(&self) -> HitBox {
        HitBox::new(self.pos, Vec2::splat(TILE_SIZE))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    pub index: usize,
    pub center: Vec2,
    /// Tile sitting in this zone.
    pub tile: Option<usize>,
    pub letter: Option<char>,
}

impl DropZone {
    pub fn occupied(&self) -> bool {
        self.tile.is_some()
    }

    pub fn hit_box(&self) -> HitBox {
        HitBox::new(self.center, Vec2::splat(TILE_SIZE))
    }
}

/// Result of letting go of a tile over a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The tile snapped into the zone.
    Placed,
    /// The zone was taken; the tile went back to its origin.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

#[derive(Debug, Clone)]
pub struct Board {
    word: String,
    tiles: Vec<LetterTile>,
    zones: Vec<DropZone>,
}

/// Centres of `count` cells laid out in a row centred on `width / 2`.
fn row_centers(count: usize, width: f32, y: f32) -> impl Iterator<Item = Vec2> {
    let stride = TILE_SIZE + TILE_PADDING;
    let total = count as f32 * stride - TILE_PADDING;
    let start = (width - total) * 0.5 + TILE_SIZE * 0.5;
    (0..count).map(move |i| Vec2::new(start + i as f32 * stride, y))
}

impl Board {
    /// Board for `word` with its letters in random order.
    pub fn new(word: &str, rng: &mut Rng, width: f32) -> Self {
        let mut letters: Vec<char> = word.chars().collect();
        rng.shuffle(&mut letters);
        Self::with_letters(word, letters, width)
    }

    /// Board with tiles in the given order.
    pub fn with_letters(word: &str, letters: Vec<char>, width: f32) -> Self {
        let tiles = letters
            .into_iter()
            .map(|letter| LetterTile {
                letter,
                zone: None,
                origin: Vec2::ZERO,
                pos: Vec2::ZERO,
            })
            .collect();
        let zones = (0..word.chars().count())
            .map(|index| DropZone {
                index,
                center: Vec2::ZERO,
                tile: None,
                letter: None,
            })
            .collect();
        let mut board = Self {
            word: word.to_string(),
            tiles,
            zones,
        };
        board.layout(width, None);
        board
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn tiles(&self) -> &[LetterTile] {
        &self.tiles
    }

    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    /// Re-centre both rows for a viewport `width` wide. Placed tiles follow
    /// their zone, loose tiles go to their new origin; `held` stays put.
    pub fn layout(&mut self, width: f32, held: Option<usize>) {
        let zone_count = self.zones.len();
        for (zone, center) in self.zones.iter_mut().zip(row_centers(zone_count, width, ZONE_Y)) {
            zone.center = center;
        }
        let origins: Vec<Vec2> = row_centers(self.tiles.len(), width, TILE_Y).collect();
        for (i, (tile, origin)) in self.tiles.iter_mut().zip(origins).enumerate() {
            tile.origin = origin;
            if Some(i) == held {
                continue;
            }
            tile.pos = match tile.zone {
                Some(z) => self.zones[z].center,
                None => origin,
            };
        }
    }

    /// Topmost tile under `p`. Later tiles are drawn above earlier ones.
    pub fn tile_at(&self, p: Vec2) -> Option<usize> {
        let count = self.tiles.len();
        hit_test(self.tiles.iter().rev().map(LetterTile::hit_box), p).map(|i| count - 1 - i)
    }

    pub fn zone_at(&self, p: Vec2) -> Option<usize> {
        hit_test(self.zones.iter().map(DropZone::hit_box), p)
    }

    /// Pick up a tile. A placed tile frees its zone first.
    pub fn begin_drag(&mut self, tile: usize) {
        let Some(t) = self.tiles.get_mut(tile) else {
            return;
        };
        if let Some(z) = t.zone.take() {
            let zone = &mut self.zones[z];
            zone.tile = None;
            zone.letter = None;
        }
    }

    pub fn move_tile(&mut self, tile: usize, pos: Vec2) {
        if let Some(t) = self.tiles.get_mut(tile) {
            t.pos = pos;
        }
    }

    /// Let go of `tile` over `zone`.
    pub fn drop_on(&mut self, tile: usize, zone: usize) -> DropOutcome {
        if tile >= self.tiles.len() || zone >= self.zones.len() {
            return DropOutcome::Rejected;
        }
        if self.zones[zone].occupied() || self.tiles[tile].placed() {
            let t = &mut self.tiles[tile];
            if !t.placed() {
                t.pos = t.origin;
            }
            return DropOutcome::Rejected;
        }
        let z = &mut self.zones[zone];
        z.tile = Some(tile);
        z.letter = Some(self.tiles[tile].letter);
        let t = &mut self.tiles[tile];
        t.zone = Some(zone);
        t.pos = z.center;
        DropOutcome::Placed
    }

    /// Finish a drag: a tile that was not placed returns to its origin.
    pub fn end_drag(&mut self, tile: usize) {
        if let Some(t) = self.tiles.get_mut(tile) {
            if !t.placed() {
                t.pos = t.origin;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.zones.iter().all(DropZone::occupied)
    }

    /// Letters of the zones in index order, once every zone is filled.
    pub fn formed_word(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        self.zones.iter().map(|z| z.letter).collect()
    }

    /// Compare the formed word against the target, case-sensitively.
    pub fn check(&self) -> Option<Verdict> {
        let formed = self.formed_word()?;
        Some(if formed == self.word {
            Verdict::Correct
        } else {
            Verdict::Wrong
        })
    }

    /// Indices of tiles currently sitting in a zone.
    pub fn placed_tiles(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles.iter().enumerate().filter(|(_, t)| t.placed()).map(|(i, _)| i)
    }

    /// Tiles and zones agree about every placement.
    pub fn is_consistent(&self) -> bool {
        let zones_ok = self.zones.iter().enumerate().all(|(z, zone)| match zone.tile {
            Some(t) => {
                zone.index == z
                    && self.tiles.get(t).is_some_and(|tile| tile.zone == Some(z))
                    && zone.letter == Some(self.tiles[t].letter)
            }
            None => zone.letter.is_none(),
        });
        let tiles_ok = self.tiles.iter().enumerate().all(|(t, tile)| match tile.zone {
            Some(z) => self.zones.get(z).is_some_and(|zone| zone.tile == Some(t)),
            None => true,
        });
        zones_ok && tiles_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 1000.0;

    fn board(word: &str, letters: &str) -> Board {
        Board::with_letters(word, letters.chars().collect(), WIDTH)
    }

    /// Drag tile `t` into zone `z` the way the game does.
    fn place(b: &mut Board, t: usize, z: usize) -> DropOutcome {
        b.begin_drag(t);
        let result = b.drop_on(t, z);
        b.end_drag(t);
        result
    }

    #[test]
    fn shuffle_keeps_letters() {
        let mut rng = Rng::new(11);
        let b = Board::new("ağaçlar", &mut rng, WIDTH);
        let mut got: Vec<char> = b.tiles().iter().map(|t| t.letter).collect();
        let mut want: Vec<char> = "ağaçlar".chars().collect();
        got.sort();
        want.sort();
        assert_eq!(got, want);
        assert_eq!(b.zones().len(), 7);
    }

    #[test]
    fn rows_are_centred() {
        let b = board("abc", "cab");
        let zones = b.zones();
        assert_eq!(zones[1].center, Vec2::new(500.0, ZONE_Y));
        assert_eq!(zones[2].center.x - zones[0].center.x, 2.0 * (TILE_SIZE + TILE_PADDING));
        assert_eq!(b.tiles()[1].origin, Vec2::new(500.0, TILE_Y));
        assert!(b.tiles().iter().all(|t| t.pos == t.origin));
    }

    #[test]
    fn drop_on_free_zone_snaps() {
        let mut b = board("ab", "ba");
        assert_eq!(place(&mut b, 0, 1), DropOutcome::Placed);
        assert_eq!(b.tiles()[0].pos, b.zones()[1].center);
        assert_eq!(b.zones()[1].letter, Some('b'));
        assert!(b.is_consistent());
    }

    #[test]
    fn drop_on_taken_zone_springs_back() {
        let mut b = board("ab", "ba");
        place(&mut b, 0, 0);
        b.begin_drag(1);
        b.move_tile(1, b.zones()[0].center);
        assert_eq!(b.drop_on(1, 0), DropOutcome::Rejected);
        b.end_drag(1);
        assert_eq!(b.tiles()[1].pos, b.tiles()[1].origin);
        assert_eq!(b.zones()[0].tile, Some(0));
        assert!(b.is_consistent());
    }

    #[test]
    fn picking_up_a_placed_tile_frees_its_zone() {
        let mut b = board("ab", "ab");
        place(&mut b, 0, 0);
        b.begin_drag(0);
        assert!(!b.zones()[0].occupied());
        assert_eq!(b.zones()[0].letter, None);
        assert!(!b.tiles()[0].placed());
        b.end_drag(0);
        assert_eq!(b.tiles()[0].pos, b.tiles()[0].origin);
    }

    #[test]
    fn check_only_when_full() {
        let mut b = board("ab", "ba");
        place(&mut b, 1, 0);
        assert_eq!(b.check(), None);
        place(&mut b, 0, 1);
        assert_eq!(b.formed_word().as_deref(), Some("ab"));
        assert_eq!(b.check(), Some(Verdict::Correct));
    }

    #[test]
    fn check_is_case_sensitive() {
        let mut b = board("Ab", "ab");
        place(&mut b, 0, 0);
        place(&mut b, 1, 1);
        assert_eq!(b.check(), Some(Verdict::Wrong));
    }

    #[test]
    fn repeated_letters_in_any_order_spell_the_word() {
        let mut b = board("noon", "noon");
        place(&mut b, 3, 0);
        place(&mut b, 1, 1);
        place(&mut b, 2, 2);
        place(&mut b, 0, 3);
        assert_eq!(b.check(), Some(Verdict::Correct));
    }

    #[test]
    fn relayout_keeps_placements() {
        let mut b = board("abc", "abc");
        place(&mut b, 2, 0);
        b.layout(600.0, None);
        assert_eq!(b.tiles()[2].zone, Some(0));
        assert_eq!(b.tiles()[2].pos, b.zones()[0].center);
        assert_eq!(b.zones()[1].center.x, 300.0);
        assert_eq!(b.tiles()[0].pos, b.tiles()[0].origin);
    }

    #[test]
    fn hit_tests_find_tiles_and_zones() {
        let b = board("abc", "abc");
        let tile = b.tiles()[1].origin + Vec2::new(20.0, -20.0);
        assert_eq!(b.tile_at(tile), Some(1));
        assert_eq!(b.zone_at(b.zones()[2].center), Some(2));
        assert_eq!(b.zone_at(Vec2::ZERO), None);
    }

    #[test]
    fn random_drag_sequences_stay_consistent() {
        let mut rng = Rng::new(2024);
        for _ in 0..50 {
            let mut b = Board::new("letters", &mut rng, WIDTH);
            for _ in 0..200 {
                let tile = rng.below(7) as usize;
                b.begin_drag(tile);
                assert!(b.is_consistent());
                if rng.below(4) > 0 {
                    let zone = rng.below(7) as usize;
                    b.drop_on(tile, zone);
                }
                b.end_drag(tile);
                assert!(b.is_consistent());
                let zones_taken = b.zones().iter().filter(|z| z.occupied()).count();
                assert_eq!(zones_taken, b.placed_tiles().count());
            }
        }
    }
}
