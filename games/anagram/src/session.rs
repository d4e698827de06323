//! Word cursor, score and the session clock.

use crate::content::WordEntry;

/// Where the cursor went after a `next` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the word at this index.
    Moved(usize),
    /// There was no next word; the session is over.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Session {
    words: Vec<WordEntry>,
    index: usize,
    score: u32,
    finished: bool,
}

impl Session {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self {
            words,
            index: 0,
            score: 0,
            finished: false,
        }
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.words.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn add_point(&mut self) -> u32 {
        self.score += 1;
        self.score
    }

    /// Step forward; past the last word the session finishes.
    pub fn next(&mut self) -> Advance {
        if self.index + 1 < self.words.len() {
            self.index += 1;
            Advance::Moved(self.index)
        } else {
            self.finished = true;
            Advance::Finished
        }
    }

    /// Step back. Returns false at the first word.
    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.score = 0;
        self.finished = false;
    }
}

/// Session clock: counts down from a limit, or up when there is none.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    /// Seconds; 0 means no limit.
    limit: u32,
    elapsed: f32,
    paused: bool,
}

impl SessionTimer {
    pub fn new(limit_secs: u32) -> Self {
        Self {
            limit: limit_secs,
            elapsed: 0.0,
            paused: false,
        }
    }

    pub fn is_countdown(&self) -> bool {
        self.limit > 0
    }

    /// Advance by `dt` seconds. Returns true on the tick a countdown runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed += dt;
        if self.is_countdown() && self.elapsed >= self.limit as f32 {
            self.elapsed = self.limit as f32;
            self.paused = true;
            return true;
        }
        false
    }

    /// Whole seconds played so far.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed as u32
    }

    /// The value shown to the player: seconds left, or seconds played.
    pub fn display_secs(&self) -> u32 {
        if self.is_countdown() {
            (self.limit as f32 - self.elapsed).ceil().max(0.0) as u32
        } else {
            self.elapsed_secs()
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.paused = false;
    }
}
