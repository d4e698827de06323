/// Fixed timestep accumulator.
/// Runs game logic at a steady rate regardless of the host's frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Most steps run for a single frame; a long stall (tab switch) is
    /// dropped instead of replayed.
    const MAX_STEPS: u32 = 8;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator = (self.accumulator + frame_dt.max(0.0)).min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Handle to a scheduled call, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    remaining: f32,
    tag: u32,
}

/// One-shot delayed calls.
///
/// Games schedule a numeric `tag` to fire after a delay and receive it back
/// from [`Timers::tick`] on the step the delay runs out, in scheduling order.
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<Pending>,
    next_id: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `tag` to fire after `delay_ms` milliseconds.
    pub fn after_ms(&mut self, delay_ms: u32, tag: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            id,
            remaining: delay_ms as f32 / 1000.0,
            tag,
        });
        id
    }

    /// Cancel a scheduled call. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        before != self.pending.len()
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Advance all timers by `dt` seconds and return the tags that fired.
    pub fn tick(&mut self, dt: f32) -> Vec<u32> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|p| {
            p.remaining -= dt;
            if p.remaining <= 0.0 {
                fired.push(p.tag);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
