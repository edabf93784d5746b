use std::time::Duration;

use glam::{IVec2, UVec2};
use instant::Instant;

use super::state::{self, Observation, PetState, Thresholds};
use crate::config::PetConfig;
use crate::sprites::{SpriteCategory, SpriteLibrary};

/// What the platform reported for this tick.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub now: Instant,
    /// Global cursor position, if known.
    pub mouse: Option<IVec2>,
    /// Window top-left as reported by the platform, if it can tell.
    pub window_pos: Option<IVec2>,
}

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub state: PetState,
    /// Counter value used to pick this tick's frame.
    pub counter: u64,
    /// New window position when the pet walked.
    pub moved_to: Option<IVec2>,
    /// Set when the evaluation changed the state.
    pub transition: Option<(PetState, PetState)>,
}

/// Mutable per-pet animation state.
#[derive(Debug)]
pub struct PetRuntime {
    pub pos: IVec2,
    pub state: PetState,
    /// Monotonic frame counter, never reset on transitions.
    pub counter: u64,
    pub hovering: bool,
    last_eval: Instant,

    thresholds: Thresholds,
    canvas_size: UVec2,
    walk_step: i32,
    eval_interval: Duration,
}

impl PetRuntime {
    pub fn new(cfg: &PetConfig, canvas_size: UVec2, now: Instant) -> Self {
        Self {
            pos: cfg.start_pos,
            state: PetState::Idle,
            counter: 0,
            hovering: false,
            last_eval: now,
            thresholds: Thresholds::from(cfg),
            canvas_size,
            walk_step: cfg.walk_step,
            eval_interval: cfg.eval_interval,
        }
    }

    /// Canvas size in the same units as window and cursor positions.
    pub fn set_canvas_size(&mut self, size: UVec2) {
        self.canvas_size = size;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Advance one tick: maybe re-evaluate the state, walk, bump the counter.
    pub fn tick(&mut self, input: TickInput) -> TickOutcome {
        let mut transition = None;

        if input.now.duration_since(self.last_eval) >= self.eval_interval {
            if let Some(pos) = input.window_pos {
                self.pos = pos;
            }
            if let Some(mouse) = input.mouse {
                let obs = Observation {
                    mouse,
                    window_pos: self.pos,
                    canvas_size: self.canvas_size,
                    hovering: self.hovering,
                };
                let next = state::decide(&obs, self.state, &self.thresholds);
                if next != self.state {
                    transition = Some((self.state, next));
                    self.state = next;
                }
            }
            self.last_eval = input.now;
        }

        let dir = self.state.walk_direction();
        let moved_to = if dir != 0 {
            self.pos.x += dir * self.walk_step;
            Some(self.pos)
        } else {
            None
        };

        let counter = self.counter;
        self.counter = self.counter.wrapping_add(1);

        TickOutcome {
            state: self.state,
            counter,
            moved_to,
            transition,
        }
    }
}

/// Pick the frame for a tick: `(category actually drawn, frame index)`.
pub fn select_frame(library: &SpriteLibrary, outcome: &TickOutcome) -> (SpriteCategory, usize) {
    let (category, set) = library.resolve(outcome.state.category());
    let index = set.frame_index(outcome.counter).unwrap_or(0);
    (category, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    const CANVAS: UVec2 = UVec2::new(100, 100);

    fn runtime(now: Instant) -> PetRuntime {
        PetRuntime::new(&PetConfig::default(), CANVAS, now)
    }

    /// Cursor at `(dx, dy)` from the center of a window at `pos`.
    fn cursor(pos: IVec2, dx: i32, dy: i32) -> Option<IVec2> {
        Some(pos + IVec2::new(50 + dx, 50 + dy))
    }

    fn input(now: Instant, mouse: Option<IVec2>) -> TickInput {
        TickInput {
            now,
            mouse,
            window_pos: None,
        }
    }

    fn frames(n: usize, shade: u8) -> Vec<RgbaImage> {
        (0..n)
            .map(|i| RgbaImage::from_pixel(2, 2, Rgba([shade, i as u8, 0, 255])))
            .collect()
    }

    #[test]
    fn test_first_tick_does_not_evaluate() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let out = rt.tick(input(t0, cursor(rt.pos, 60, 0)));
        assert_eq!(out.state, PetState::Idle);
        assert_eq!(out.counter, 0);
        assert_eq!(rt.counter, 1);
    }

    #[test]
    fn test_evaluation_is_throttled() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let start = rt.pos;

        let out = rt.tick(input(t0 + Duration::from_millis(49), cursor(start, 60, 0)));
        assert_eq!(out.state, PetState::Idle);

        let out = rt.tick(input(t0 + Duration::from_millis(50), cursor(start, 60, 0)));
        assert_eq!(out.state, PetState::Right);
        assert_eq!(out.transition, Some((PetState::Idle, PetState::Right)));

        // Within 50ms of the last evaluation the old state keeps animating.
        let out = rt.tick(input(t0 + Duration::from_millis(60), cursor(start, 0, 80)));
        assert_eq!(out.state, PetState::Right);
        assert_eq!(out.transition, None);
    }

    #[test]
    fn test_walking_moves_window() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let start = rt.pos;

        let out = rt.tick(input(t0 + Duration::from_millis(120), cursor(start, 60, 0)));
        assert_eq!(out.moved_to, Some(start + IVec2::new(2, 0)));

        let here = rt.pos;
        let out = rt.tick(input(t0 + Duration::from_millis(240), cursor(here, -60, 0)));
        assert_eq!(out.state, PetState::Left);
        assert_eq!(out.moved_to, Some(start));
    }

    #[test]
    fn test_non_walk_states_stay_put() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let start = rt.pos;
        let out = rt.tick(input(t0 + Duration::from_millis(120), cursor(start, 0, -40)));
        assert_eq!(out.state, PetState::Headpat);
        assert_eq!(out.moved_to, None);
        assert_eq!(rt.pos, start);
    }

    #[test]
    fn test_window_position_is_resynced_on_evaluation() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let dragged = IVec2::new(1000, 700);
        let out = rt.tick(TickInput {
            now: t0 + Duration::from_millis(120),
            mouse: cursor(dragged, 0, 60),
            window_pos: Some(dragged),
        });
        assert_eq!(rt.pos, dragged);
        assert_eq!(out.state, PetState::Surf);
    }

    #[test]
    fn test_unknown_cursor_keeps_state() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let start = rt.pos;
        rt.tick(input(t0 + Duration::from_millis(120), cursor(start, 0, 60)));
        let out = rt.tick(input(t0 + Duration::from_millis(240), None));
        assert_eq!(out.state, PetState::Surf);
    }

    #[test]
    fn test_hover_flag_feeds_decision() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let start = rt.pos;
        rt.set_hovering(true);
        let out = rt.tick(input(t0 + Duration::from_millis(120), cursor(start, 0, 0)));
        assert_eq!(out.state, PetState::Hover);

        // Stale hover outside the radius keeps the hover animation.
        let out = rt.tick(input(t0 + Duration::from_millis(240), cursor(start, 500, 0)));
        assert_eq!(out.state, PetState::Hover);

        rt.set_hovering(false);
        let out = rt.tick(input(t0 + Duration::from_millis(360), cursor(start, 500, 0)));
        assert_eq!(out.state, PetState::Idle);
    }

    #[test]
    fn test_counter_survives_transitions() {
        let t0 = Instant::now();
        let mut rt = runtime(t0);
        let start = rt.pos;
        let mut counters = Vec::new();
        for (i, dy) in [0, 60, -40, 60].into_iter().enumerate() {
            let now = t0 + Duration::from_millis(120 * (i as u64 + 1));
            counters.push(rt.tick(input(now, cursor(start, 0, dy))).counter);
        }
        assert_eq!(counters, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_select_frame_wraps_and_falls_back() {
        let lib = SpriteLibrary::from_frames(
            [frames(3, 0), frames(4, 1), vec![], vec![], vec![]],
            Path::new("idle"),
        )
        .unwrap();

        let walk = TickOutcome {
            state: PetState::Left,
            counter: 9,
            moved_to: None,
            transition: None,
        };
        assert_eq!(select_frame(&lib, &walk), (SpriteCategory::Walk, 1));

        // Surf has no frames of its own and shows idle's.
        let surf = TickOutcome {
            state: PetState::Surf,
            ..walk
        };
        let (cat, idx) = select_frame(&lib, &surf);
        assert_eq!(idx, 0);
        assert_eq!(
            lib.get(cat).frames()[idx],
            lib.get(SpriteCategory::Idle).frames()[0]
        );
    }
}
