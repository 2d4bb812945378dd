//! Pure per-tick simulation of the runner: player physics, obstacle and cloud
//! streams, collision, score / speed / day-night milestones. No browser types
//! here so the whole module compiles and tests natively on the host; the glue
//! in `runner` owns the canvas and feeds one `tick()` per animation frame.

// --- Tuning constants ---------------------------------------------------------

pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 300.0;
pub const GROUND_HEIGHT: f64 = 20.0;

pub const GRAVITY: f64 = 0.6;
pub const JUMP_FORCE: f64 = -15.0;

pub const DINO_X: f64 = 50.0;
pub const DINO_WIDTH: f64 = 44.0;
pub const DINO_HEIGHT: f64 = 47.0;
pub const DINO_DUCK_HEIGHT: f64 = 30.0;
/// Resting y of the player: standing on the ground strip.
pub const DINO_REST_Y: f64 = CANVAS_HEIGHT - GROUND_HEIGHT - DINO_HEIGHT;

pub const CACTUS_SMALL_WIDTH: f64 = 17.0;
pub const CACTUS_SMALL_HEIGHT: f64 = 35.0;
pub const CACTUS_LARGE_WIDTH: f64 = 25.0;
pub const CACTUS_LARGE_HEIGHT: f64 = 50.0;

pub const CLOUD_WIDTH: f64 = 46.0;
pub const CLOUD_HEIGHT: f64 = 14.0;

pub const START_SPEED: f64 = 4.0;
pub const SPEED_STEP: f64 = 0.5;
/// Raw-score interval at which speed ramps and the sky flips (50 displayed points).
pub const MILESTONE_INTERVAL: u64 = 500;

/// Spawn a new cactus once the newest one is this far from the right edge.
pub const OBSTACLE_SPAWN_GAP: f64 = 500.0;
pub const CLOUD_SPAWN_GAP: f64 = 200.0;

/// Ticks between run-animation frame toggles while grounded.
pub const RUN_FRAME_DELAY: u32 = 5;

/// Cactus colors, applied in order and cycled.
pub const CACTUS_COLORS: [&str; 6] = [
    "#2a9d8f", // teal
    "#e76f51", // coral
    "#8338ec", // purple
    "#fb8500", // orange
    "#ffb703", // yellow
    "#3a86ff", // blue
];

// --- Geometry -----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Axis-aligned overlap test. Edge contact counts as an overlap (the
/// separating checks are strict), which makes near-miss grazes register.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.x + a.w < b.x || a.x > b.x + b.w || a.y + a.h < b.y || a.y > b.y + b.h)
}

// --- Randomness ---------------------------------------------------------------

/// Minimal LCG for spawn jitter (not crypto secure). Seeded once from
/// `performance.now()` by the glue layer; deterministic under test.
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform-ish value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

// --- Player -------------------------------------------------------------------

/// Sprite-sheet frames for the player. `Standing` is shown airborne, the two
/// run frames alternate while grounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DinoFrame {
    Standing,
    Run1,
    Run2,
}

impl DinoFrame {
    /// Column of this frame in the 3-frame sprite sheet.
    pub fn sheet_index(self) -> u32 {
        match self {
            DinoFrame::Standing => 0,
            DinoFrame::Run1 => 1,
            DinoFrame::Run2 => 2,
        }
    }
}

#[derive(Debug)]
pub struct Dino {
    pub y: f64,
    pub velocity: f64,
    pub jumping: bool,
    pub ducking: bool,
    pub frame: DinoFrame,
    frame_counter: u32,
}

impl Dino {
    pub fn new() -> Self {
        Self {
            y: DINO_REST_Y,
            velocity: 0.0,
            jumping: false,
            ducking: false,
            frame: DinoFrame::Run1,
            frame_counter: 0,
        }
    }

    /// Begin a jump; ignored while already airborne.
    pub fn jump(&mut self) {
        if !self.jumping {
            self.jumping = true;
            self.velocity = JUMP_FORCE;
        }
    }

    /// Held duck state from input. Ducking only squashes the hitbox while
    /// grounded; an airborne duck is remembered but has no effect until landing.
    pub fn set_duck(&mut self, ducking: bool) {
        self.ducking = ducking;
    }

    /// Advance animation and jump physics by one tick.
    pub fn update(&mut self) {
        if self.jumping {
            self.frame = DinoFrame::Standing;
            self.velocity += GRAVITY;
            self.y += self.velocity;
            if self.y > DINO_REST_Y {
                self.y = DINO_REST_Y;
                self.jumping = false;
                self.velocity = 0.0;
            }
        } else {
            self.frame_counter += 1;
            if self.frame_counter >= RUN_FRAME_DELAY {
                self.frame = if self.frame == DinoFrame::Run1 {
                    DinoFrame::Run2
                } else {
                    DinoFrame::Run1
                };
                self.frame_counter = 0;
            }
        }
    }

    /// Collision box; lowered to the duck height while ducking on the ground.
    pub fn hitbox(&self) -> Rect {
        if self.ducking && !self.jumping {
            Rect {
                x: DINO_X,
                y: CANVAS_HEIGHT - GROUND_HEIGHT - DINO_DUCK_HEIGHT,
                w: DINO_WIDTH,
                h: DINO_DUCK_HEIGHT,
            }
        } else {
            Rect {
                x: DINO_X,
                y: self.y,
                w: DINO_WIDTH,
                h: DINO_HEIGHT,
            }
        }
    }
}

impl Default for Dino {
    fn default() -> Self {
        Self::new()
    }
}

// --- Obstacles & clouds -------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CactusKind {
    Small,
    Large,
}

impl CactusKind {
    pub fn width(self) -> f64 {
        match self {
            CactusKind::Small => CACTUS_SMALL_WIDTH,
            CactusKind::Large => CACTUS_LARGE_WIDTH,
        }
    }

    pub fn height(self) -> f64 {
        match self {
            CactusKind::Small => CACTUS_SMALL_HEIGHT,
            CactusKind::Large => CACTUS_LARGE_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub kind: CactusKind,
    pub x: f64,
    pub color: &'static str,
}

impl Obstacle {
    /// Obstacles sit on the ground strip.
    pub fn y(&self) -> f64 {
        CANVAS_HEIGHT - GROUND_HEIGHT - self.kind.height()
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y(),
            w: self.kind.width(),
            h: self.kind.height(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

// --- World --------------------------------------------------------------------

/// What a single tick observed; the glue layer reacts to these (background
/// flip, game-over overlay) without inspecting the whole world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub collided: bool,
    pub night_toggled: bool,
}

pub struct World {
    pub dino: Dino,
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub speed: f64,
    /// Raw score; one point per tick. Displayed score is `raw / 10`.
    pub score: u64,
    pub high_score: u64,
    pub night: bool,
    pub game_over: bool,
    color_cursor: usize,
    rng: Lcg,
}

impl World {
    pub fn new(seed: u32) -> Self {
        Self {
            dino: Dino::new(),
            obstacles: Vec::new(),
            clouds: Vec::new(),
            speed: START_SPEED,
            score: 0,
            high_score: 0,
            night: false,
            game_over: false,
            color_cursor: 0,
            rng: Lcg::new(seed),
        }
    }

    pub fn display_score(&self) -> u64 {
        self.score / 10
    }

    pub fn display_high_score(&self) -> u64 {
        self.high_score / 10
    }

    /// Advance the whole world by one animation frame. Does nothing once the
    /// game is over; `restart()` re-arms it.
    pub fn tick(&mut self) -> TickOutcome {
        let mut out = TickOutcome::default();
        if self.game_over {
            return out;
        }

        // Clouds: drift at their own speed, recycle off the left edge.
        if self
            .clouds
            .last()
            .map_or(true, |c| c.x < CANVAS_WIDTH - CLOUD_SPAWN_GAP)
        {
            self.spawn_cloud();
        }
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
        }
        self.clouds.retain(|c| c.x >= -CLOUD_WIDTH);

        self.dino.update();

        // Obstacles: keep a cactus inbound once the newest clears the gap.
        if self
            .obstacles
            .last()
            .map_or(true, |o| o.x < CANVAS_WIDTH - OBSTACLE_SPAWN_GAP)
        {
            self.spawn_obstacle();
        }
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }

        let hitbox = self.dino.hitbox();
        if self
            .obstacles
            .iter()
            .any(|o| rects_overlap(&hitbox, &o.rect()))
        {
            self.game_over = true;
            out.collided = true;
            return out;
        }
        self.obstacles.retain(|o| o.x > -o.kind.width());

        self.score += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        if self.score % MILESTONE_INTERVAL == 0 {
            self.speed += SPEED_STEP;
            self.night = !self.night;
            out.night_toggled = true;
        }
        out
    }

    /// Reset for a fresh run. The high score and the palette cursor survive.
    pub fn restart(&mut self) {
        self.game_over = false;
        self.score = 0;
        self.speed = START_SPEED;
        self.night = false;
        self.dino = Dino::new();
        self.obstacles.clear();
        self.clouds.clear();
    }

    fn spawn_obstacle(&mut self) {
        let kind = if self.rng.next_f64() < 0.5 {
            CactusKind::Small
        } else {
            CactusKind::Large
        };
        let color = CACTUS_COLORS[self.color_cursor];
        self.color_cursor = (self.color_cursor + 1) % CACTUS_COLORS.len();
        self.obstacles.push(Obstacle {
            kind,
            x: CANVAS_WIDTH,
            color,
        });
    }

    fn spawn_cloud(&mut self) {
        self.clouds.push(Cloud {
            x: CANVAS_WIDTH + self.rng.next_f64() * 100.0,
            y: 30.0 + self.rng.next_f64() * 40.0,
            speed: 1.0 + self.rng.next_f64(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_rises_then_lands_back_on_rest_y() {
        let mut dino = Dino::new();
        dino.jump();
        assert!(dino.jumping);
        let mut min_y = dino.y;
        for _ in 0..200 {
            dino.update();
            min_y = min_y.min(dino.y);
            if !dino.jumping {
                break;
            }
        }
        assert!(!dino.jumping, "jump should finish within 200 ticks");
        assert_eq!(dino.y, DINO_REST_Y);
        assert_eq!(dino.velocity, 0.0);
        assert!(min_y < DINO_REST_Y - 50.0, "jump should gain real height");
    }

    #[test]
    fn double_jump_is_rejected() {
        let mut dino = Dino::new();
        dino.jump();
        dino.update();
        let v = dino.velocity;
        dino.jump();
        assert_eq!(dino.velocity, v, "mid-air jump must not reset velocity");
    }

    #[test]
    fn run_frames_alternate_on_the_ground() {
        let mut dino = Dino::new();
        assert_eq!(dino.frame, DinoFrame::Run1);
        for _ in 0..RUN_FRAME_DELAY {
            dino.update();
        }
        assert_eq!(dino.frame, DinoFrame::Run2);
        for _ in 0..RUN_FRAME_DELAY {
            dino.update();
        }
        assert_eq!(dino.frame, DinoFrame::Run1);
    }

    #[test]
    fn airborne_dino_shows_standing_frame() {
        let mut dino = Dino::new();
        dino.jump();
        dino.update();
        assert_eq!(dino.frame, DinoFrame::Standing);
    }

    #[test]
    fn duck_lowers_grounded_hitbox_only() {
        let mut dino = Dino::new();
        dino.set_duck(true);
        let ducked = dino.hitbox();
        assert_eq!(ducked.h, DINO_DUCK_HEIGHT);
        assert_eq!(ducked.y + ducked.h, CANVAS_HEIGHT - GROUND_HEIGHT);

        dino.jump();
        dino.update();
        let airborne = dino.hitbox();
        assert_eq!(airborne.h, DINO_HEIGHT, "duck is ignored while airborne");
    }

    #[test]
    fn lcg_is_deterministic_and_in_range() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..100 {
            let va = a.next_f64();
            assert_eq!(va, b.next_f64());
            assert!((0.0..1.0).contains(&va));
        }
        let mut c = Lcg::new(43);
        assert_ne!(Lcg::new(42).next_u32(), c.next_u32());
    }

    #[test]
    fn cactus_colors_cycle_in_palette_order() {
        let mut world = World::new(7);
        for expected in CACTUS_COLORS.iter().chain(CACTUS_COLORS.iter()) {
            world.spawn_obstacle();
            assert_eq!(world.obstacles.last().unwrap().color, *expected);
        }
    }

    #[test]
    fn spawned_obstacles_sit_on_the_ground() {
        let mut world = World::new(7);
        world.spawn_obstacle();
        let o = world.obstacles[0];
        assert_eq!(o.x, CANVAS_WIDTH);
        assert_eq!(o.y() + o.kind.height(), CANVAS_HEIGHT - GROUND_HEIGHT);
    }
}
