/// Simulation tick timing
///
/// Implements a fixed timestep loop with variable rendering: the simulation
/// advances in whole ticks at a constant rate while frames render as fast as
/// the display allows. Combat and animation arithmetic assume this constant
/// tick rate.
use std::time::{Duration, Instant};

/// Target simulation rate (40 ticks per second)
pub const TICK_RATE: u32 = 40;

/// Length of one simulation tick in seconds
pub const TICK_SECONDS: f32 = 1.0 / TICK_RATE as f32;
const TICK_DURATION: Duration = Duration::from_micros(25_000); // 1/40 second

/// Maximum ticks to run per rendered frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 40;

/// Fixed-rate tick accumulator
pub struct TickClock {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Frames rendered so far
    frame_count: u64,

    /// Simulation ticks executed so far
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of simulation ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Interpolation alpha between the last two ticks, for smooth rendering
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / TICK_SECONDS
    }

    /// Current frames per second
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Frames rendered since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulation ticks executed since creation
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
