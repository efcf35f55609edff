use web_time::{Duration, Instant};

/// Length of one FPS measurement window.
const WINDOW: Duration = Duration::from_secs(1);

/// Frame counter reporting the frame rate once per second, with optional
/// frame limiting.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Start of the current measurement window
    window_start: Instant,
    /// Frames finished inside the current window
    frames_in_window: u32,
    /// Rate measured over the last complete window
    fps: Option<f32>,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    fn starting_at(target_fps: u32, now: Instant) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: now,
            window_start: now,
            frames_in_window: 0,
            fps: None,
        }
    }

    /// Call at the start of each frame. Returns true if enough time has passed
    /// to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering. Returns `true` when a measurement window just
    /// closed and [`fps`](Self::fps) changed.
    pub fn end_frame(&mut self) -> bool {
        self.end_frame_at(Instant::now())
    }

    fn end_frame_at(&mut self, now: Instant) -> bool {
        self.last_frame = now;
        self.frames_in_window += 1;

        let elapsed = now.duration_since(self.window_start);
        if elapsed < WINDOW {
            return false;
        }
        self.fps = Some(self.frames_in_window as f32 / elapsed.as_secs_f32());
        self.frames_in_window = 0;
        self.window_start = now;
        true
    }

    /// Frame rate over the last full second, `None` during the first.
    #[must_use]
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }

    /// Display text such as `"59.94 fps"`, or `"?? fps"` before the first
    /// measurement.
    #[must_use]
    pub fn label(&self) -> String {
        self.fps
            .map_or_else(|| "?? fps".to_owned(), |fps| format!("{fps:.2} fps"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_until_first_second() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(0, start);
        assert_eq!(timing.label(), "?? fps");
        for i in 1..30 {
            assert!(!timing.end_frame_at(start + Duration::from_millis(i * 10)));
        }
        assert!(timing.fps().is_none());
    }

    #[test]
    fn counts_frames_per_window() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(0, start);
        let mut closed = 0;
        for i in 1..=120 {
            if timing.end_frame_at(start + Duration::from_millis(i * 20)) {
                closed += 1;
            }
        }
        // 50 frames per second of simulated time, two windows closed.
        assert_eq!(closed, 2);
        let fps = timing.fps().unwrap();
        assert!((fps - 50.0).abs() < 0.5, "{fps}");
        assert_eq!(timing.label(), "50.00 fps");
    }

    #[test]
    fn unlimited_always_renders() {
        assert!(FrameTiming::new(0).should_render());
    }
}
