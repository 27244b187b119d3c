use std::time::{Duration, Instant};

/// Paces frames to a fixed rate against a monotonic clock.
pub struct FrameClock {
    frame_time: Option<Duration>,
    last_frame: Instant,
}

impl FrameClock {
    /// # Arguments
    /// * `frame_rate` frames per second; 0 disables pacing
    pub fn new(frame_rate: u32) -> Self {
        let frame_time = if frame_rate == 0 {
            None
        } else {
            Some(Duration::from_secs(1) / frame_rate)
        };
        FrameClock {
            frame_time,
            last_frame: Instant::now(),
        }
    }

    /// Sleeps out whatever is left of the current frame.
    pub fn tick(&mut self) {
        if let Some(frame_time) = self.frame_time {
            let elapsed = self.last_frame.elapsed();
            if frame_time > elapsed {
                std::thread::sleep(frame_time - elapsed);
            }
        }
        self.last_frame = Instant::now();
    }

    pub fn frame_time(&self) -> Option<Duration> {
        self.frame_time
    }
}
