//! The render loop and the display it drives
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::framebuffer::PixelBuffer;
use crate::pipeline::FramePipeline;

/// A surface the finished color buffer is shown on.
///
/// Implementations own the window or terminal and its event source. The loop
/// only sees a resolution, a keep-running flag and a place to send frames.
pub trait Display {
    type Error: std::error::Error;

    /// Resolution in pixels, queried once before the pipeline is built.
    fn size(&self) -> (u32, u32);

    /// Drain pending input. Returns `false` once the user asked to quit.
    fn poll_input(&mut self) -> Result<bool, Self::Error>;

    /// Show a fully drawn frame.
    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), Self::Error>;
}

/// Sleeps at the end of each frame to hold a target frame rate
#[derive(Debug)]
pub struct FrameLimiter {
    target: Option<Duration>,
    last_frame: Instant,
}

impl FrameLimiter {
    /// `fps == 0` turns pacing off.
    pub fn new(fps: u32) -> Self {
        let target = (fps > 0).then(|| Duration::from_secs(1) / fps);
        Self {
            target,
            last_frame: Instant::now(),
        }
    }

    pub fn target(&self) -> Option<Duration> {
        self.target
    }

    /// Block until the target frame time has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(target) = self.target {
            let elapsed = self.last_frame.elapsed();
            if elapsed < target {
                std::thread::sleep(target - elapsed);
            }
        }
        self.last_frame = Instant::now();
    }
}

/// Summary of a finished loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub frames: u64,
}

/// Run Input -> Update -> Render until the display asks to stop or
/// `max_frames` frames have been shown.
pub fn run<D: Display>(
    pipeline: &mut FramePipeline,
    display: &mut D,
    limiter: &mut FrameLimiter,
    max_frames: Option<u64>,
) -> Result<FrameStats, D::Error> {
    let mut stats = FrameStats::default();
    let mut fps_window = Instant::now();
    let mut fps_frames = 0u32;

    info!("render loop started");
    while max_frames.map_or(true, |max| stats.frames < max) {
        if !display.poll_input()? {
            info!("quit requested");
            break;
        }

        pipeline.update();
        pipeline.render(display)?;
        stats.frames += 1;

        limiter.wait();

        fps_frames += 1;
        let window = fps_window.elapsed();
        if window >= Duration::from_secs(1) {
            debug!("{:.1} fps", fps_frames as f32 / window.as_secs_f32());
            fps_frames = 0;
            fps_window = Instant::now();
        }
    }
    info!("render loop finished after {} frames", stats.frames);

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::geometry::Mesh;
    use std::fmt;

    #[derive(Debug)]
    struct Unplugged;

    impl fmt::Display for Unplugged {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "display unplugged")
        }
    }

    impl std::error::Error for Unplugged {}

    /// Quits after `frames_left` polls, optionally failing on present.
    struct Scripted {
        frames_left: u32,
        presented: u32,
        fail_present: bool,
        saw_edges: bool,
    }

    impl Scripted {
        fn new(frames_left: u32) -> Self {
            Self {
                frames_left,
                presented: 0,
                fail_present: false,
                saw_edges: false,
            }
        }
    }

    impl Display for Scripted {
        type Error = Unplugged;

        fn size(&self) -> (u32, u32) {
            (200, 150)
        }

        fn poll_input(&mut self) -> Result<bool, Unplugged> {
            if self.frames_left == 0 {
                return Ok(false);
            }
            self.frames_left -= 1;
            Ok(true)
        }

        fn present(&mut self, buffer: &PixelBuffer) -> Result<(), Unplugged> {
            if self.fail_present {
                return Err(Unplugged);
            }
            let edge = RenderConfig::default().edge_color.0;
            self.saw_edges |= buffer.pixels().contains(&edge);
            self.presented += 1;
            Ok(())
        }
    }

    fn pipeline_for(display: &Scripted) -> FramePipeline {
        let (width, height) = display.size();
        let config = RenderConfig {
            fov_factor: 100.0,
            ..RenderConfig::default()
        };
        FramePipeline::new(Mesh::cube(), config, width, height).unwrap()
    }

    #[test]
    fn test_stops_when_display_quits() {
        let mut display = Scripted::new(3);
        let mut pipeline = pipeline_for(&display);
        let stats = run(&mut pipeline, &mut display, &mut FrameLimiter::new(0), None).unwrap();
        assert_eq!(stats.frames, 3);
        assert_eq!(display.presented, 3);
        assert!(display.saw_edges);
    }

    #[test]
    fn test_stops_at_frame_limit() {
        let mut display = Scripted::new(100);
        let mut pipeline = pipeline_for(&display);
        let stats = run(&mut pipeline, &mut display, &mut FrameLimiter::new(0), Some(4)).unwrap();
        assert_eq!(stats.frames, 4);
        assert!((pipeline.rotation().x - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_present_error_propagates() {
        let mut display = Scripted::new(5);
        display.fail_present = true;
        let mut pipeline = pipeline_for(&display);
        let result = run(&mut pipeline, &mut display, &mut FrameLimiter::new(0), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_limiter_target() {
        assert_eq!(FrameLimiter::new(0).target(), None);
        assert_eq!(
            FrameLimiter::new(50).target(),
            Some(Duration::from_millis(20))
        );
    }

    #[test]
    fn test_limiter_paces_frames() {
        let mut limiter = FrameLimiter::new(100);
        let start = Instant::now();
        limiter.wait();
        limiter.wait();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
