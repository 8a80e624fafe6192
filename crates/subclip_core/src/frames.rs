use crate::services::FrameService;
use crate::types::Frame;

pub const DEFAULT_FPS: u32 = 25;

/// `HH:MM:SS:FF` timecode at a fixed integer frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    fps: u32,
}

impl Timecode {
    /// A frame rate of zero falls back to [`DEFAULT_FPS`].
    pub fn new(fps: u32) -> Self {
        let fps = if fps == 0 { DEFAULT_FPS } else { fps };
        Self { fps }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Parse `HH:MM:SS:FF`, `HH:MM:SS` or a bare frame count.
    pub fn parse(&self, input: &str) -> Option<Frame> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if input.bytes().all(|b| b.is_ascii_digit()) {
            return input.parse().ok().map(Frame);
        }

        let parts = input
            .split(':')
            .map(|p| p.parse::<i64>().ok().filter(|v| *v >= 0))
            .collect::<Option<Vec<_>>>()?;
        let fps = i64::from(self.fps);
        let (h, m, s, f) = match parts.as_slice() {
            [h, m, s, f] => (*h, *m, *s, *f),
            [h, m, s] => (*h, *m, *s, 0),
            _ => return None,
        };
        if m >= 60 || s >= 60 || f >= fps {
            return None;
        }
        let seconds = h.checked_mul(3600)?.checked_add(m * 60 + s)?;
        seconds.checked_mul(fps)?.checked_add(f).map(Frame)
    }
}

impl Default for Timecode {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl FrameService for Timecode {
    fn format_frame(&self, frame: Frame) -> String {
        let fps = u64::from(self.fps);
        let total = frame.0.unsigned_abs();
        let ff = total % fps;
        let total_secs = total / fps;
        let secs = total_secs % 60;
        let total_mins = total_secs / 60;
        let mins = total_mins % 60;
        let hours = total_mins / 60;
        let sign = if frame.0 < 0 { "-" } else { "" };
        format!("{}{:02}:{:02}:{:02}:{:02}", sign, hours, mins, secs, ff)
    }

    /// Unparseable input starts at frame 0.
    fn start_frame(&self, input: &str) -> Frame {
        self.parse(input).unwrap_or(Frame::ZERO)
    }

    /// Unparseable input ends on the start frame, a one-frame clip.
    fn end_frame(&self, input: &str, start: Frame) -> Frame {
        self.parse(input).unwrap_or(start)
    }
}
