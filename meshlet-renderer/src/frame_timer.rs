use std::mem::replace;
use std::ops::Deref;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, Default)]
pub struct FrameTime {
	pub frame_time: Duration,
	pub since_start: Duration,
}

impl Deref for FrameTime {
	type Target = Duration;

	fn deref(&self) -> &Self::Target {
		&self.frame_time
	}
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameTimeSummary {
	pub frames: u32,
	pub min: Duration,
	pub avg: Duration,
	pub max: Duration,
}

#[derive(Copy, Clone, Debug)]
pub struct FrameTimer {
	start: Instant,
	last: Instant,
	summary: FrameTimeSummary,
	total: Duration,
}

impl Default for FrameTimer {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameTimer {
	pub fn new() -> Self {
		let now = Instant::now();
		Self {
			start: now,
			last: now,
			summary: FrameTimeSummary::default(),
			total: Duration::ZERO,
		}
	}

	#[allow(clippy::should_implement_trait)]
	pub fn next(&mut self) -> FrameTime {
		let now = Instant::now();
		let time = FrameTime {
			frame_time: now.duration_since(replace(&mut self.last, now)),
			since_start: now.duration_since(self.start),
		};

		let s = &mut self.summary;
		s.min = if s.frames == 0 { time.frame_time } else { s.min.min(time.frame_time) };
		s.max = s.max.max(time.frame_time);
		s.frames += 1;
		self.total += time.frame_time;
		s.avg = self.total / s.frames;
		time
	}

	pub fn summary(&self) -> FrameTimeSummary {
		self.summary
	}
}
