//! Karaoke playback model
//!
//! A clock that can be started, paused and reset, a pitch offset in
//! semitones, and the timed lines the clock is matched against. Nothing here
//! reads the wall clock; callers pass `now` in, and the app ticks it from a
//! `tokio::time::interval`.

use crate::lyrics::LyricLine;
use std::time::{Duration, Instant};

pub const PITCH_MIN: i8 = -12;
pub const PITCH_MAX: i8 = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Transport {
    Stopped,
    Playing { anchor: Instant },
}

/// Snapshot of the model for rendering and logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub current_time: f64,
    pub is_playing: bool,
    pub pitch: i8,
}

#[derive(Debug, Clone)]
pub struct KaraokeModel {
    transport: Transport,
    /// Time banked by earlier play spans.
    accumulated: Duration,
    pitch: i8,
    lines: Vec<LyricLine>,
    active: Option<usize>,
}

impl Default for KaraokeModel {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl KaraokeModel {
    pub fn new(lines: Vec<LyricLine>) -> Self {
        Self {
            transport: Transport::Stopped,
            accumulated: Duration::ZERO,
            pitch: 0,
            lines,
            active: None,
        }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Swap in the lines of a new song and rewind.
    pub fn set_lines(&mut self, lines: Vec<LyricLine>) {
        self.lines = lines;
        self.reset();
    }

    /// Swap in re-rendered text for the same timings, keeping the clock.
    ///
    /// Falls back to [`set_lines`](Self::set_lines) if the line count differs.
    pub fn relabel(&mut self, lines: Vec<LyricLine>) {
        if lines.len() == self.lines.len() {
            self.lines = lines;
        } else {
            self.set_lines(lines);
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.transport, Transport::Playing { .. })
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.transport {
            Transport::Stopped => self.accumulated,
            Transport::Playing { anchor } => {
                self.accumulated + now.saturating_duration_since(anchor)
            }
        }
    }

    pub fn current_time(&self, now: Instant) -> f64 {
        self.elapsed(now).as_secs_f64()
    }

    /// Start the clock. No-op when already playing.
    pub fn play(&mut self, now: Instant) {
        if !self.is_playing() {
            self.transport = Transport::Playing { anchor: now };
        }
    }

    /// Stop the clock, keeping elapsed time.
    pub fn pause(&mut self, now: Instant) {
        if let Transport::Playing { anchor } = self.transport {
            self.accumulated += now.saturating_duration_since(anchor);
            self.transport = Transport::Stopped;
        }
    }

    pub fn stop(&mut self, now: Instant) {
        self.pause(now);
    }

    /// Play if stopped, pause if playing. Returns whether it is now playing.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_playing() {
            self.pause(now);
        } else {
            self.play(now);
        }
        self.is_playing()
    }

    /// Back to zero and stopped. Pitch is kept.
    pub fn reset(&mut self) {
        self.transport = Transport::Stopped;
        self.accumulated = Duration::ZERO;
        self.active = None;
    }

    /// Jump to `secs` without changing whether the clock runs.
    pub fn seek(&mut self, secs: f64, now: Instant) {
        self.accumulated = Duration::from_secs_f64(secs.max(0.0));
        if self.is_playing() {
            self.transport = Transport::Playing { anchor: now };
        }
    }

    pub fn pitch(&self) -> i8 {
        self.pitch
    }

    /// Set the pitch offset, clamped to one octave either way.
    pub fn set_pitch(&mut self, semitones: i8) -> i8 {
        self.pitch = semitones.clamp(PITCH_MIN, PITCH_MAX);
        self.pitch
    }

    pub fn pitch_up(&mut self) -> i8 {
        self.set_pitch(self.pitch.saturating_add(1))
    }

    pub fn pitch_down(&mut self) -> i8 {
        self.set_pitch(self.pitch.saturating_sub(1))
    }

    pub fn state(&self, now: Instant) -> PlaybackState {
        PlaybackState {
            current_time: self.current_time(now),
            is_playing: self.is_playing(),
            pitch: self.pitch,
        }
    }

    /// Line highlighted at the last tick.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Recompute the active line while playing. Returns the new index only
    /// when it moved.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if !self.is_playing() {
            return None;
        }
        let index = active_line(&self.lines, self.current_time(now));
        if index == self.active {
            return None;
        }
        self.active = index;
        index
    }
}

/// Index of the line being sung at `time`.
///
/// That is the line just before the first one starting later than `time`,
/// or the last line once every start has passed. `None` before the first
/// line starts.
pub fn active_line(lines: &[LyricLine], time: f64) -> Option<usize> {
    match lines.iter().position(|line| line.time_secs > time) {
        Some(0) => None,
        Some(next) => Some(next - 1),
        None => lines.len().checked_sub(1),
    }
}

/// Playback rate multiplier for a pitch offset.
pub fn pitch_scale(semitones: i8) -> f64 {
    2f64.powf(f64::from(semitones) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(times: &[f64]) -> Vec<LyricLine> {
        times
            .iter()
            .enumerate()
            .map(|(i, t)| LyricLine::new(*t, format!("line {i}")))
            .collect()
    }

    fn after(t0: Instant, secs: f64) -> Instant {
        t0 + Duration::from_secs_f64(secs)
    }

    #[test]
    fn test_play_advances_clock() {
        let t0 = Instant::now();
        let mut model = KaraokeModel::default();
        assert_eq!(model.current_time(t0), 0.0);

        model.play(t0);
        let state = model.state(after(t0, 2.5));
        assert!(state.is_playing);
        assert!((state.current_time - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_pause_keeps_elapsed() {
        let t0 = Instant::now();
        let mut model = KaraokeModel::default();
        model.play(t0);
        model.pause(after(t0, 3.0));
        assert!(!model.is_playing());
        // Wall time passing while paused does not count.
        assert!((model.current_time(after(t0, 10.0)) - 3.0).abs() < 1e-9);

        model.play(after(t0, 10.0));
        assert!((model.current_time(after(t0, 11.5)) - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_play_twice_keeps_anchor() {
        let t0 = Instant::now();
        let mut model = KaraokeModel::default();
        model.play(t0);
        model.play(after(t0, 1.0));
        assert!((model.current_time(after(t0, 2.0)) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_and_reset() {
        let t0 = Instant::now();
        let mut model = KaraokeModel::default();
        model.set_pitch(3);
        assert!(model.toggle(t0));
        assert!(!model.toggle(after(t0, 1.0)));

        model.reset();
        let state = model.state(after(t0, 5.0));
        assert_eq!(state.current_time, 0.0);
        assert!(!state.is_playing);
        assert_eq!(state.pitch, 3);
    }

    #[test]
    fn test_seek() {
        let t0 = Instant::now();
        let mut model = KaraokeModel::default();
        model.play(t0);
        model.seek(30.0, after(t0, 1.0));
        assert!((model.current_time(after(t0, 2.0)) - 31.0).abs() < 1e-9);
        model.seek(-4.0, after(t0, 2.0));
        assert!(model.current_time(after(t0, 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut model = KaraokeModel::default();
        assert_eq!(model.set_pitch(20), PITCH_MAX);
        assert_eq!(model.pitch_up(), PITCH_MAX);
        assert_eq!(model.set_pitch(-100), PITCH_MIN);
        assert_eq!(model.pitch_down(), PITCH_MIN);
        model.set_pitch(0);
        assert_eq!(model.pitch_up(), 1);
        assert_eq!(model.pitch_down(), 0);
    }

    #[test]
    fn test_active_line() {
        let l = lines(&[5.0, 10.0, 15.0]);
        assert_eq!(active_line(&l, 0.0), None);
        assert_eq!(active_line(&l, 4.99), None);
        assert_eq!(active_line(&l, 5.0), Some(0));
        assert_eq!(active_line(&l, 12.0), Some(1));
        assert_eq!(active_line(&l, 15.0), Some(2));
        assert_eq!(active_line(&l, 500.0), Some(2));
        assert_eq!(active_line(&[], 3.0), None);
    }

    #[test]
    fn test_active_line_unsorted_input() {
        // Lines are matched in stored order, never re-sorted.
        let l = lines(&[10.0, 5.0, 20.0]);
        assert_eq!(active_line(&l, 12.0), Some(1));
    }

    #[test]
    fn test_tick_reports_changes_only() {
        let t0 = Instant::now();
        let mut model = KaraokeModel::new(lines(&[1.0, 2.0]));
        model.play(t0);
        assert_eq!(model.tick(after(t0, 0.5)), None);
        assert_eq!(model.tick(after(t0, 1.1)), Some(0));
        assert_eq!(model.tick(after(t0, 1.5)), None);
        assert_eq!(model.active_index(), Some(0));
        assert_eq!(model.tick(after(t0, 2.2)), Some(1));

        model.pause(after(t0, 2.5));
        assert_eq!(model.tick(after(t0, 9.0)), None);
        assert_eq!(model.active_index(), Some(1));

        model.set_lines(lines(&[100.0]));
        assert_eq!(model.active_index(), None);
        assert!(!model.is_playing());
        assert_eq!(model.current_time(after(t0, 9.0)), 0.0);
    }

    #[test]
    fn test_relabel_keeps_clock() {
        let t0 = Instant::now();
        let mut model = KaraokeModel::new(lines(&[1.0, 2.0]));
        model.play(t0);
        model.tick(after(t0, 1.5));

        let mut renamed = lines(&[1.0, 2.0]);
        renamed[0].text = "naan".to_string();
        model.relabel(renamed);
        assert!(model.is_playing());
        assert_eq!(model.active_index(), Some(0));
        assert_eq!(model.lines()[0].text, "naan");

        model.relabel(lines(&[1.0]));
        assert!(!model.is_playing());
    }

    #[test]
    fn test_pitch_scale() {
        assert!((pitch_scale(0) - 1.0).abs() < 1e-12);
        assert!((pitch_scale(12) - 2.0).abs() < 1e-12);
        assert!((pitch_scale(-12) - 0.5).abs() < 1e-12);
    }
}
