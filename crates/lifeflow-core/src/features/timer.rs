//! Pomodoro study timer. Purely local; the session count lives in memory.

pub const POMODORO_SECONDS: u32 = 25 * 60;
pub const COMPLETE_TITLE: &str = "Pomodoro Complete!";
pub const COMPLETE_BODY: &str = "Great job! Take a break.";

/// Best-effort desktop notification sink.
pub trait Notifier {
    fn permission_granted(&self) -> bool;
    fn notify(&self, title: &str, body: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Not running; nothing changed.
    Idle,
    Ticked,
    /// Reached zero on this tick.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyTimer {
    remaining: u32,
    running: bool,
    sessions: u32,
}

impl Default for StudyTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyTimer {
    pub const fn new() -> Self {
        Self {
            remaining: POMODORO_SECONDS,
            running: false,
            sessions: 0,
        }
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Start or pause. Starting a finished timer begins a fresh session.
    pub fn toggle(&mut self) -> bool {
        if !self.running && self.remaining == 0 {
            self.remaining = POMODORO_SECONDS;
        }
        self.running = !self.running;
        self.running
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = POMODORO_SECONDS;
    }

    /// Advance one second.
    pub fn tick(&mut self, notifier: &impl Notifier) -> TimerEvent {
        if !self.running || self.remaining == 0 {
            return TimerEvent::Idle;
        }

        self.remaining -= 1;
        if self.remaining > 0 {
            return TimerEvent::Ticked;
        }

        self.running = false;
        self.sessions += 1;
        tracing::info!(sessions = self.sessions, "Pomodoro complete");
        if notifier.permission_granted() {
            notifier.notify(COMPLETE_TITLE, COMPLETE_BODY);
        }
        TimerEvent::Completed
    }

    /// Elapsed share of the session, 0.0 to 100.0.
    pub fn progress(&self) -> f64 {
        f64::from(POMODORO_SECONDS - self.remaining) / f64::from(POMODORO_SECONDS) * 100.0
    }

    pub fn display(&self) -> String {
        format_time(self.remaining)
    }
}

/// `MM:SS`, zero padded.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
