use std::io::{self, Write};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use lifeflow_core::features::timer::{Notifier, StudyTimer, TimerEvent};

use crate::error::CliError;

/// Rings the terminal bell; only when `--notify` was passed.
pub struct TerminalNotifier {
    granted: bool,
}

impl TerminalNotifier {
    pub const fn new(granted: bool) -> Self {
        Self { granted }
    }
}

impl Notifier for TerminalNotifier {
    fn permission_granted(&self) -> bool {
        self.granted
    }

    fn notify(&self, title: &str, body: &str) {
        println!("\x07{title} {body}");
    }
}

/// Keyboard controls read from stdin while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    Toggle,
    Reset,
    Quit,
}

impl TimerControl {
    /// Empty line or `p` toggles, `r` resets, `q` quits.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "p" | "pause" | "resume" => Some(Self::Toggle),
            "r" | "reset" => Some(Self::Reset),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Ctrl-C pauses a running timer and quits an idle one.
    pub const fn for_interrupt(timer: &StudyTimer) -> Self {
        if timer.is_running() {
            Self::Toggle
        } else {
            Self::Quit
        }
    }
}

/// Apply `control`; `false` means the command should end.
pub fn apply_control(timer: &mut StudyTimer, control: TimerControl) -> bool {
    match control {
        TimerControl::Toggle => {
            timer.toggle();
            true
        }
        TimerControl::Reset => {
            timer.reset();
            true
        }
        TimerControl::Quit => false,
    }
}

pub async fn run_timer(notify: bool) -> Result<(), CliError> {
    let notifier = TerminalNotifier::new(notify);
    let mut timer = StudyTimer::new();
    timer.toggle();
    println!("Enter: pause/resume, r: reset, q: quit. Ctrl-C pauses, twice quits.");
    render(&timer)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;
    loop {
        let control = tokio::select! {
            _ = interval.tick() => {
                if timer.tick(&notifier) == TimerEvent::Completed {
                    render(&timer)?;
                    println!();
                    println!("Sessions completed: {}", timer.sessions());
                }
                render(&timer)?;
                continue;
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match TimerControl::parse(&line) {
                    Some(control) => control,
                    None => continue,
                },
                None => {
                    stdin_open = false;
                    continue;
                }
            },
            result = tokio::signal::ctrl_c() => {
                result?;
                println!();
                TimerControl::for_interrupt(&timer)
            }
        };

        if !apply_control(&mut timer, control) {
            println!();
            println!("Stopped at {}", timer.display());
            break;
        }
        if !timer.is_running() {
            println!();
            println!("Paused at {}", timer.display());
        }
        render(&timer)?;
    }
    Ok(())
}

fn render(timer: &StudyTimer) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    write!(stdout, "\r{}  {:>3.0}%", timer.display(), timer.progress())?;
    stdout.flush()?;
    Ok(())
}
