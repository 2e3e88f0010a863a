use crate::alert::Alert;
use crate::error::AppError;
use crate::model::Task;
use crate::storage::json_store::TaskStore;
use crate::timer::IntervalTimer;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

pub const MAX_BREAK_MINUTES: u64 = 60;

const IDLE_DISPLAY: &str = "Timer: --:--";

/// Everything the controller needs from the surrounding UI. The countdown
/// thread never touches this; it is only called from the control thread
/// while draining the event queue.
pub trait Shell {
    fn timer_update(&mut self, display: &str);
    fn confirm_break(&mut self) -> bool;
    fn break_minutes(&mut self, max: u64) -> Option<u64>;
    fn warn(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Work,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    RunningWork { task_index: usize },
    AwaitingBreakDecision,
    RunningBreak,
}

/// Message sent from the countdown thread to the control thread. Carries
/// the run it belongs to; stale runs are dropped on the floor.
#[derive(Debug)]
enum TimerEvent {
    Tick {
        run: u64,
        kind: IntervalKind,
        remaining: u64,
    },
    Finished {
        run: u64,
        kind: IntervalKind,
    },
}

/// Drives the work/break state machine. Owns the task store and at most one
/// live countdown; the countdown thread communicates exclusively through the
/// mpsc queue, so store and shell are only ever touched from the control
/// thread.
pub struct SessionController {
    store: TaskStore,
    alert: Box<dyn Alert>,
    state: SessionState,
    timer: Option<IntervalTimer>,
    run: u64,
    tick_interval: Duration,
    max_break_minutes: u64,
    display: String,
    events_tx: Sender<TimerEvent>,
    events_rx: Receiver<TimerEvent>,
}

impl SessionController {
    pub fn new(store: TaskStore, alert: Box<dyn Alert>) -> Self {
        Self::with_tick_interval(store, alert, Duration::from_secs(1))
    }

    /// Test seam: run countdowns at an arbitrary tick period.
    pub fn with_tick_interval(
        store: TaskStore,
        alert: Box<dyn Alert>,
        tick_interval: Duration,
    ) -> Self {
        let (events_tx, events_rx) = std::sync::mpsc::channel();
        Self {
            store,
            alert,
            state: SessionState::Idle,
            timer: None,
            run: 0,
            tick_interval,
            max_break_minutes: MAX_BREAK_MINUTES,
            display: IDLE_DISPLAY.to_string(),
            events_tx,
            events_rx,
        }
    }

    /// Upper bound accepted for break lengths, normally the configured cap.
    ///
    /// Zero is ignored and the current cap stays in force. The config layer
    /// already substitutes its default for a zero setting, but the cap also
    /// anchors the `1..=cap` prompt range and must stay positive no matter
    /// who calls this.
    pub fn set_break_cap(&mut self, minutes: u64) {
        if minutes > 0 {
            self.max_break_minutes = minutes;
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn add_task(&mut self, name: &str) -> Result<(), AppError> {
        self.store.add(name)
    }

    pub fn remove_task(&mut self, index: usize) -> Result<(), AppError> {
        self.store.remove(index)
    }

    pub fn reset_sessions(&mut self, index: usize) -> Result<(), AppError> {
        self.store.reset_sessions(index)
    }

    /// Starts a work interval for the task at `task_index`. A start while
    /// anything is already running is a defensive no-op, not an error.
    pub fn start(&mut self, task_index: usize, duration_secs: u64) -> Result<(), AppError> {
        if self.state != SessionState::Idle {
            return Ok(());
        }

        if task_index >= self.store.len() {
            return Err(AppError::validation("no task selected"));
        }

        self.spawn_timer(IntervalKind::Work, duration_secs);
        self.state = SessionState::RunningWork { task_index };
        Ok(())
    }

    /// Cancels the active interval, if any, and returns to idle. The
    /// countdown thread winds down on its own; bumping the run counter makes
    /// any events it still emits stale.
    pub fn stop(&mut self) {
        match self.state {
            SessionState::RunningWork { .. } | SessionState::RunningBreak => {
                if let Some(timer) = self.timer.take() {
                    timer.cancel();
                }
                self.run += 1;
                self.go_idle();
            }
            SessionState::Idle | SessionState::AwaitingBreakDecision => {}
        }
    }

    /// Drains every queued timer event without blocking. REPL-style shells
    /// call this before each prompt.
    pub fn pump(&mut self, shell: &mut dyn Shell) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event, shell);
        }
    }

    /// Blocks draining events until the controller is idle again. One-shot
    /// shells use this to run a full session in the foreground.
    pub fn run_blocking(&mut self, shell: &mut dyn Shell) {
        while self.state != SessionState::Idle {
            match self.events_rx.recv() {
                Ok(event) => self.handle_event(event, shell),
                Err(_) => break,
            }
        }
    }

    fn spawn_timer(&mut self, kind: IntervalKind, duration_secs: u64) {
        self.run += 1;
        let run = self.run;
        let tick_tx = self.events_tx.clone();
        let done_tx = self.events_tx.clone();

        let timer = IntervalTimer::start_with_interval(
            duration_secs,
            self.tick_interval,
            move |remaining| {
                let _ = tick_tx.send(TimerEvent::Tick {
                    run,
                    kind,
                    remaining,
                });
            },
            move || {
                let _ = done_tx.send(TimerEvent::Finished { run, kind });
            },
        );
        self.timer = Some(timer);
    }

    fn handle_event(&mut self, event: TimerEvent, shell: &mut dyn Shell) {
        match event {
            TimerEvent::Tick {
                run,
                kind,
                remaining,
            } => {
                if run != self.run {
                    return;
                }
                self.update_display(kind, remaining, shell);
            }
            TimerEvent::Finished { run, kind } => {
                if run != self.run {
                    return;
                }
                match kind {
                    IntervalKind::Work => self.finish_work(shell),
                    IntervalKind::Break => self.finish_break(),
                }
            }
        }
    }

    fn update_display(&mut self, kind: IntervalKind, remaining: u64, shell: &mut dyn Shell) {
        let mins = remaining / 60;
        let secs = remaining % 60;
        self.display = match (kind, self.state) {
            (IntervalKind::Work, SessionState::RunningWork { task_index }) => {
                let name = self
                    .store
                    .tasks()
                    .get(task_index)
                    .map(|task| task.name.as_str())
                    .unwrap_or("?");
                format!("Timer: {mins:02}:{secs:02} - {name}")
            }
            (IntervalKind::Break, SessionState::RunningBreak) => {
                format!("Break: {mins:02}:{secs:02}")
            }
            _ => return,
        };
        shell.timer_update(&self.display);
    }

    fn finish_work(&mut self, shell: &mut dyn Shell) {
        let SessionState::RunningWork { task_index } = self.state else {
            return;
        };

        self.timer = None;
        self.alert.work_complete();

        // The increment happens before the break decision, and a failed
        // save must not wedge the state machine.
        if let Err(err) = self.store.increment_sessions(task_index) {
            shell.warn(&format!("could not save session count: {err}"));
        }

        self.state = SessionState::AwaitingBreakDecision;
        self.display = IDLE_DISPLAY.to_string();

        if shell.confirm_break() {
            match shell.break_minutes(self.max_break_minutes) {
                Some(minutes) if (1..=self.max_break_minutes).contains(&minutes) => {
                    self.spawn_timer(IntervalKind::Break, minutes * 60);
                    self.state = SessionState::RunningBreak;
                    return;
                }
                Some(_) => shell.warn(&format!(
                    "break length must be between 1 and {} minutes",
                    self.max_break_minutes
                )),
                None => {}
            }
        }

        self.go_idle();
    }

    fn finish_break(&mut self) {
        if self.state != SessionState::RunningBreak {
            return;
        }

        self.timer = None;
        self.alert.break_complete();
        self.go_idle();
    }

    fn go_idle(&mut self) {
        self.state = SessionState::Idle;
        self.display = IDLE_DISPLAY.to_string();
    }
}
