use std::time::Duration;
use tokio::sync::{ mpsc, watch };
use tokio::time::{ sleep_until, Instant };

const BASE_DELAY_MS: u64 = 1200;
const PER_CHAR_DELAY_MS: u64 = 8;
const MAX_DELAY_MS: u64 = 1800;
const MIN_TYPING_MS: u64 = 500;
const MAX_THINKING_MS: u64 = 900;

/// The two indicator states shown while a reply is being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposePhase {
    Typing,
    Thinking,
}

/// Length-derived delay for one reply, clamped to a fixed band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeSchedule {
    pub typing: Duration,
    pub thinking: Duration,
}

impl ComposeSchedule {
    pub fn for_response(text: &str) -> Self {
        let delay = (BASE_DELAY_MS + (text.len() as u64) * PER_CHAR_DELAY_MS).min(MAX_DELAY_MS);
        Self {
            typing: Duration::from_millis((delay / 2).max(MIN_TYPING_MS)),
            thinking: Duration::from_millis(delay.min(MAX_THINKING_MS)),
        }
    }

    pub fn total(&self) -> Duration {
        self.typing + self.thinking
    }
}

/// Fires an explicit timer task that can interrupt a pending reply.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that never fires; the schedule always runs to completion.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        CancelToken { rx }
    }
}

async fn wait_phase(duration: Duration, cancel: &mut CancelToken) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        tokio::select! {
            _ = sleep_until(deadline) => {
                return true;
            }
            changed = cancel.rx.changed() => {
                match changed {
                    Ok(()) if *cancel.rx.borrow() => {
                        return false;
                    }
                    Ok(()) => {}
                    Err(_) => {
                        // handle dropped, nothing can cancel us anymore
                        sleep_until(deadline).await;
                        return true;
                    }
                }
            }
        }
    }
}

/// Runs the typing then thinking phase, reporting each to the optional
/// observer. Returns false if the token fired before both phases finished.
pub async fn run_schedule(
    schedule: ComposeSchedule,
    mut cancel: CancelToken,
    observer: Option<&mpsc::Sender<ComposePhase>>
) -> bool {
    for (phase, duration) in [
        (ComposePhase::Typing, schedule.typing),
        (ComposePhase::Thinking, schedule.thinking),
    ] {
        if let Some(tx) = observer {
            let _ = tx.send(phase).await;
        }
        if !wait_phase(duration, &mut cancel).await {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_bands() {
        // empty reply sits at the base delay
        let short = ComposeSchedule::for_response("");
        assert_eq!(short.typing, Duration::from_millis(600));
        assert_eq!(short.thinking, Duration::from_millis(900));

        // 50 chars: 1200 + 400 = 1600
        let mid = ComposeSchedule::for_response(&"x".repeat(50));
        assert_eq!(mid.typing, Duration::from_millis(800));
        assert_eq!(mid.thinking, Duration::from_millis(900));

        // long replies clamp at 1800
        let long = ComposeSchedule::for_response(&"x".repeat(500));
        assert_eq!(long.typing, Duration::from_millis(900));
        assert_eq!(long.thinking, Duration::from_millis(900));
    }

    #[test]
    fn typing_phase_never_drops_below_floor() {
        for len in [0, 10, 75, 200] {
            let schedule = ComposeSchedule::for_response(&"x".repeat(len));
            assert!(schedule.typing >= Duration::from_millis(500));
            assert!(schedule.thinking <= Duration::from_millis(900));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_runs_both_phases_in_order() {
        let (tx, mut rx) = mpsc::channel(4);
        let schedule = ComposeSchedule::for_response("hello there");
        let started = Instant::now();
        let completed = run_schedule(schedule, CancelToken::never(), Some(&tx)).await;
        assert!(completed);
        assert!(started.elapsed() >= schedule.total());
        assert_eq!(rx.recv().await, Some(ComposePhase::Typing));
        assert_eq!(rx.recv().await, Some(ComposePhase::Thinking));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_the_typing_phase() {
        let (tx, mut rx) = mpsc::channel(4);
        let (handle, token) = cancel_pair();
        let schedule = ComposeSchedule::for_response("hello there");
        let timer = tokio::spawn(async move {
            run_schedule(schedule, token, Some(&tx)).await
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
        assert!(!timer.await.unwrap());
        assert_eq!(rx.recv().await, Some(ComposePhase::Typing));
        // thinking never started
        assert_eq!(rx.recv().await, None);
    }
}
