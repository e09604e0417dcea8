use std::time::Instant;

use anyhow::Context;
use crossterm::event;
use gauge_core::{update, AppState, Msg, RequestEpoch};
use gauge_engine::EngineHandle;
use gauge_logging::{gauge_info, gauge_warn};

use super::catalog::load_catalog;
use super::config::Args;
use super::effects::EffectRunner;
use super::ui::constants::{NOTICE_TTL, POLL_INTERVAL};
use super::ui::keys::{map_event, KeyAction};
use super::ui::terminal::Terminal;

/// Epoch of the commit whose failure is on screen, and when it appeared.
type NoticeShown = Option<(RequestEpoch, Instant)>;

pub fn run_app(args: &Args) -> anyhow::Result<()> {
    let catalog = load_catalog(args.models.as_deref())?;
    let engine =
        EngineHandle::new(args.engine_settings()).context("failed to start counting engine")?;
    let runner = EffectRunner::new(engine);
    gauge_info!("Counting service at {}", args.api_url);

    let mut state = AppState::new(catalog);
    let result = {
        let mut terminal = Terminal::enter().context("failed to prepare the terminal")?;
        event_loop(&mut terminal, &runner, &mut state)
    };

    finish_session(&mut state, result, &runner)
}

/// Tears the session down whether or not the event loop failed.
fn finish_session(
    state: &mut AppState,
    result: anyhow::Result<()>,
    runner: &EffectRunner,
) -> anyhow::Result<()> {
    if let Err(err) = &result {
        gauge_warn!("Event loop stopped: {:#}", err);
    }
    dispatch(state, Msg::Teardown, runner);
    result
}

fn event_loop(
    terminal: &mut Terminal,
    runner: &EffectRunner,
    state: &mut AppState,
) -> anyhow::Result<()> {
    let mut notice_shown: NoticeShown = None;
    terminal.draw(&state.view())?;

    loop {
        let mut inbox = Vec::new();
        let mut redraw = false;

        if event::poll(POLL_INTERVAL)? {
            match map_event(event::read()?, state.input(), state.catalog()) {
                KeyAction::Dispatch(msg) => inbox.push(msg),
                KeyAction::Redraw => redraw = true,
                KeyAction::Quit => return Ok(()),
                KeyAction::Ignore => {}
            }
        }
        inbox.extend(runner.drain_messages());

        for msg in inbox {
            dispatch(state, msg, runner);
        }

        let (next, dismissal) = track_notice(state, notice_shown, Instant::now());
        notice_shown = next;
        if let Some(msg) = dismissal {
            dispatch(state, msg, runner);
        }

        if state.consume_dirty() || redraw {
            terminal.draw(&state.view())?;
        }
    }
}

/// Follows the on-screen notice and asks for its dismissal once it has been
/// visible for [`NOTICE_TTL`]. A failure at a newer epoch restarts the clock.
fn track_notice(state: &AppState, shown: NoticeShown, now: Instant) -> (NoticeShown, Option<Msg>) {
    match (state.notice(), shown) {
        (None, _) => (None, None),
        (Some(_), Some((epoch, since))) if epoch == state.epoch() => {
            let expired = now.saturating_duration_since(since) >= NOTICE_TTL;
            (shown, expired.then_some(Msg::NoticeDismissed))
        }
        (Some(_), _) => (Some((state.epoch(), now)), None),
    }
}

fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner) {
    let (next, effects) = update(state.clone(), msg);
    *state = next;
    runner.run(effects);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::{CountFailure, Effect, FailureKind, ModelCatalog, ModelProfile, Phase};
    use gauge_engine::EngineSettings;
    use std::time::Duration;

    fn seed_state() -> AppState {
        let catalog = ModelCatalog::new(vec![ModelProfile::new("openai", "OpenAI", 128_000)])
            .unwrap();
        AppState::new(catalog)
    }

    fn failed_count(state: AppState, text: &str) -> AppState {
        let (state, _) = update(state, Msg::TextEdited(text.to_string()));
        let ticket = state.ticket();
        let (state, effects) = update(state, Msg::DebounceElapsed { ticket });
        let epoch = match effects.as_slice() {
            [Effect::SendCount { epoch, .. }] => *epoch,
            other => panic!("expected one SendCount, got {other:?}"),
        };
        let failure = CountFailure::new(FailureKind::Network, "connection refused");
        let (state, _) = update(
            state,
            Msg::CountFinished {
                epoch,
                outcome: Err(failure),
            },
        );
        assert!(state.notice().is_some());
        state
    }

    #[test]
    fn notice_is_dismissed_once_its_time_is_up() {
        let state = failed_count(seed_state(), "hello");
        let start = Instant::now();

        let (shown, dismissal) = track_notice(&state, None, start);
        assert_eq!(shown, Some((state.epoch(), start)));
        assert_eq!(dismissal, None);

        let (shown, dismissal) = track_notice(&state, shown, start + NOTICE_TTL);
        assert_eq!(shown, Some((state.epoch(), start)));
        assert_eq!(dismissal, Some(Msg::NoticeDismissed));

        let (state, _) = update(state, Msg::NoticeDismissed);
        assert_eq!(state.notice(), None);
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(track_notice(&state, shown, start + NOTICE_TTL), (None, None));
    }

    #[test]
    fn notice_stays_before_its_time_is_up() {
        let state = failed_count(seed_state(), "hello");
        let start = Instant::now();
        let (shown, _) = track_notice(&state, None, start);

        let almost = start + NOTICE_TTL - Duration::from_millis(1);
        let (shown, dismissal) = track_notice(&state, shown, almost);
        assert_eq!(shown, Some((state.epoch(), start)));
        assert_eq!(dismissal, None);
    }

    #[test]
    fn failure_at_a_newer_epoch_restarts_the_clock() {
        let state = failed_count(seed_state(), "hello");
        let start = Instant::now();
        let (shown, _) = track_notice(&state, None, start);

        let state = failed_count(state, "hello again");
        let later = start + NOTICE_TTL * 2;
        let (shown, dismissal) = track_notice(&state, shown, later);
        assert_eq!(shown, Some((state.epoch(), later)));
        assert_eq!(dismissal, None);
    }

    #[test]
    fn failed_event_loop_still_closes_the_session() {
        let mut settings = EngineSettings::new("http://127.0.0.1:9");
        settings.quiet_interval = Duration::from_millis(50);
        let runner = EffectRunner::new(EngineHandle::new(settings).unwrap());
        let mut state = seed_state();
        dispatch(&mut state, Msg::TextEdited("hello".to_string()), &runner);
        assert_eq!(state.phase(), Phase::Debouncing);

        let result = finish_session(&mut state, Err(anyhow::anyhow!("terminal lost")), &runner);

        assert_eq!(result.unwrap_err().to_string(), "terminal lost");
        assert!(state.is_closed());
        std::thread::sleep(Duration::from_millis(200));
        assert!(runner.drain_messages().is_empty());
    }

    #[test]
    fn no_notice_means_nothing_to_dismiss() {
        let state = seed_state();
        let start = Instant::now();
        assert_eq!(track_notice(&state, None, start), (None, None));

        let stale = Some((RequestEpoch::new(3), start));
        assert_eq!(track_notice(&state, stale, start + NOTICE_TTL), (None, None));
    }
}
