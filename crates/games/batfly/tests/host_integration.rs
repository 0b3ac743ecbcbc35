use arcade_core::TerminalOutcome;
use arcade_host::GameHost;
use batfly_sim::{BatflyAction, BatflyConfig, BatflyEvent, BatflyGame};

/// Flap whenever the bat sinks below the corridor centre.
fn autopilot(seed: u64, max_ticks: u64) -> (Option<TerminalOutcome>, Vec<BatflyEvent>) {
    let mut host = GameHost::<BatflyGame>::from_config(BatflyConfig::default(), seed);
    let player = host.join_player();
    host.submit_now(player, BatflyAction::Flap);

    let mut events = Vec::new();
    while host.current_tick() < max_ticks {
        let game = host.game();
        if game.player().is_started() && game.player().position().y > game.path().path_y() {
            host.submit_now(player, BatflyAction::Flap);
        }
        match host.step_one_tick() {
            Some(tick_events) => events.extend(tick_events),
            None => break,
        }
    }
    (host.game().outcome(), events)
}

#[test]
fn seeded_runs_replay_exactly() {
    let a = autopilot(42, 3_000);
    let b = autopilot(42, 3_000);
    assert_eq!(a, b);
}

#[test]
fn first_flap_starts_the_run() {
    let (_, events) = autopilot(9, 10);
    assert_eq!(events.first(), Some(&BatflyEvent::Started));
}

#[test]
fn a_run_without_input_never_ends() {
    let mut host = GameHost::<BatflyGame>::new(BatflyConfig::default(), 0, 60);
    let result = host.run_for_ticks(600);
    assert!(result.outcome.is_none());
    assert!(result.events.is_empty());
    assert_eq!(host.observe(0).tick, 600);
}

#[test]
fn host_restart_after_a_crash() {
    let mut host = GameHost::<BatflyGame>::from_config(BatflyConfig::default(), 3);
    let player = host.join_player();

    // one flap and then nothing: the bat drops out of the screen
    host.submit_now(player, BatflyAction::Flap);
    let result = host.run_for_ticks(2_000);
    assert_eq!(result.outcome, Some(TerminalOutcome::Lose));
    assert!(result.events.contains(&BatflyEvent::LeftScreen));

    host.restart();
    let obs = host.observe(player);
    assert!(obs.outcome.is_none());
    assert_eq!(obs.score, 0);
    assert!(host.step_one_tick().is_some());
}
