use glam::Vec3;
use lane_runner::consts::{COLLECTIBLE_Y, GROUND_Y, OBSTACLE_Y, START_LANE};
use lane_runner::platform::FixedClock;
use lane_runner::sim::{
    Collectible, CollectibleKind, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind,
    PowerUpKind, TickInput, tick,
};
use lane_runner::{HudSnapshot, Notification, Runner, Tuning, UiSink, WorldSink, lane_offset};

const DT: f32 = 1.0 / 60.0;

/// Running session with no passive score and no random spawns
fn quiet_session() -> GameState {
    let tuning = Tuning { distance_score_factor: 0.0, ..Default::default() };
    let mut state = GameState::with_tuning(2024, tuning);
    tick(&mut state, &TickInput { start: true, ..Default::default() }, DT);
    state.spawner.timer = f32::MAX;
    state.drain_events();
    state
}

fn obstacle_in_player_lane(state: &mut GameState) -> u32 {
    let id = state.spawner.next_entity_id();
    state.spawner.obstacles.push(Obstacle {
        id,
        kind: ObstacleKind::Barrier,
        pos: Vec3::new(lane_offset(state.player.lane), OBSTACLE_Y, state.player.pos.z),
    });
    id
}

fn coin_at(state: &mut GameState, x: f32) -> u32 {
    let id = state.spawner.next_entity_id();
    let z = state.player.pos.z;
    state
        .spawner
        .collectibles
        .push(Collectible::new(id, CollectibleKind::Coin, x, COLLECTIBLE_Y, z, 0.0));
    id
}

#[test]
fn obstacle_in_player_lane_ends_the_run() {
    let mut state = quiet_session();
    obstacle_in_player_lane(&mut state);
    tick(&mut state, &TickInput::default(), DT);

    assert_eq!(state.phase, GamePhase::GameOver);
    let events = state.drain_events();
    assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
}

#[test]
fn shield_absorbs_the_same_hit() {
    let mut state = quiet_session();
    state.powerups.activate(PowerUpKind::Shield, 8.0, None);
    let id = obstacle_in_player_lane(&mut state);
    tick(&mut state, &TickInput::default(), DT);

    assert_eq!(state.phase, GamePhase::Running);
    assert!(!state.powerups.shield.active);
    let events = state.drain_events();
    assert!(events.contains(&GameEvent::ShieldBroken));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ObstacleSmashed { id: smashed, .. } if *smashed == id))
    );
}

#[test]
fn coin_adds_exactly_ten() {
    let mut state = quiet_session();
    let before = state.score;
    coin_at(&mut state, lane_offset(START_LANE));
    tick(&mut state, &TickInput::default(), DT);

    assert_eq!(state.score - before, 10.0);
    assert_eq!(state.display_score(), 10);
}

#[test]
fn magnet_reaches_offset_collectible() {
    // 2.0 off-center: outside the plain reach (1.0), inside the magnet reach (3.0)
    let mut state = quiet_session();
    coin_at(&mut state, 2.0);
    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.score, 0.0);
    assert_eq!(state.spawner.collectibles.len(), 1);

    state.powerups.activate(PowerUpKind::Magnet, 10.0, None);
    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.score, 10.0);
    assert!(state.spawner.collectibles.is_empty());
}

#[test]
fn restart_after_game_over_resets_the_session() {
    let mut state = quiet_session();
    state.score = 500.0;
    state.powerups.activate(PowerUpKind::Multiplier, 15.0, Some(2.0));
    tick(&mut state, &TickInput { move_right: true, ..Default::default() }, DT);
    for _ in 0..30 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert_eq!(state.player.lane, START_LANE + 1);
    coin_at(&mut state, 0.0);
    obstacle_in_player_lane(&mut state);
    for _ in 0..5 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert!(state.is_game_over());

    tick(&mut state, &TickInput { restart: true, ..Default::default() }, DT);
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.score, 0.0);
    assert_eq!(state.speed, state.tuning.initial_speed);
    assert_eq!(state.player.lane, START_LANE);
    assert_eq!(state.player.pos.y, GROUND_Y);
    assert!(!state.player.is_dead());
    assert!(state.spawner.obstacles.is_empty());
    assert!(state.spawner.collectibles.is_empty());
    for kind in PowerUpKind::ALL {
        assert!(!state.powerups.is_active(kind));
    }
    assert_eq!(state.powerups.score_multiplier(), 1.0);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut state = GameState::new(seed);
        for i in 0..3000u32 {
            let input = TickInput {
                start: i == 0,
                move_left: i % 97 == 0,
                move_right: i % 131 == 0,
                jump: i % 53 == 0,
                ..Default::default()
            };
            tick(&mut state, &input, DT);
        }
        let ids: Vec<u32> = state.spawner.obstacles.iter().map(|o| o.id).collect();
        (state.display_score(), state.time_ticks, state.phase, ids)
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn tuning_json_feeds_the_session() {
    let tuning =
        Tuning::from_json(r#"{ "initial_speed": 20.0, "max_speed": 25.0 }"#).expect("valid tuning");
    let mut state = GameState::with_tuning(5, tuning);
    assert_eq!(state.speed, 20.0);

    tick(&mut state, &TickInput { start: true, ..Default::default() }, DT);
    state.elapsed = 3600.0;
    state.spawner.timer = f32::MAX;
    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.speed, 25.0);
}

#[derive(Default)]
struct Mirror {
    live: std::collections::BTreeSet<u32>,
}

impl WorldSink for Mirror {
    fn apply_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ObstacleSpawned { id, .. } | GameEvent::CollectibleSpawned { id, .. } => {
                self.live.insert(*id);
            }
            GameEvent::Despawned { id }
            | GameEvent::Collected { id, .. }
            | GameEvent::ObstacleSmashed { id, .. } => {
                self.live.remove(id);
            }
            GameEvent::Restarted => self.live.clear(),
            _ => {}
        }
    }
}

#[derive(Default)]
struct Hud {
    last: Option<HudSnapshot>,
    messages: Vec<String>,
    game_over: Option<u64>,
}

impl UiSink for Hud {
    fn update_hud(&mut self, hud: &HudSnapshot) {
        self.last = Some(hud.clone());
    }

    fn notify(&mut self, notification: &Notification) {
        self.messages.push(notification.message());
    }

    fn game_over(&mut self, final_score: u64) {
        self.game_over = Some(final_score);
    }
}

#[test]
fn mirrored_world_tracks_the_simulation() {
    let mut runner =
        Runner::new(GameState::new(11), FixedClock::new(DT), Mirror::default(), Hud::default());
    runner.set_idle_mode(true);

    for _ in 0..1800 {
        if runner.frame() == GamePhase::GameOver {
            break;
        }
        let state = runner.state();
        let mut expected: Vec<u32> = state.spawner.obstacles.iter().map(|o| o.id).collect();
        expected.extend(state.spawner.collectibles.iter().map(|c| c.id));
        expected.sort_unstable();
        let mirrored: Vec<u32> = runner.world().live.iter().copied().collect();
        assert_eq!(mirrored, expected);
    }

    let hud = runner.ui().last.clone().expect("hud pushed every frame");
    assert_eq!(hud.score, runner.state().display_score());
    assert!(runner.ui().messages.iter().all(|m| m.ends_with('!')));
    if let Some(final_score) = runner.ui().game_over {
        assert_eq!(final_score, hud.score);
    }
}
