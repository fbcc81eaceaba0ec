use game_core::*;
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn send_ball_out_right(game: &mut LocalGame) {
    let config = game.config.clone();
    for (_e, (body, kind)) in game.world.query_mut::<(&mut Body, &Kind)>() {
        if matches!(kind, Kind::Ball { .. }) {
            body.pos = Vec2::new(config.screen_width - 1.0, 200.0);
            body.vel = Vec2::new(300.0, 0.0);
        }
    }
}

#[test]
fn test_three_player_goals_win_the_match() {
    let mut game = LocalGame::new(Config::new(), 7);
    game.handle_intent(Intent::Start(3)).unwrap();

    for goal in 1..=3 {
        assert_eq!(game.state(), GameState::InGame);
        send_ball_out_right(&mut game);
        game.tick(DT);
        assert_eq!(game.score.player, goal);
        if goal < 3 {
            assert_eq!(game.state(), GameState::PlayerScored);
            game.handle_intent(Intent::Continue).unwrap();
        }
    }

    assert_eq!(game.state(), GameState::GameOver);
    let frame = game.frame();
    let result = frame.result.expect("result recorded on game over");
    assert_eq!(result.score, Score { player: 3, cpu: 0 });
    assert_eq!(result.winner, Winner::Player);
}

#[test]
fn test_play_again_starts_fresh_match() {
    let mut game = LocalGame::new(Config::new(), 7);
    game.handle_intent(Intent::Start(1)).unwrap();
    send_ball_out_right(&mut game);
    game.tick(DT);
    assert_eq!(game.state(), GameState::GameOver);

    game.handle_intent(Intent::PlayAgain).unwrap();

    assert_eq!(game.state(), GameState::InGame);
    assert_eq!(game.score, Score::new());
    assert_eq!(game.fsm.win_points(), 1, "Threshold kept for a rematch");
    let ball = game.ball().unwrap();
    assert_eq!(ball.pos, game.config.ball_spawn());
    assert_eq!(ball.vel, Vec2::new(-game.config.ball_speed_initial, 0.0));
}

#[test]
fn test_return_to_menu_from_every_screen() {
    let mut game = LocalGame::new(Config::new(), 7);
    game.handle_intent(Intent::Start(10)).unwrap();
    game.handle_intent(Intent::ReturnToMenu).unwrap();
    assert_eq!(game.state(), GameState::Menu);

    game.handle_intent(Intent::Start(10)).unwrap();
    game.handle_intent(Intent::Pause).unwrap();
    game.handle_intent(Intent::ReturnToMenu).unwrap();
    assert_eq!(game.state(), GameState::Menu);

    game.handle_intent(Intent::OpenSettings).unwrap();
    game.handle_intent(Intent::ReturnToMenu).unwrap();
    assert_eq!(game.state(), GameState::Menu);
}

#[test]
fn test_rally_runs_until_someone_scores() {
    let mut game = LocalGame::new(Config::new(), 99);
    game.handle_intent(Intent::Start(50)).unwrap();

    // Player never moves; the ball starts heading for the player's side
    let mut ticks = 0;
    while game.score == Score::new() && ticks < 60 * 120 {
        game.tick(DT);
        ticks += 1;
    }

    assert_ne!(game.score, Score::new(), "A two-minute rally should end in a goal");
    assert_eq!(game.score.player + game.score.cpu, 1, "Exactly one point per goal");
}

#[test]
fn test_ball_speeds_up_on_player_return() {
    let mut game = LocalGame::new(Config::new(), 3);
    game.handle_intent(Intent::Start(10)).unwrap();

    // Ball starts at centre heading left at y=360; the centred player paddle covers it
    let mut hit = false;
    for _ in 0..600 {
        game.tick(DT);
        if game.frame().events.ball_hit_paddle {
            hit = true;
            break;
        }
    }

    assert!(hit, "Centred paddle should return the opening serve");
    let ball = game.ball().unwrap();
    let expected = game.config.ball_speed_initial * game.config.ball_speed_increase;
    assert!((ball.vel.x - expected).abs() < 1e-2);
}

#[test]
fn test_step_order_collision_before_scoring() {
    // Direct use of `step` with a hand-built world
    let config = Config::new();
    let mut world = hecs::World::new();
    create_paddle(&mut world, Side::Left, &config);
    create_paddle(&mut world, Side::Right, &config);
    let ball = create_ball(&mut world, &config);
    world.get::<&mut Body>(ball).unwrap().pos.x = -1.0;

    let time = Time::new(0.0);
    let mut ai = AiController::default();
    let mut score = Score::new();
    let mut events = Events::new();
    let mut queue = CommandQueue::new();
    let mut rng = GameRng::new(1);

    let goal = step(
        &mut world,
        &time,
        &config,
        &mut ai,
        &mut score,
        &mut events,
        &mut queue,
        &mut rng,
    );

    assert!(goal);
    assert_eq!(score, Score { player: 0, cpu: 1 }, "Ball at x=-1 is a CPU point");
    assert!(events.cpu_scored);
    assert_eq!(world.get::<&Body>(ball).unwrap().pos, config.ball_spawn());
}

#[test]
fn test_step_clamps_stalled_frame() {
    let config = Config::new();
    let mut world = hecs::World::new();
    let ball = create_ball(&mut world, &config);

    let time = Time::new(5.0);
    let mut ai = AiController::default();
    let mut score = Score::new();
    let mut events = Events::new();
    let mut queue = CommandQueue::new();
    let mut rng = GameRng::new(1);

    let goal = step(
        &mut world,
        &time,
        &config,
        &mut ai,
        &mut score,
        &mut events,
        &mut queue,
        &mut rng,
    );

    assert!(!goal, "A five second stall must not carry the ball out");
    let moved = config.ball_spawn().x - world.get::<&Body>(ball).unwrap().pos.x;
    let expected = config.ball_speed_initial * Params::MAX_DT;
    assert!((moved - expected).abs() < 1e-3, "Moved {moved}, expected {expected}");
}
