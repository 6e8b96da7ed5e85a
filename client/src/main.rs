use clap::Parser;
use client::input::KeyboardInput;
use client::network::RemoteControl;
use client::rendering::{Renderer, TpsMeter};
use log::{debug, error, info, warn};
use macroquad::prelude::*;
use macroquad::window::Conf;
use server::network::COMMAND_QUEUE_SIZE;
use server::sync;
use shared::config::*;
use shared::{Game, GameState};
use std::time::Duration;

// Longest frame the simulation will catch up on
const MAX_FRAME_TIME: f32 = 0.25;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address for the remote-control WebSocket listener
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Remote-control port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Simulation ticks per second
    #[arg(short, long, default_value = "60")]
    tick_rate: u32,

    /// Maximum number of simultaneous controllers
    #[arg(short, long, default_value = "8")]
    max_clients: usize,

    /// Run without the remote-control listener
    #[arg(long)]
    no_remote: bool,

    /// Points needed to win the match
    #[arg(long, default_value_t = MAX_SCORE)]
    max_score: u32,

    /// Initial ball speed per axis
    #[arg(long, default_value_t = INIT_BALL_VELOCITY)]
    ball_speed: f32,

    /// Initial paddle speed
    #[arg(long, default_value_t = INIT_PADDLE_SPEED)]
    paddle_speed: f32,

    /// Left-paddle saves per speed level
    #[arg(long, default_value_t = SPEED_UPDATE_COUNT)]
    rally_per_level: u32,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            max_score: self.max_score,
            ball_speed: self.ball_speed,
            paddle_speed: self.paddle_speed,
            rally_per_level: self.rally_per_level,
            ..GameConfig::default()
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Pong".to_owned(),
        window_width: WORLD_WIDTH as i32,
        window_height: WORLD_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let config = args.game_config();
    if let Err(e) = config.validate() {
        error!("Invalid game configuration: {}", e);
        return;
    }
    if !(1..=1000).contains(&args.tick_rate) {
        error!("Tick rate must be between 1 and 1000 Hz, got {}", args.tick_rate);
        return;
    }

    let mut game = Game::new(config);
    let (mut synchronizer, handle) = sync::channel(game.snapshot(), COMMAND_QUEUE_SIZE);

    let remote = if args.no_remote {
        None
    } else {
        let address = format!("{}:{}", args.host, args.port);
        match RemoteControl::start(&address, handle, args.max_clients) {
            Ok(remote) => Some(remote),
            Err(e) => {
                warn!("Remote control disabled: {}", e);
                None
            }
        }
    };

    info!("Controls: Up/Down for player one, W/S for player two, Space to start");

    let renderer = Renderer::new(config.width, config.height);
    let mut keyboard = KeyboardInput::new();
    let mut tps = TpsMeter::default();
    let tick = 1.0 / args.tick_rate as f32;
    let mut accumulator = 0.0;

    loop {
        keyboard.poll();

        let frame_time = get_frame_time().min(MAX_FRAME_TIME);
        accumulator += frame_time;

        let mut ticks = 0;
        while accumulator >= tick {
            let input = keyboard.take();
            let outcome = synchronizer.step(&mut game, &input);
            accumulator -= tick;
            ticks += 1;

            if outcome.previous != outcome.state {
                info!("{:?} -> {:?}", outcome.previous, outcome.state);
                if outcome.state == GameState::Finished {
                    let (left, right) = game.scores();
                    info!("Match over: {} - {}", left, right);
                    if let Some(remote) = &remote {
                        debug!("{} controllers connected", remote.controller_count());
                    }
                }
            }
        }
        tps.record(ticks, Duration::from_secs_f32(frame_time));

        renderer.render(&game.snapshot(), tps.tps());

        next_frame().await;
    }
}
