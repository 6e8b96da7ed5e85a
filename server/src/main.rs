use clap::Parser;
use log::{error, info};
use server::network::{Server, ServerConfig};
use shared::config::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// WebSocket port for remote controllers
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Tick rate (updates per second)
    #[arg(short, long, default_value = "60")]
    tick_rate: u32,

    /// Maximum number of simultaneous controllers
    #[arg(short, long, default_value = "8")]
    max_clients: usize,

    /// Court width
    #[arg(long, default_value_t = WORLD_WIDTH)]
    width: f32,

    /// Court height
    #[arg(long, default_value_t = WORLD_HEIGHT)]
    height: f32,

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

    /// Speed added per level
    #[arg(long, default_value_t = SPEED_INCREMENT)]
    speed_increment: f32,

    #[arg(long, default_value_t = PADDLE_WIDTH)]
    paddle_width: f32,

    #[arg(long, default_value_t = PADDLE_HEIGHT)]
    paddle_height: f32,

    /// Gap between a paddle and its wall
    #[arg(long, default_value_t = PADDLE_SHIFT)]
    paddle_shift: f32,

    #[arg(long, default_value_t = BALL_RADIUS)]
    ball_radius: f32,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            max_score: self.max_score,
            ball_speed: self.ball_speed,
            paddle_speed: self.paddle_speed,
            rally_per_level: self.rally_per_level,
            speed_increment: self.speed_increment,
            paddle_width: self.paddle_width,
            paddle_height: self.paddle_height,
            paddle_shift: self.paddle_shift,
            ball_radius: self.ball_radius,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let config = ServerConfig {
        game: args.game_config(),
        tick_rate: args.tick_rate,
        max_clients: args.max_clients,
    };

    let address = format!("{}:{}", args.host, args.port);
    info!("Starting Pong host on {}", address);
    info!("Tick rate: {}Hz", config.tick_rate);
    info!("Max controllers: {}", config.max_clients);

    let server = Server::bind(&address, config).await?;

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                error!("Server stopped: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
