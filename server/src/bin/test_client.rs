use clap::Parser;
use futures::{Sink, SinkExt, Stream, StreamExt};
use shared::{Actor, GameState, RemoteInput, Snapshot, Target};
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tokio_tungstenite::tungstenite::Message;

/// Scripted remote controller: starts a match and wiggles one paddle
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebSocket URL of the host
    #[arg(short, long, default_value = "ws://127.0.0.1:8080")]
    url: String,

    /// Paddle to drive (p1 or p2)
    #[arg(short, long, default_value = "p2")]
    actor: String,

    /// How long to drive the paddle, in seconds
    #[arg(short, long, default_value = "5")]
    seconds: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let actor = match args.actor.as_str() {
        "p1" => Actor::P1,
        "p2" => Actor::P2,
        other => return Err(format!("unknown actor {:?}, expected p1 or p2", other).into()),
    };

    println!("Connecting to {}", args.url);
    let (ws, _) = tokio_tungstenite::connect_async(args.url.as_str()).await?;
    let (mut sink, mut stream) = ws.split();

    // The host sends the current snapshot right after the handshake
    if let Some(snapshot) = next_snapshot(&mut stream).await? {
        println!(
            "Initial snapshot: status {:?}, score {}",
            snapshot.status,
            snapshot.score_text()
        );
        if snapshot.status != GameState::Playing {
            send(&mut sink, &RemoteInput::Start).await?;
            println!("Sent start");
        }
    }

    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    let mut target = Target::Up;
    let mut received = 0u64;

    while Instant::now() < deadline {
        send(&mut sink, &RemoteInput::Keydown { actor, target }).await?;
        sleep(Duration::from_millis(250)).await;
        send(&mut sink, &RemoteInput::Keyup { actor, target }).await?;

        // Drain whatever arrived while the key was held
        while let Ok(Some(message)) = timeout(Duration::from_millis(5), stream.next()).await {
            if let Message::Text(text) = message? {
                let snapshot = Snapshot::from_json(&text)?;
                received += 1;
                if received % 30 == 0 {
                    let paddle = snapshot.paddle(actor.side());
                    println!(
                        "{:?} paddle y={:.1}, ball ({:.1}, {:.1}), score {}, status {:?}",
                        actor,
                        paddle.position.y,
                        snapshot.ball.position.x,
                        snapshot.ball.position.y,
                        snapshot.score_text(),
                        snapshot.status
                    );
                }
            }
        }

        target = match target {
            Target::Up => Target::Down,
            Target::Down => Target::Up,
        };
    }

    println!("Received {} snapshots, disconnecting", received);
    sink.send(Message::Close(None)).await?;

    Ok(())
}

async fn send<S>(sink: &mut S, input: &RemoteInput) -> Result<(), Box<dyn std::error::Error>>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + 'static,
{
    sink.send(Message::Text(input.to_json()?.into())).await?;
    Ok(())
}

async fn next_snapshot<S>(stream: &mut S) -> Result<Option<Snapshot>, Box<dyn std::error::Error>>
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(message) = timeout(Duration::from_secs(5), stream.next()).await? {
        if let Message::Text(text) = message? {
            return Ok(Some(Snapshot::from_json(&text)?));
        }
    }
    Ok(None)
}
