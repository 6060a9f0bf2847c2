use std::io::{self, BufRead, Write};

use rawg_rs::players::PlayerCountService;
use rawg_rs::{ChatMessage, Settings, SteamPlayerCounts};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rawg_rs::init_tracing();

    // GROQ_API_KEY enables the assistant; without it every reply is the "unavailable" notice.
    let settings = Settings::from_env()?;
    let assistant = settings.assistant();

    // Player counts are best-effort: unknown values print as "n/a".
    let steam = SteamPlayerCounts::new()?;
    let stats = steam.player_stats(730).await;
    println!(
        "Counter-Strike 2 right now: {} players (peak today: {})",
        stats.current.map_or_else(|| "n/a".to_string(), |n| n.to_string()),
        stats.peak.map_or_else(|| "n/a".to_string(), |n| n.to_string()),
    );
    println!("Ask the gaming assistant anything (empty line to quit).");

    let mut history: Vec<ChatMessage> = Vec::new();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        history.push(ChatMessage::user(line.trim()));
        let reply = assistant.respond(&history).await;
        println!("{reply}\n");
        history.push(ChatMessage::assistant(reply));
    }
    Ok(())
}
