mod format;

use std::path::PathBuf;
use std::sync::Arc;

use format::Format;
use turns::{LabelMatcher, StreamEvent, StreamingTurnParser, panel_registry, session_turns};

#[derive(clap::Parser)]
#[command(name = "replay", about = "Replay a stored episode through the turn parser")]
struct Args {
    /// Raw model output, or a session log with `--session`.
    file: PathBuf,

    /// Treat the file as an agent session log (JSON Lines).
    #[arg(long)]
    session: bool,

    /// Characters per fed chunk.
    #[arg(short, long, default_value_t = 8)]
    chunk_size: usize,

    #[arg(short, long, default_value_t = Format::Text)]
    format: Format,
}

fn main() {
    use clap::Parser;
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&args.file)?;
    let matcher = Arc::new(LabelMatcher::new(&panel_registry()?)?);

    let mut events: Vec<StreamEvent> = Vec::new();
    if args.session {
        events.extend(session_turns(&matcher, &content).into_iter().map(StreamEvent::from));
    } else {
        let chars: Vec<char> = content.chars().collect();
        let mut parser = StreamingTurnParser::new(Arc::clone(&matcher));

        for (n, chunk) in chars.chunks(args.chunk_size.max(1)).enumerate() {
            let chunk: String = chunk.iter().collect();
            let turns = parser.feed(&chunk);
            tracing::debug!(chunk = n, emitted = turns.len(), held = parser.buffered().len(), "chunk_fed");
            events.extend(turns.into_iter().map(StreamEvent::from));
        }
        events.extend(parser.flush().into_iter().map(StreamEvent::from));
    }
    events.push(StreamEvent::Done);

    for event in &events {
        println!("{}", args.format.render(event)?);
    }

    tracing::info!(
        file = %args.file.display(),
        format = %args.format,
        turns = events.len() - 1,
        "replay_finished"
    );
    Ok(())
}
