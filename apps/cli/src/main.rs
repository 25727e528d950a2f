use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{offline, SessionController, TutorClient};
use shared::{
    domain::{Speaker, Tier},
    error::SubmitRejection,
};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the tutor backend.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat session against the tutor backend (default).
    Chat,
    /// Print a canned tiered answer without contacting the backend.
    Offline {
        /// Tier label: foundational, competent, or anything else for advanced.
        #[arg(long, default_value = "foundational")]
        tier: String,
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    match args.command.unwrap_or(Command::Chat) {
        Command::Offline { tier, question } => {
            println!("{}", offline::canned_reply(Tier::from_label(&tier), &question));
            Ok(())
        }
        Command::Chat => run_chat(&args.server_url).await,
    }
}

async fn run_chat(server_url: &str) -> Result<()> {
    tracing::info!(server_url, "starting chat session");
    let backend = Arc::new(TutorClient::new(server_url));
    let mut controller = SessionController::new(backend);
    let mut rendered = 0usize;

    println!("Adaptive ML Tutor  (/reset restarts the session, /quit exits)");
    controller.start_session().await;
    rendered = render_new_turns(&controller, rendered);
    render_sidebar(&controller);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "/quit" => break,
            "/reset" => {
                controller.reset_session().await;
                rendered = 0;
                println!("(session reset)");
                controller.start_session().await;
                rendered = render_new_turns(&controller, rendered);
                render_sidebar(&controller);
            }
            text => match controller.submit_user_input(text).await {
                Ok(()) => {
                    rendered = render_new_turns(&controller, rendered);
                    render_sidebar(&controller);
                }
                // Empty submissions are a silent no-op, matching the form
                // behavior of the web UI.
                Err(SubmitRejection::EmptyInput) => {}
                Err(err) => println!("({err})"),
            },
        }
    }

    Ok(())
}

fn render_new_turns(controller: &SessionController, rendered: usize) -> usize {
    for turn in &controller.transcript()[rendered..] {
        match turn.speaker {
            Speaker::User => println!("me: {}", turn.text),
            Speaker::Assistant => println!("tutor: {}\n", turn.text),
        }
    }
    controller.transcript().len()
}

fn render_sidebar(controller: &SessionController) {
    let state = controller.state();
    if let Some(tier) = state.tier {
        println!("[tier: {}]", tier.display_name());
    }
    if let Some(intent) = &state.intent {
        println!("[intent: {intent}]");
    }
}
