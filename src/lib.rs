pub mod bot;
pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod intent;
pub mod models;
pub mod store;
pub mod timing;

use bot::FaqBot;
use cli::Args;
use contact::ContactRequest;
use log::info;
use models::chat::Message;
use std::error::Error;
use timing::ComposePhase;
use tokio::io::{ AsyncBufReadExt, BufReader };

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Storage Type: {}", args.storage_type);
    info!("Storage Dir: {}", args.storage_dir);
    info!("Topics Path: {}", args.topics_path.as_deref().unwrap_or("built-in"));
    info!("Typing Simulation: {}", !args.no_typing);
    info!("Contact Endpoint: {}", args.email_endpoint);
    info!("-------------------------");

    let mut bot = FaqBot::new(&args).await?;

    let mut phases = bot.subscribe_phases();
    tokio::spawn(async move {
        while let Some(phase) = phases.recv().await {
            match phase {
                ComposePhase::Typing => info!("assistant is typing..."),
                ComposePhase::Thinking => info!("assistant is thinking..."),
            }
        }
    });

    for message in &bot.conversation().await.messages {
        print_message(message);
    }
    println!("(commands: /reset, /contact <reply-to> <message>, /quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "/quit" | "/exit" => {
                break;
            }
            "/reset" => {
                bot.reset().await;
                for message in &bot.conversation().await.messages {
                    print_message(message);
                }
            }
            _ if line.starts_with("/contact") => {
                handle_contact(&bot, line).await;
            }
            _ => {
                let reply = bot.send(line).await;
                print_message(&reply);
            }
        }
    }

    Ok(())
}

async fn handle_contact(bot: &FaqBot, line: &str) {
    let mut parts = line.splitn(3, ' ');
    let _command = parts.next();
    let (reply_to, message) = match (parts.next(), parts.next()) {
        (Some(reply_to), Some(message)) => (reply_to, message),
        _ => {
            println!("usage: /contact <reply-to> <message>");
            return;
        }
    };

    let request = ContactRequest {
        from_name: "Website visitor".to_string(),
        reply_to: reply_to.to_string(),
        message: message.to_string(),
    };
    match bot.contact(&request).await {
        Ok(()) => println!("Thanks! Your message is on its way to the team."),
        Err(e) => println!("Sorry, your message could not be sent: {}", e),
    }
}

fn print_message(message: &Message) {
    let speaker = if message.is_user { "you" } else { "limitless" };
    match &message.metadata {
        Some(meta) =>
            println!(
                "{}: {} [{} {:.0}%]",
                speaker,
                message.text,
                meta.topic,
                meta.confidence * 100.0
            ),
        None => println!("{}: {}", speaker, message.text),
    }
}
