use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use coddle_consult::chat::{ChatEvent, ChatPhase};
use coddle_consult::checkout::{CONSENT_TEXT, CheckoutOutcome, ProviderProfile};
use coddle_consult::config::ConsultConfig;
use coddle_consult::model::{Message, Sender, SupportType};
use coddle_consult::replies::ScriptedReplies;
use coddle_consult::wizard::ConsultWizard;

fn print_message(msg: &Message, provider: &ProviderProfile) {
    let who = match msg.sender {
        Sender::User => "You",
        Sender::Clinician => provider.name.as_str(),
        Sender::System => "System",
    };
    println!("{}: {}", who, msg.text);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    eprintln!("🍼 Coddle Consult v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Parenting advice from a matched expert, in one short chat.\n");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    let wizard = ConsultWizard::new(ConsultConfig::default());
    let provider = ProviderProfile::default();

    // ── Step 1: concern + support type ──────────────────────────────────
    eprintln!("STEP 1 OF 3 — What's on your mind?");
    eprintln!("Describe the issue you're facing with your child.");
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        match wizard.submit_concern(&line).await {
            Ok(()) => break,
            Err(e) => eprintln!("{e}"),
        }
    }

    eprintln!("\nI would like to:  [1] 💬 Chat with an Expert   [2] 📹 Book Video Call");
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        match line.trim() {
            "1" => {
                wizard.choose_support(SupportType::Chat).await;
                break;
            }
            "2" => {
                wizard.choose_support(SupportType::Video).await;
                break;
            }
            _ => eprintln!("Enter 1 or 2."),
        }
    }

    // ── Step 2: provider + consent + mock payment ───────────────────────
    eprintln!("\nSTEP 2 OF 3 — Your expert");
    eprintln!("{} — {}", provider.name, provider.title);
    eprintln!("{}\n", provider.bio);
    eprintln!("{CONSENT_TEXT}");

    let mut checkout = wizard.checkout().await;
    loop {
        eprint!("Acknowledge and pay? [y/n] > ");
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        checkout.set_consent(matches!(line.trim(), "y" | "Y" | "yes"));
        if checkout.consented() {
            eprintln!("Processing payment...");
        }
        match checkout.confirm().await {
            Ok(CheckoutOutcome::ChatReady) => break,
            Ok(CheckoutOutcome::VideoBooked) => {
                eprintln!("\n✅ Video consultation booked.");
                eprintln!("Thank you for using Coddle Consult. We hope the advice was helpful.");
                wizard.finish().await;
                return Ok(());
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    // ── Step 3: chat session ────────────────────────────────────────────
    eprintln!("\nSTEP 3 OF 3 — Consult Session\n");
    let driver = wizard.begin_chat(Arc::new(ScriptedReplies)).await?;
    let mut events = driver.subscribe();

    for msg in driver.messages().await {
        print_message(&msg, &provider);
    }
    eprintln!("⏳ {} is replying...", provider.name);

    loop {
        match events.recv().await {
            Ok(ChatEvent::ClinicianReplied { .. }) => {
                if let Some(last) = driver.messages().await.last() {
                    print_message(last, &provider);
                }
                if driver.phase().await == ChatPhase::Unlocked {
                    eprintln!("You have 1 follow-up message remaining.");
                    loop {
                        eprint!("> ");
                        let Some(line) = lines.next_line().await? else {
                            driver.shutdown().await;
                            return Ok(());
                        };
                        match driver.submit_followup(&line).await {
                            Ok(()) => {
                                eprintln!("Message sent. Waiting for final reply...");
                                eprintln!("⏳ {} is replying...", provider.name);
                                break;
                            }
                            Err(e) => eprintln!("{e}"),
                        }
                    }
                }
            }
            Ok(ChatEvent::Completed) => break,
            Ok(ChatEvent::FollowupSent) => {}
            Err(_) => break,
        }
    }

    // ── Completion ──────────────────────────────────────────────────────
    eprintln!("\n✅ Chat Complete");
    let history = wizard.context().history().await;
    eprintln!("Past sessions ({}):", history.len());
    for session in &history {
        eprintln!("  {} — {} messages", session.date, session.messages.len());
    }
    wizard.finish().await;
    eprintln!("\nThank you for using Coddle Consult. We hope the advice was helpful.");

    Ok(())
}
