//! Command-line symptom checker.
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run --example symptom_checker -- --list
//! GEMINI_API_KEY=... cargo run --example symptom_checker -- \
//!     "persistent cough, fatigue" Asthma Anemia
//! ```
//!
//! Condition names are sent exactly as given, in order; repeating a name
//! sends it twice.

use medisage::form::submit_request;
use medisage::{
    CauseExplainer, CauseRequest, ConditionCatalog, GeminiClient, StaticCatalog,
    logging::{LogLevel, init_logging},
};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Warn);

    let catalog = StaticCatalog::new();
    let conditions = catalog.list_conditions().await?;

    let mut args = std::env::args().skip(1);
    let Some(symptoms) = args.next() else {
        eprintln!("usage: symptom_checker <symptoms> [condition ...] | --list");
        eprintln!("conditions are sent as given, duplicates included");
        std::process::exit(2);
    };

    if symptoms == "--list" {
        for condition in &conditions {
            println!("{:<24} {}", condition.name, condition.description);
        }
        return Ok(());
    }

    let request = CauseRequest::new(symptoms, args);
    for name in &request.selected_conditions {
        if !conditions.iter().any(|c| &c.name == name) {
            tracing::warn!(condition = %name, "Not in the catalog, sending it anyway");
        }
    }

    let client = GeminiClient::from_env()?
        .timeout(Duration::from_secs(60))
        .build();
    let explainer = CauseExplainer::new(client);

    println!("MediSage");
    println!("This is NOT a diagnosis. Discuss the results with a healthcare professional.\n");

    let submission = submit_request(&request, &explainer).await;
    let notice = submission.notice();
    println!("[{}] {}\n", notice.title, notice.description);
    println!("{}", submission.display_text());

    if !submission.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
