//! AI suggestion command.

use ritualkeeper_core::HttpSuggestionProvider;

pub fn run(goal: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let service = super::open_service()?;
    let provider = HttpSuggestionProvider::from_config(&config);
    let suggestions = service.suggest_rituals(&provider, goal)?;
    for suggestion in suggestions {
        println!("[{:>6}] {}", suggestion.difficulty.label(), suggestion.title);
        println!("         {}", suggestion.description);
    }
    Ok(())
}
