use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use hubscout_core::api::{GitHubClient, UserDirectory};
use hubscout_core::models::User;
use hubscout_core::profile::{ProfileLoader, ProfilePhase};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt::try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.as_slice() {
        [command, query] if command == "search" => run_search(query).await,
        [command, login] if command == "user" => run_user(login).await,
        _ => {
            eprintln!("usage: hubscout search <query> | hubscout user <login>");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run_search(query: &str) -> Result<(), String> {
    let client = GitHubClient::new().map_err(|error| error.to_string())?;
    let response = client
        .search_users(query)
        .await
        .map_err(|error| error.to_string())?;

    if response.items.is_empty() {
        println!("no users found");
        return Ok(());
    }

    println!(
        "{} of {} result(s)",
        response.items.len(),
        response.total_count
    );
    for user in &response.items {
        let url = user.html_url.as_deref().unwrap_or("-");
        println!("{:>10}  {:<24} {url}", user.id, user.login);
    }
    Ok(())
}

async fn run_user(login: &str) -> Result<(), String> {
    let client = Arc::new(GitHubClient::new().map_err(|error| error.to_string())?);
    let loader = ProfileLoader::new(client, User::new(0, login));
    loader.load().await;

    if loader.phase() == ProfilePhase::Failed {
        return Err(loader
            .error_message()
            .unwrap_or_else(|| "profile load failed".to_string()));
    }

    println!("{}  (@{})", loader.display_name(), loader.username());
    if let Some(bio) = loader.bio() {
        println!("{bio}");
    }
    println!(
        "repos: {}  followers: {}  following: {}",
        loader.repository_count(),
        loader.followers_count(),
        loader.following_count()
    );
    if let Some(location) = loader.location() {
        println!("location: {location}");
    }
    if let Some(company) = loader.company() {
        println!("company: {company}");
    }
    if let Some(url) = loader.profile_url() {
        println!("{url}");
    }
    Ok(())
}
