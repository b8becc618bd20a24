use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target URL (e.g., http://localhost:8000)
    #[arg(long, default_value = "http://localhost:8000")]
    url: String,

    /// Number of voters to simulate
    #[arg(short, long, default_value_t = 100)]
    voters: usize,

    /// Number of concurrent requests
    #[arg(short, long, default_value_t = 10)]
    concurrency: usize,

    /// Shared secret for the ingest endpoint
    #[arg(short, long, default_value = "change-me")]
    secret: String,
}

const CANDIES: &[&str] = &[
    "Snickers",
    "snickers",
    "Twix",
    "Kit Kat",
    "KitKat",
    "M&M's",
    "M&Ms",
    "Skittles",
    "Sour Patch Kids",
    "Reese's",
    "Reeses",
    "Candy Corn",
    "Almond Joy",
    "Twizzlers",
    "Jolly Ranchers",
];

#[derive(Serialize)]
struct IngestRequest {
    name: String,
    brought_candy: String,
    hate_vote: String,
    love_vote: String,
}

#[derive(Deserialize, Debug)]
struct CandySummary {
    candy: String,
    likes: i64,
    hates: i64,
    net: i64,
}

#[derive(Deserialize, Debug)]
struct StatsSummary {
    #[serde(rename = "perCandy")]
    per_candy: Vec<CandySummary>,
}

#[derive(Deserialize, Debug)]
struct VoteRow {
    id: i32,
    // voter_name: String,
}

async fn run_voter_simulation(
    client: &Client,
    base_url: &str,
    secret: &str,
    voter_id: usize,
) -> Result<()> {
    // Pick candies before the first await so the rng stays scoped
    let (brought, hate, love) = {
        let mut rng = rand::thread_rng();
        let brought = *CANDIES.choose(&mut rng).context("Candy list is empty")?;
        // The server rejects hating your own candy, so pick from the rest
        let hateable: Vec<&str> = CANDIES
            .iter()
            .copied()
            .filter(|c| !c.eq_ignore_ascii_case(brought))
            .collect();
        let hate = *hateable.choose(&mut rng).context("No candy left to hate")?;
        let love = *CANDIES.choose(&mut rng).context("Candy list is empty")?;
        (brought, hate, love)
    };

    let ingest_url = format!("{}/ingest", base_url);
    client
        .post(&ingest_url)
        .header("x-ingest-secret", secret)
        .json(&IngestRequest {
            name: format!("LoadTestVoter_{}", voter_id),
            brought_candy: brought.to_string(),
            hate_vote: hate.to_string(),
            love_vote: love.to_string(),
        })
        .send()
        .await
        .context("Failed to send ingest request")?
        .error_for_status()
        .context("Vote ingest failed")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("🚀 Starting load test against {}", args.url);
    println!("👥 Voters: {}", args.voters);
    println!("⚡ Concurrency: {}", args.concurrency);

    let client = Client::new();
    let base_url = Arc::new(args.url.clone());
    let secret = Arc::new(args.secret.clone());

    let success_count = Arc::new(AtomicUsize::new(0));
    let failure_count = Arc::new(AtomicUsize::new(0));

    let pb = ProgressBar::new(args.voters as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let start_time = Instant::now();

    // Create a stream of futures
    let results = stream::iter(0..args.voters)
        .map(|i| {
            let client = client.clone();
            let base_url = base_url.clone();
            let secret = secret.clone();
            let success_count = success_count.clone();
            let failure_count = failure_count.clone();
            let pb = pb.clone();

            async move {
                match run_voter_simulation(&client, &base_url, &secret, i).await {
                    Ok(_) => {
                        success_count.fetch_add(1, Ordering::Relaxed);
                        pb.set_message(format!(
                            "Success: {}",
                            success_count.load(Ordering::Relaxed)
                        ));
                    }
                    Err(_e) => {
                        failure_count.fetch_add(1, Ordering::Relaxed);
                        pb.set_message(format!(
                            "Errors: {}",
                            failure_count.load(Ordering::Relaxed)
                        ));
                    }
                }
                pb.inc(1);
            }
        })
        .buffer_unordered(args.concurrency)
        .collect::<Vec<()>>();

    results.await;

    pb.finish_with_message("Done");

    let duration = start_time.elapsed();
    let successes = success_count.load(Ordering::Relaxed);
    let failures = failure_count.load(Ordering::Relaxed);
    let rps = successes as f64 / duration.as_secs_f64();

    println!("\n📊 Results:");
    println!("   Time taken: {:?}", duration);
    println!("   Total requests: {}", args.voters);
    println!("   Successful votes: {}", successes);
    println!("   Failed votes: {}", failures);
    println!("   Throughput: {:.2} votes/sec", rps);

    // Pull the aggregate back down to sanity-check the run
    let stats_url = format!("{}/stats", args.url);
    let stats: StatsSummary = client
        .get(&stats_url)
        .send()
        .await
        .context("Failed to fetch stats")?
        .json()
        .await
        .context("Failed to parse stats")?;

    let votes_url = format!("{}/admin/votes", args.url);
    let votes: Vec<VoteRow> = client
        .get(&votes_url)
        .send()
        .await
        .context("Failed to fetch votes")?
        .json()
        .await
        .context("Failed to parse votes")?;

    println!("\n🍬 Leaderboard after the run ({} rows stored):", votes.len());
    for candy in stats.per_candy.iter().take(5) {
        println!(
            "   {:<20} likes {:>4}  hates {:>4}  net {:>5}",
            candy.candy, candy.likes, candy.hates, candy.net
        );
    }
    if let Some(newest) = votes.first() {
        println!("   Newest row id: {}", newest.id);
    }

    Ok(())
}
