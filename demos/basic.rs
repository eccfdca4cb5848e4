use std::time::Instant;

use d1_http::{D1Client, D1QueryResponse, Value};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db = D1Client::from_env()?;

    let started = Instant::now();
    let result: D1QueryResponse = db.query("SELECT * FROM users;", ()).await?;
    println!("Query result: {}", serde_json::to_string_pretty(&result)?);
    println!(
        "Time taken for non-params query: {:.3} ms",
        started.elapsed().as_secs_f64() * 1000.0
    );

    let email = std::env::var("CLOUDFLARE_EMAIL").ok();
    let started = Instant::now();
    let result: D1QueryResponse = db
        .query("SELECT * FROM users WHERE email = ?;", [Value::from(email)])
        .await?;
    println!(
        "Query result with params: {}",
        serde_json::to_string_pretty(&result)?
    );
    println!(
        "Time taken for params query: {:.3} ms",
        started.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
