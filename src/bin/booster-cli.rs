use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "booster-cli")]
#[command(about = "Management CLI for the booster service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key, if the service requires one.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service state and loaded configuration keys
    Status,
    /// Fetch a greeting
    Greet {
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Query the liveness and readiness probes
    Probes,
    /// Take the service offline
    Kill,
    /// Show or set the name service state
    State {
        #[arg(value_parser = ["ok", "fail"])]
        set: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key))?,
        );
    }

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/api/status", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Greet { name } => {
            let mut req = client.get(format!("{}/api/greeting", cli.url));
            if let Some(name) = name {
                req = req.query(&[("name", name)]);
            }
            print_response(req.send().await?).await?;
        }
        Commands::Probes => {
            for probe in ["readiness", "liveness"] {
                let res = client.get(format!("{}/api/health/{}", cli.url, probe))
                    .send()
                    .await?;
                println!("{:<10} {}", probe, res.status());
            }
        }
        Commands::Kill => {
            let res = client.get(format!("{}/api/killme", cli.url))
                .headers(headers)
                .send()
                .await?;
            let status = res.status();
            println!("{} {}", status, res.text().await?);
        }
        Commands::State { set } => {
            let url = format!("{}/api/state", cli.url);
            let res = match set {
                Some(state) => {
                    client.put(url)
                        .json(&serde_json::json!({ "state": state }))
                        .send()
                        .await?
                }
                None => client.get(url).send().await?,
            };
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
