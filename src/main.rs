use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vibe_journal::api::{self, middleware::SecurityConfig, AppState};
use vibe_journal::client::JournalClient;
use vibe_journal::db::Database;
use vibe_journal::identity::{self, IdentitySource, IdentityStore};
use vibe_journal::models::{CheckIn, InsightRequest, Vibe};
use vibe_journal::service::InsightService;
use vibe_journal::{render, stats};

#[derive(Parser)]
#[command(name = "vibej")]
#[command(about = "Wellness check-ins with supportive insights and mood history")]
struct Cli {
    /// User identity to use instead of the locally stored one
    #[arg(long, global = true, env = "VIBE_JOURNAL_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the journal server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "17020")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Record a check-in, show its insight and save it to history
    Checkin {
        /// How your body feels
        #[arg(long, default_value = "")]
        body: String,
        /// How you feel emotionally
        #[arg(long, default_value = "")]
        heart: String,
        /// Your surroundings
        #[arg(long, default_value = "")]
        environment: String,
        #[arg(long, default_value = "")]
        reflection: String,
        /// One of the seven vibe labels or their first word, e.g. "Calm"
        #[arg(long, value_parser = parse_vibe)]
        vibe: Option<Vibe>,
        /// Breathing exercise you chose
        #[arg(long)]
        breath: Option<String>,
        /// Response language hint (e.g. "en", "es")
        #[arg(long)]
        language: Option<String>,
    },
    /// Show vibe counts, trend, calendar and recent check-ins
    History {
        /// Month to show as YYYY-MM (default: current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,

        /// Number of recent check-ins to list
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Show one check-in in full: actions, inputs and quote
    Show {
        /// Check-in id as listed by `history` (default: most recent)
        id: Option<String>,
    },
    /// Delete all of your check-ins
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
    /// Print the identity used for history
    Whoami,
}

fn parse_vibe(s: &str) -> Result<Vibe, String> {
    Vibe::from_label(s)
        .or_else(|| {
            Vibe::ALL
                .into_iter()
                .find(|v| v.short_label().eq_ignore_ascii_case(s.trim()))
        })
        .ok_or_else(|| {
            let names: Vec<&str> = Vibe::ALL.iter().map(Vibe::short_label).collect();
            format!("unknown vibe '{}', expected one of: {}", s, names.join(", "))
        })
}

fn parse_month(s: &str) -> Result<(i32, u32), String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| format!("invalid month '{}', expected YYYY-MM", s))
}

/// Initialize tracing with output to stdout (server) or stderr (client commands)
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| {
            if use_stderr {
                "vibe_journal=warn".into()
            } else {
                "vibe_journal=debug,tower_http=debug".into()
            }
        }),
    );

    if use_stderr {
        // Client commands print results on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting journal server on port {}", port);

    let db = Database::open_default()?;
    db.migrate()?;

    let state = AppState::new(db, InsightService::from_env()?);
    let app = api::create_router_with_security(state, SecurityConfig::from_env());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Journal server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let is_server = matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(!is_server);

    let command = match cli.command {
        None => return serve("127.0.0.1", 17020).await,
        Some(Commands::Serve { port, host }) => return serve(&host, port).await,
        Some(command) => command,
    };

    let store = IdentityStore::open_default()?;
    let (user, source) = identity::resolve(cli.user, &store)?;
    let client = JournalClient::from_env()?;

    match command {
        Commands::Checkin {
            body,
            heart,
            environment,
            reflection,
            vibe,
            breath,
            language,
        } => {
            let check_in = CheckIn {
                body,
                heart,
                environment,
                reflection,
                vibe,
                breath_action: breath,
            };
            let request = InsightRequest {
                check_in,
                language,
            };

            match client.generate_insight(&request).await {
                Ok(insight) => {
                    print!("{}", render::render_insight(&insight));
                    if request.check_in.vibe.is_some() {
                        client.save_scan(&user, &request.check_in, &insight).await;
                    } else {
                        eprintln!("\nNo vibe selected, check-in not saved to history.");
                    }
                }
                Err(e) => {
                    eprintln!("Insight generation failed: {}", e);
                    eprintln!("Please try again in a moment.");
                }
            }
        }
        Commands::History { month, limit } => {
            let records = match client.list_scans(&user).await {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("History is unavailable right now: {}", e);
                    return Ok(());
                }
            };

            let today = Local::now().date_naive();
            let (year, month) = month.unwrap_or((today.year(), today.month()));

            println!("Vibe distribution");
            print!("{}", render::render_summary(&stats::vibe_counts(&records)));
            println!();
            print!(
                "{}",
                render::render_trend(&stats::trend_points(&records), stats::vibe_trend(&records))
            );
            println!();
            if let Some(calendar) = stats::calendar_month(&records, year, month, &Local) {
                print!("{}", render::render_calendar(&calendar));
            }
            println!();
            let shown = &records[..records.len().min(limit)];
            print!("{}", render::render_history(shown, &Local));
        }
        Commands::Clear { yes } => {
            if !yes {
                eprintln!("This deletes all of your check-ins. Re-run with --yes to confirm.");
                return Ok(());
            }
            let deleted = client.clear_scans(&user).await?;
            println!("Deleted {} check-in(s).", deleted);
        }
        Commands::Show { id } => {
            let records = match client.list_scans(&user).await {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("History is unavailable right now: {}", e);
                    return Ok(());
                }
            };

            let found = match &id {
                Some(id) => records.iter().find(|r| &r.id == id),
                None => records.first(),
            };
            match found {
                Some(record) => print!("{}", render::render_scan_detail(record, &Local)),
                None => match id {
                    Some(id) => eprintln!("No check-in with id {}", id),
                    None => eprintln!("No check-ins yet"),
                },
            }
        }
        Commands::Whoami => {
            println!("{}", user);
            match source {
                IdentitySource::Stored(path) => println!("(stored in {})", path.display()),
                IdentitySource::Override => println!("(from --user / VIBE_JOURNAL_USER)"),
            }
        }
        Commands::Serve { .. } => unreachable!("handled above"),
    }

    Ok(())
}
