mod commands;
mod password;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cjk_auth::{AuthClient, FileTokenStore, ReqwestTransport, SessionController, SessionState};
use cjk_content::presentation::{card_excerpt, format_date, sort_by_date_desc};
use cjk_content::{ActivityFilter, BlogFilter, ContentApi, NewsFilter};
use cjk_core::config::PortalConfig;
use cjk_core::errors::PortalResult;
use cjk_core::models::NewMember;

use commands::Commands;

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - CJK portal client");

type Client = AuthClient<ReqwestTransport, FileTokenStore>;

#[derive(Debug, Parser)]
#[command(version = env!("CARGO_PKG_VERSION"), about = PKG_DESCRIPTION)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// API base URL, overriding the configuration
    #[arg(long = "base-url", global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match PortalConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    cjk_observability::init_from_config(&config.observability);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_unauthorized() => {
            eprintln!("{e}\nsign in again with `cjk login`");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(config: &PortalConfig) -> PortalResult<Client> {
    let transport = ReqwestTransport::new(&config.api)?;
    let store = FileTokenStore::new(&config.auth.store_dir, config.auth.storage_key.clone());
    Ok(AuthClient::new(transport, store, config))
}

async fn run(command: Commands, config: &PortalConfig) -> PortalResult<()> {
    let client = build_client(config)?;
    tracing::debug!(base_url = %client.base_url(), ?command, "running command");

    match command {
        Commands::Login { username } => {
            let password = password::read()?;
            let session = SessionController::new(client);
            let snapshot = session.login_and_load(&username, &password).await?;
            match snapshot.member {
                Some(member) => println!("signed in as {}", member.display_name()),
                None => println!("signed in, but the profile could not be loaded"),
            }
        }
        Commands::Logout => {
            SessionController::new(client).logout();
            println!("signed out");
        }
        Commands::Whoami => {
            let session = SessionController::new(client);
            session.mount().await;
            match session.state() {
                SessionState::Authenticated(member) => {
                    let role = if member.is_official() { " (staff)" } else { "" };
                    println!("{} <{}>{role}", member.display_name(), member.email);
                }
                _ => println!("not signed in"),
            }
        }
        Commands::Register(args) => {
            let member = NewMember {
                username: args.username,
                email: args.email,
                password: password::read()?,
                first_name: args.first_name,
                last_name: args.last_name,
                phone: args.phone,
                quartier: args.quartier,
                date_naissance: args.date_naissance,
            };
            client.register(&member).await?;
            println!("account created, sign in with `cjk login`");
        }
        Commands::Blog {
            category,
            published,
        } => {
            let filter = BlogFilter {
                category,
                is_published: published,
            };
            let posts = ContentApi::new(&client).blog_posts(&filter).await?;
            for post in sort_by_date_desc(posts) {
                print_entry(post.id, &post.title, post.created_at.as_deref(), &post.content);
            }
        }
        Commands::News { published } => {
            let filter = NewsFilter {
                is_published: published,
            };
            let news = ContentApi::new(&client).news(&filter).await?;
            for item in sort_by_date_desc(news) {
                print_entry(item.id, &item.title, item.created_at.as_deref(), &item.content);
            }
        }
        Commands::Activities {
            activity_type,
            published,
        } => {
            let filter = ActivityFilter {
                activity_type,
                is_published: published,
            };
            let activities = ContentApi::new(&client).activities(&filter).await?;
            for activity in sort_by_date_desc(activities) {
                print_entry(
                    activity.id,
                    &activity.title,
                    activity.date_activite.as_deref(),
                    &activity.description,
                );
            }
        }
        Commands::Gallery => {
            for item in ContentApi::new(&client).gallery().await? {
                println!("{:>3}  {}  {}  {}", item.order, item.key(), item.title, item.url);
            }
        }
        Commands::Like(target) => {
            let answer = ContentApi::new(&client).toggle_like(&target.target()).await?;
            let state = if answer.liked.unwrap_or(false) { "liked" } else { "unliked" };
            match answer.total() {
                Some(total) => println!("{state} ({total} likes)"),
                None => println!("{state}"),
            }
        }
        Commands::Comments(target) => {
            for comment in ContentApi::new(&client).comments(&target.target()).await? {
                let author = comment.author_name.as_deref().unwrap_or("anonyme");
                println!("#{} {author}: {}", comment.id, comment.text);
            }
        }
        Commands::Comment { target, text } => {
            let comment = ContentApi::new(&client)
                .create_comment(&target.target(), &text, None)
                .await?;
            println!("comment #{} posted", comment.id);
        }
        Commands::Publish { kind, id, hide } => {
            ContentApi::new(&client)
                .set_published(kind.into(), id, !hide)
                .await?;
            println!("{} {id} {}", kind_label(kind), if hide { "hidden" } else { "published" });
        }
    }
    Ok(())
}

fn kind_label(kind: commands::KindArg) -> &'static str {
    match kind {
        commands::KindArg::Blog => "post",
        commands::KindArg::News => "news item",
        commands::KindArg::Activity => "activity",
    }
}

fn print_entry(id: i64, title: &str, date: Option<&str>, text: &str) {
    println!("#{id}  {title}  ({})", format_date(date));
    let excerpt = card_excerpt(text);
    if !excerpt.is_empty() {
        println!("      {excerpt}");
    }
}
