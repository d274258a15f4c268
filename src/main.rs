//! DSS admin command-line client.
//!
//! Signs in, runs one workflow against the content API and prints the notices
//! it raised.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dss_admin::api::ApiClient;
use dss_admin::auth::{AuthService, LoginForm, Session};
use dss_admin::composer::{EditTarget, PostComposer};
use dss_admin::config::{Config, LogFormat};
use dss_admin::document::{EditorDocument, ImageUploader};
use dss_admin::errors::AppError;
use dss_admin::notify::{NoticeLevel, NoticeLog, Notifier};
use dss_admin::taxonomy::{TagIndex, TaxonomyResolver};

#[derive(Parser)]
#[command(name = "dss-admin", version, about = "Manage posts and tags on a DSS content API")]
struct Cli {
    /// Account email used to sign in
    #[arg(long, env = "DSS_EMAIL", global = true)]
    email: Option<String>,

    #[arg(long, env = "DSS_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tag administration
    #[command(subcommand)]
    Tags(TagCommand),
    /// Post authoring
    #[command(subcommand)]
    Posts(PostCommand),
    /// Upload an image and print the editor's image-tool response
    Upload { file: PathBuf },
}

#[derive(Subcommand)]
enum TagCommand {
    List,
    Create { name: String },
    Rename { id: String, name: String },
    Delete { id: String },
}

#[derive(Subcommand)]
enum PostCommand {
    /// Show the tags, parent candidates and related candidates available to a new post
    Candidates,
    Submit(SubmitArgs),
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    priority: String,

    /// Editor document as JSON; an empty document when omitted
    #[arg(long)]
    document: Option<PathBuf>,

    /// Existing tag id to attach (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Tag name to create and attach (repeatable)
    #[arg(long = "new-tag")]
    new_tags: Vec<String>,

    #[arg(long)]
    parent: Option<String>,

    #[arg(long = "related")]
    related: Vec<String>,

    /// Update this post instead of creating a new one
    #[arg(long)]
    update: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config);

    tracing::debug!(api = %config.api_url, "Starting dss-admin");

    let notices = Arc::new(NoticeLog::new());
    let result = run(cli, &config, notices.clone()).await;

    for notice in notices.drain() {
        match notice.level {
            NoticeLevel::Success => println!("ok: {}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }

    if let Err(err) = result {
        tracing::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .init();
}

async fn run(cli: Cli, config: &Config, notices: Arc<NoticeLog>) -> Result<(), AppError> {
    let client = ApiClient::new(config)
        .map_err(|e| AppError::Config(format!("Invalid API configuration: {}", e)))?;

    let form = LoginForm {
        email: cli.email.unwrap_or_default(),
        password: cli.password.unwrap_or_default(),
    };
    let signed_in = AuthService::new(Arc::new(client.clone()), notices.clone())
        .login(&form)
        .await?;
    let api = Arc::new(client.authenticated(&signed_in.session));

    match cli.command {
        Command::Tags(command) => run_tags(command, api, notices).await,
        Command::Posts(PostCommand::Candidates) => {
            show_candidates(api, signed_in.session, notices).await
        }
        Command::Posts(PostCommand::Submit(args)) => {
            submit_post(args, api, signed_in.session, notices).await
        }
        Command::Upload { file } => {
            let response = ImageUploader::new(api).upload_by_file(&file).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

async fn run_tags(
    command: TagCommand,
    api: Arc<ApiClient>,
    notices: Arc<NoticeLog>,
) -> Result<(), AppError> {
    let mut index = TagIndex::new(api.clone(), notices.clone());

    match command {
        TagCommand::List => {
            for tag in index.refresh().await? {
                println!("{}\t{}\t{}", tag.id, tag.name, tag.slug);
            }
        }
        TagCommand::Create { name } => {
            let reply = TaxonomyResolver::new(api)
                .create(&name)
                .await
                .inspect_err(|err| notices.error(&err.message()))?;
            if let Some(message) = &reply.message {
                notices.success(message);
            }
            println!("{}\t{}", reply.data.value, reply.data.label);
        }
        TagCommand::Rename { id, name } => {
            index.refresh().await?;
            let tag = index.rename(&id, &name).await?;
            println!("{}\t{}\t{}", tag.id, tag.name, tag.slug);
        }
        TagCommand::Delete { id } => {
            index.delete(&id).await?;
        }
    }
    Ok(())
}

async fn show_candidates(
    api: Arc<ApiClient>,
    session: Session,
    notices: Arc<NoticeLog>,
) -> Result<(), AppError> {
    let composer = PostComposer::new(api, session, EditTarget::Create, notices);
    composer.load().await?;
    let snapshot = composer.snapshot().await;
    composer.abandon().await;

    let sections = [
        ("Tags", &snapshot.reference.tags),
        ("Parent candidates", &snapshot.reference.parents),
        ("Related candidates", &snapshot.reference.related),
    ];
    for (heading, options) in sections {
        println!("{} ({})", heading, options.len());
        for option in options {
            println!("  {}\t{}", option.value, option.label);
        }
    }
    Ok(())
}

async fn submit_post(
    args: SubmitArgs,
    api: Arc<ApiClient>,
    session: Session,
    notices: Arc<NoticeLog>,
) -> Result<(), AppError> {
    let target = match args.update {
        Some(id) => EditTarget::Update(id),
        None => EditTarget::Create,
    };
    let composer = PostComposer::new(api, session, target, notices);

    let report = composer.load().await?;
    if !report.failures.is_empty() {
        tracing::warn!(
            failed = ?report.failed_targets(),
            "Continuing with partial reference data"
        );
    }

    composer.set_title(args.title).await?;
    composer.set_priority(args.priority).await?;
    for tag in &args.tags {
        composer.pick_tag(tag).await?;
    }
    for name in &args.new_tags {
        composer.create_tag(name).await?;
    }
    if let Some(parent) = &args.parent {
        composer.choose_parent(parent).await?;
    }
    for related in &args.related {
        composer.add_related(related).await?;
    }

    let document = match &args.document {
        Some(path) => EditorDocument::from_file(path).await?,
        None => EditorDocument::empty(),
    };
    composer.submit(&document).await?;

    if let Some(route) = composer.redirect().await {
        println!("next: {}", route);
    }
    Ok(())
}
