use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use todo_backend::{connect_db, DbOwner, DbProfile};

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Todo API database migration tool")]
struct Args {
    /// One of: up, down, fresh, reset, refresh, status
    command: MigrationCommand,

    /// Which database profile to migrate
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();
    let profile = match args.env {
        Env::Prod => DbProfile::Prod,
        Env::Test => DbProfile::Test,
    };

    // Schema changes run as the owner role, not the application role
    let conn = match connect_db(profile, DbOwner::Owner).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
