use clap::{Parser, Subcommand};
use libbackup::{BackupManager, DockerEngine};
use rkv::logging::{self, LogFormat};
use rkv::{BackupArgs, backup, version};

#[derive(Parser)]
#[command(name = "rkv")]
#[command(about = "Simple CLI to back up container volumes", long_about = None)]
#[command(version)]
struct Cli {
    /// Container engine socket, as unix:///path/to/docker.sock
    #[arg(long, global = true, env = "DOCKER_HOST")]
    docker_host: Option<String>,

    #[arg(long, global = true, env = "RKV_LOG_FORMAT", value_enum, default_value_t)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a backup tar file of a container volume")]
    Backup(BackupArgs),

    #[command(about = "Print the version number of rkv")]
    Version,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.log_format);

    match cli.command {
        Commands::Backup(args) => {
            let engine = DockerEngine::from_host(cli.docker_host.as_deref())?;
            let manager = BackupManager::new(engine);
            match backup(&manager, &args).await {
                Ok(dispatched) => {
                    println!(
                        "Started {} ({}), writing {}",
                        dispatched.helper_name, dispatched.helper_id, dispatched.archive_file
                    );
                    Ok(())
                }
                Err(err) => {
                    eprintln!("Backup failed: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Version => {
            println!("{}", version());
            Ok(())
        }
    }
}
