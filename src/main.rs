use anyhow::Context;
use dotenv::dotenv;
use std::env;
use taskboard_client::client::TaskboardClient;
use taskboard_client::config::ClientConfig;
use taskboard_client::gateway::ApiConnectivity;
use taskboard_client::logging;
use taskboard_client::state::draft::FileDraftStore;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    let config = ClientConfig::from_env().context("loading configuration")?;

    let otel_exporters = config
        .otel
        .as_ref()
        .map(logging::init_exporters)
        .transpose()?;
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);

    let ext_cxn = ApiConnectivity::new(&config)?;
    let drafts = FileDraftStore::in_dir(&config.draft_dir);
    let mut client = TaskboardClient::new(ext_cxn, drafts);

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    info!(api_url = %config.api_url, "loading task tracker data");
    if !client.load_all(&cancel).await {
        info!("interrupted before data finished loading");
        return Ok(());
    }

    println!("Boards:");
    for board in client.boards_list() {
        println!("  [{}] {} ({} tasks)", board.id, board.title, board.task_count);
        if let Some(description) = board.description {
            println!("      {description}");
        }
    }

    if let Some(board_id) = env::args().nth(1) {
        if !client.load_board(&board_id, &cancel).await {
            return Ok(());
        }

        let view = client.board_view(&board_id);
        println!();
        println!("{}", view.title);
        for column in view.columns {
            println!("  {} ({})", column.status, column.tasks.len());
            for task in column.tasks {
                println!("    #{} {} [{}]", task.id, task.title, task.priority);
            }
        }
    }

    Ok(())
}
