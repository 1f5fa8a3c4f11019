use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use log::{error, info};
use tokio::sync::watch;
use weatherboard::cli::Cli;
use weatherboard::errors::UnrecoverableError;
use weatherboard::handlers::{configure, AppState};
use weatherboard::icons::write_icon_links;
use weatherboard::initialization::config;
use weatherboard::manager_output::AutoUpdateStatus;
use weatherboard::pipeline::Pipeline;

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let cli = Cli::parse();
    let config = config(&cli.config)?;

    if cli.icon_links {
        write_icon_links(&config.output.output_dir)?;
        info!("icon links written to {}", config.output.output_dir.display());
        return Ok(());
    }

    let pipeline = Arc::new(Pipeline::new(&config)?);

    if cli.once {
        let report = pipeline.run_cycle().await;
        info!("single update done: {:?}", report);
        return Ok(());
    }

    std::fs::create_dir_all(&config.output.output_dir)?;
    let status = AutoUpdateStatus::new(config.status_file());
    if config.schedule.enable_on_startup {
        status.write(true)?;
    }
    let enabled = match status.read() {
        Ok(enabled) => enabled,
        Err(e) => {
            error!("failed to read auto update status: {}", e);
            false
        }
    };

    let (control, _) = watch::channel(enabled);
    let state = web::Data::new(AppState {
        pipeline,
        status,
        interval: config.interval(),
        control,
        scheduler_running: Arc::new(AtomicBool::new(false)),
    });
    if enabled {
        state.ensure_scheduler();
    }

    info!("starting control api on {}:{}", config.web_server.bind_address, config.web_server.bind_port);
    HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .app_data(state.clone())
                .configure(configure)
        }
    })
        .bind((config.web_server.bind_address.as_str(), config.web_server.bind_port))?
        .run()
        .await?;

    state.control.send_replace(false);
    Ok(())
}
