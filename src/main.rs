use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::Terminal;
use tokio::sync::mpsc;

use projterm::adapters::{HttpCommandBackend, SseLogSource, SseLogSourceConfig, SystemClipboard};
use projterm::app::App;
use projterm::cli::{handle_version_command, parse_args, CliCommand, USAGE};
use projterm::config::TerminalConfig;
use projterm::logging;
use projterm::session::{Session, SessionMessage};
use projterm::terminal::{setup_panic_hook, TerminalManager};
use projterm::ui;

/// Loop tick. Drives the fit debouncer, status expiry and the spinner.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let run_args = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => handle_version_command(),
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Run(args)) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;

    let config = run_args.apply(TerminalConfig::from_env());
    let Some(session_id) = config.session_id.clone() else {
        eprintln!("Error: no session given. Pass --session <ID> or set PROJTERM_SESSION.");
        std::process::exit(2);
    };

    if let Some(path) = logging::default_log_path() {
        logging::init_global(&path);
    }
    tracing::info!("projterm starting for session {} against {}", session_id, config.api_url);

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, session_id))
}

async fn run(config: TerminalConfig, session_id: String) -> Result<()> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| eyre!("failed to build HTTP client: {}", e))?;

    let mut backend = HttpCommandBackend::with_client(client.clone(), &config.api_url);
    let mut log_source = SseLogSource::with_client(client, &config.api_url).with_config(
        SseLogSourceConfig {
            max_backoff: config.max_backoff,
            ..SseLogSourceConfig::default()
        },
    );
    if let Some(token) = &config.auth_token {
        backend = backend.with_auth_token(token.clone());
        log_source = log_source.with_auth_token(token.clone());
    }

    let mut session = Session::new(
        session_id,
        Arc::new(backend),
        Arc::new(log_source),
        Arc::new(SystemClipboard::new()),
        config.session_options(),
    );
    let message_rx = session.take_message_rx();
    let mut app = App::new(session).with_export_dir(config.export_dir.clone());

    let mut manager = TerminalManager::new()?;
    let size = manager.terminal().size()?;
    app.session.start();
    app.session.fit(size.width, size.height);

    let result = run_app(manager.terminal(), &mut app, message_rx).await;

    app.session.unmount();
    manager.restore()?;
    if let Err(e) = &result {
        tracing::error!("Terminal loop failed: {}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut message_rx: Option<mpsc::UnboundedReceiver<SessionMessage>>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    loop {
        // Draw only when something changed
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event = event_stream.next() => {
                match event {
                    Some(Ok(event)) => app.handle_event(event),
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
