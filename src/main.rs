use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use beingtv_lib::api::SupabaseClient;
use beingtv_lib::app::{App, AsyncAction};
use beingtv_lib::config::{self, AppConfig};
use beingtv_lib::handlers::async_actions::handle_async_action;
use beingtv_lib::handlers::input::{handle_key_event, InputContext, InputResult};
use beingtv_lib::handlers::mouse::handle_mouse_event;
use beingtv_lib::player::Player;
use beingtv_lib::realtime::Subscription;
use beingtv_lib::sync::{spawn_coordinator, RefreshTrigger};
use beingtv_lib::{catalog, setup, ui};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Optional Direct Play URL (if provided, plays and exits)
    #[arg(short, long)]
    play: Option<String>,

    /// Load the catalog once and print what was found
    #[arg(long)]
    check: bool,

    /// Backend project URL (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Backend anon key (overrides config)
    #[arg(long)]
    key: Option<String>,

    /// Skip the network and use the bundled catalog
    #[arg(long)]
    offline: bool,
}

/// TUI owns the terminal, so logs go to a file there; CLI modes use stderr
fn init_logging(config: &AppConfig, to_file: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("beingtv={}", config.log_level)));

    let log_dir = if to_file { config::data_dir() } else { None };
    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "beingtv.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_env_filter(filter)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None if to_file => {
            // No data dir: stay silent rather than draw over the TUI
            tracing_subscriber::fmt()
                .with_writer(io::sink)
                .with_env_filter(filter)
                .init();
            None
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_env_filter(filter)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {}", e);
        AppConfig::default()
    });
    config.apply_overrides(args.url.clone(), args.key.clone(), args.offline);

    let tui_mode = !args.check && args.play.is_none();
    let _log_guard = init_logging(&config, tui_mode);
    info!("beingtv v{} starting", env!("CARGO_PKG_VERSION"));

    let client = SupabaseClient::new(config.supabase_url.clone(), config.supabase_anon_key.clone());

    // -- CLI MODE --
    if args.check {
        println!("Checking catalog...");
        if !client.is_configured() {
            println!("No backend configured; using the bundled catalog.");
        }
        let snapshot = catalog::fetch_all(&client).await;
        println!("Categories: {}", snapshot.categories.len());
        println!("Channels:   {}", snapshot.channels.len());
        println!("Matches:    {}", snapshot.matches.len());
        match setup::mpv_version() {
            Some(v) => println!("Player:     {}", v),
            None => println!("Player:     mpv not found ({})", setup::install_hint()),
        }
        return Ok(());
    }

    if let Some(url) = args.play {
        setup::check_dependencies();
        let player = Player::new();
        println!("Playing: {}", url);
        player.play(&url, &url)?;
        while player.is_running() {
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        return Ok(());
    }

    // -- TUI MODE (Default) --
    setup::check_dependencies();

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App State
    let mut app = App::new();
    let player = Player::new();

    // Async Channels
    let (tx, mut rx) = mpsc::channel::<AsyncAction>(64);
    let refresh = spawn_coordinator(client, tx.clone());
    let _ = refresh.send(RefreshTrigger::Startup).await;

    // Realtime connects in the background so a slow socket never delays the first paint
    let (sub_tx, mut sub_rx) = oneshot::channel::<Subscription>();
    let connect_task = if config.realtime && config.is_backend_configured() {
        let url = config.supabase_url.clone();
        let key = config.supabase_anon_key.clone();
        let triggers = refresh.clone();
        let status_tx = tx.clone();
        Some(tokio::spawn(async move {
            match Subscription::connect(&url, &key, triggers, status_tx).await {
                Ok(sub) => {
                    let _ = sub_tx.send(sub);
                }
                Err(e) => warn!("Realtime unavailable ({}): {}", e.stage(), e),
            }
        }))
    } else {
        info!("Realtime disabled");
        None
    };

    let res = run_app(&mut terminal, &mut app, &player, &tx, &refresh, &mut rx).await;

    // Release resources
    player.stop();
    if let Ok(sub) = sub_rx.try_recv() {
        sub.release().await;
    } else if let Some(task) = connect_task {
        task.abort();
    }

    // Restore Terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    player: &Player,
    tx: &mpsc::Sender<AsyncAction>,
    refresh: &mpsc::Sender<RefreshTrigger>,
    rx: &mut mpsc::Receiver<AsyncAction>,
) -> io::Result<()> {
    let ctx = InputContext { tx, refresh, player };

    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // 1. Check for Async Actions (Non-blocking)
        while let Ok(action) = rx.try_recv() {
            handle_async_action(app, action);
        }

        app.loading_tick = app.loading_tick.wrapping_add(1);

        // 2. Poll inputs
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(app, key, &ctx).await? == InputResult::Quit {
                        app.should_quit = true;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
