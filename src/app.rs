use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger;
use crate::relay::Relay;
use crate::state::State;
use crate::ui::Theme;
use crate::validation::Schema;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::{mpsc, Arc};
use tokio::sync::Mutex;

pub type NetworkEventSender = mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = mpsc::Receiver<NetworkEvent>;
type LogReceiver = mpsc::Receiver<String>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let (log_tx, log_rx) = mpsc::channel::<String>();
        let log_tx = std::sync::Mutex::new(log_tx);
        logger::init(
            Box::new(move |line: String| {
                if let Ok(tx) = log_tx.lock() {
                    let _ = tx.send(line);
                }
            }),
            LevelFilter::Info,
        )?;

        info!("Starting application...");
        if let Some(path) = config.file_path() {
            info!("Using configuration file {}.", path.display());
        }
        let relay = Relay::new(config.destination()?)?;
        let schema = Schema::new(config.phone_rule()?);
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!(
                "Unknown theme '{}', using default. Available: {}",
                config.theme_name,
                Theme::available_themes().join(", ")
            );
            Theme::default()
        });

        let (tx, rx) = mpsc::channel::<NetworkEvent>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(Some(tx), schema, theme))),
        };
        app.start_network(rx, relay)?;
        app.start_ui(log_rx).await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for relaying submissions.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver, relay: Relay) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        std::thread::spawn(move || {
            runtime.block_on(async {
                let mut network_event_handler = NetworkEventHandler::new(&cloned_state, &relay);
                while let Ok(network_event) = net_receiver.recv() {
                    match network_event_handler.handle(network_event).await {
                        Ok(_) => (),
                        Err(e) => error!("Failed to handle network event: {}", e),
                    }
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self, log_receiver: LogReceiver) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run_loop(&mut terminal, &log_receiver).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        log_receiver: &LogReceiver,
    ) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            for line in log_receiver.try_iter() {
                state.add_log_entry(line);
            }
            terminal
                .draw(|frame| crate::ui::render(frame, &mut state))
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
