pub mod events;
pub mod state;
pub mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::CliError;
use crate::pipeline::PipelineConfig;
use events::handle_key;
use state::{App, AppEvent};
use ui::draw_ui;

pub fn run_tui(
    config: PipelineConfig,
    config_path: PathBuf,
    program: PathBuf,
) -> Result<(), CliError> {
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(config, config_path, program, tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &Receiver<AppEvent>,
) -> Result<(), CliError> {
    while !app.should_quit {
        terminal.draw(|frame| draw_ui(frame, app))?;

        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }

        if event::poll(Duration::from_millis(100))? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
    }
    Ok(())
}
