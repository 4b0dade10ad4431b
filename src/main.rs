mod app;
mod event;
mod ui;

use typo::{config, session, text};

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use session::SessionSource;
use ui::components::stat_box::StatBox;
use ui::components::summary::Summary;
use ui::components::typing_area::TypingArea;
use ui::layout::SessionLayout;
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "typo", version, about = "Terminal typing trainer for session files")]
struct Cli {
    #[arg(help = "Session file to start right away")]
    session: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short = 'w', long, help = "Maximum width of the text area in columns")]
    max_width: Option<u16>,

    #[arg(short, long, help = "Directory searched for session files")]
    sessions_dir: Option<PathBuf>,

    #[arg(long, help = "Write the effective config file and exit")]
    init_config: bool,

    #[arg(long, help = "List available themes and exit")]
    list_themes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!("Could not read config, using defaults: {err:#}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(max_width) = cli.max_width {
        config.max_width = max_width;
    }
    if let Some(dir) = cli.sessions_dir {
        config.sessions_dir = dir.to_string_lossy().to_string();
    }

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }
    if cli.init_config {
        config.save().context("could not write config file")?;
        println!("{}", Config::config_path().display());
        return Ok(());
    }

    let _log_guard = init_logging();
    install_panic_hook();

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    let mut app = App::with_config(config, theme).context("invalid replacement symbols in config")?;
    if let Some(path) = cli.session {
        app.start_session(SessionSource::File(path));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);
    tracing::info!("started");

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Log to `typo.log` in the data directory; `RUST_LOG` picks the level.
fn init_logging() -> Option<WorkerGuard> {
    let log_dir = Config::log_dir();
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "typo.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

/// Leave raw mode before the default hook prints the panic.
fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        tracing::error!(?info, "panic");
        default_panic(info);
    }));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            // Redraw only; WPM moves with the clock.
            AppEvent::Tick => {}
            AppEvent::Resize(w, h) => tracing::debug!(width = w, height = h, "resize"),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Session => handle_session_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.start_selected(),
        _ => {}
    }
}

fn handle_session_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.type_char('\n'),
        KeyCode::Tab => app.type_char('\t'),
        KeyCode::Char(ch) => app.type_char(ch),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            tracing::debug!(code = ?key.code, "arrow keys do not move the cursor");
        }
        _ => tracing::debug!(code = ?key.code, "unhandled key during session"),
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.retry(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Session => render_session(frame, app),
        AppScreen::Summary => render_summary(frame, app),
    }
}

fn header_line<'a>(app: &App, info: String) -> Paragraph<'a> {
    let colors = &app.theme.colors;
    Paragraph::new(Line::from(vec![
        Span::styled(
            " typo ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let info = format!(" {} sessions | {}", app.menu.items.len(), app.config.sessions_dir);
    frame.render_widget(header_line(app, info), layout[0]);

    let menu_area = ui::layout::centered_rect(60, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let footer = match &app.message {
        Some(message) => Span::styled(format!(" {message}"), Style::default().fg(colors.error())),
        None => Span::styled(
            " [Enter] Start  [j/k] Move  [q] Quit ",
            Style::default().fg(colors.text_pending()),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), layout[2]);
}

fn render_session(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Some(text) = session.text() else {
        return;
    };

    let layout = SessionLayout::new(
        area,
        app.config.border_margin,
        app.config.border_padding,
        app.config.max_width,
    );

    let info = format!(
        " {} | section {}/{} | {:.0}%",
        session.title(),
        session.section_index() + 1,
        session.section_count(),
        text.progress() * 100.0,
    );
    frame.render_widget(header_line(app, info), layout.header);

    let typing = TypingArea::new(text, app.theme, app.config.border_padding)
        .markers(&app.config.more_above, &app.config.more_below);
    frame.render_widget(typing, layout.typing);

    if app.config.show_wpm {
        frame.render_widget(StatBox::new("wpm", session.wpm(), app.theme), layout.wpm);
    }
    if app.config.show_accuracy {
        frame.render_widget(StatBox::new("acc", session.accuracy(), app.theme), layout.accuracy);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Esc] Menu  [Ctrl-C] Quit ",
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    if let Some(ref summary) = app.summary {
        let centered = ui::layout::centered_rect(60, 70, area);
        frame.render_widget(Summary::new(summary, app.theme), centered);
    }
}
