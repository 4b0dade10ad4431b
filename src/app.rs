use std::path::Path;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::session::file::discover;
use crate::session::{Session, SessionFile, SessionSource, SessionSummary};
use crate::text::ReplacementRules;
use crate::ui::components::menu::{Menu, MenuItem};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Session,
    Summary,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub rules: ReplacementRules,
    pub menu: Menu<'static>,
    pub session: Option<Session>,
    pub source: Option<SessionSource>,
    pub summary: Option<SessionSummary>,
    /// Last load failure, shown in the menu footer.
    pub message: Option<String>,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn with_config(config: Config, theme: &'static Theme) -> anyhow::Result<Self> {
        let rules = config.replacement_rules()?;
        let items = menu_items(Path::new(&config.sessions_dir));
        tracing::debug!(count = items.len(), "session files found");

        Ok(Self {
            screen: AppScreen::Menu,
            config,
            theme,
            rules,
            menu: Menu::new(items, theme),
            session: None,
            source: None,
            summary: None,
            message: None,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        })
    }

    pub fn start_selected(&mut self) {
        if let Some(source) = self.menu.selected_source().cloned() {
            self.start_session(source);
        }
    }

    pub fn start_session(&mut self, source: SessionSource) {
        let started = source.load().and_then(|mut file| {
            file.shuffle_sections(&mut self.rng);
            Session::new(file, self.rules.clone())
        });

        match started {
            Ok(session) => {
                tracing::info!(
                    source = %source.label(),
                    title = session.title(),
                    sections = session.section_count(),
                    "session started"
                );
                self.session = Some(session);
                self.source = Some(source);
                self.summary = None;
                self.message = None;
                self.screen = AppScreen::Session;
            }
            Err(err) => {
                tracing::warn!(source = %source.label(), error = %err, "could not start session");
                self.message = Some(format!("{}: {err}", source.label()));
                self.screen = AppScreen::Menu;
            }
        }
    }

    pub fn type_char(&mut self, ch: char) {
        if !self.config.accepts(ch) {
            tracing::debug!(?ch, "ignoring key outside valid inputs");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.type_char(ch);

        if session.is_complete() {
            match session.next_section() {
                Some(index) => tracing::debug!(section = index, "next section"),
                None => self.finish_session(),
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.type_backspace();
        }
    }

    fn finish_session(&mut self) {
        if let Some(session) = self.session.take() {
            let summary = session.summary();
            tracing::info!(
                title = %summary.title,
                wpm = summary.wpm,
                accuracy = summary.accuracy,
                corrected = summary.corrected_errors,
                "session finished"
            );
            self.summary = Some(summary);
            self.screen = AppScreen::Summary;
        }
    }

    pub fn retry(&mut self) {
        if let Some(source) = self.source.clone() {
            self.start_session(source);
        }
    }

    pub fn go_to_menu(&mut self) {
        self.session = None;
        self.screen = AppScreen::Menu;
    }
}

fn menu_items(sessions_dir: &Path) -> Vec<MenuItem> {
    let bundled = SessionFile::bundled()
        .into_iter()
        .map(SessionSource::Bundled);
    let on_disk = discover(sessions_dir).into_iter().map(SessionSource::File);

    bundled
        .chain(on_disk)
        .map(|source| {
            let description = match source.load() {
                Ok(file) => format!("{} ({} sections)", file.title, file.sections.len()),
                Err(err) => err.to_string(),
            };
            MenuItem {
                label: display_name(&source),
                description,
                source,
            }
        })
        .collect()
}

fn display_name(source: &SessionSource) -> String {
    match source {
        SessionSource::Bundled(name) => name.trim_end_matches(".yaml").trim_end_matches(".yml").to_string(),
        SessionSource::File(path) => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string()),
    }
}
