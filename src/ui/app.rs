use crate::export::{PlacementRecord, PlacementReport};
use crate::model::{ElementKind, Level};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

/// Category panel entries, in display order.
pub const CATEGORIES: [ElementKind; 2] = [ElementKind::Duct, ElementKind::Pipe];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    OpeningDetail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Levels,
    Categories,
    Openings,
}

pub struct App {
    pub report: PlacementReport,
    pub levels: Vec<Level>,
    pub view: View,
    pub focus_panel: FocusPanel,
    pub selected_level: usize, // 0 = "All", 1+ = level index
    pub selected_category: usize,
    pub selected_opening: usize,
    pub should_quit: bool,
}

impl App {
    /// Levels are shown highest first.
    #[must_use]
    pub fn new(report: PlacementReport, mut levels: Vec<Level>) -> Self {
        levels.sort_by(|a, b| b.elevation.total_cmp(&a.elevation));
        Self {
            report,
            levels,
            view: View::Dashboard,
            focus_panel: FocusPanel::Categories,
            selected_level: 0,
            selected_category: 0,
            selected_opening: 0,
            should_quit: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => super::dashboard::draw_dashboard(frame, self),
            View::OpeningDetail => super::dashboard::draw_opening_detail(frame, self),
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.view {
                View::Dashboard => self.handle_dashboard_keys(key.code),
                View::OpeningDetail => self.handle_detail_keys(key.code),
            }
        }
        Ok(())
    }

    fn handle_dashboard_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => self.navigate_down(),
            KeyCode::Left | KeyCode::Char('h') => self.navigate_left(),
            KeyCode::Right | KeyCode::Char('l') => self.navigate_right(),
            KeyCode::Enter => self.enter_opening_detail(),
            _ => {}
        }
    }

    fn handle_detail_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => self.view = View::Dashboard,
            KeyCode::Left | KeyCode::Char('h') => self.previous_opening_in_detail(),
            KeyCode::Right | KeyCode::Char('l') => self.next_opening_in_detail(),
            _ => {}
        }
    }

    fn navigate_up(&mut self) {
        match self.focus_panel {
            FocusPanel::Levels => {
                if self.selected_level > 0 {
                    self.selected_level -= 1;
                    self.selected_opening = 0;
                }
            }
            FocusPanel::Categories => {
                if self.selected_category > 0 {
                    self.selected_category -= 1;
                    self.selected_opening = 0;
                }
            }
            FocusPanel::Openings => {
                self.selected_opening = self.selected_opening.saturating_sub(1);
            }
        }
    }

    fn navigate_down(&mut self) {
        match self.focus_panel {
            FocusPanel::Levels => {
                // 0 = "All", then levels
                if self.selected_level < self.levels.len() {
                    self.selected_level += 1;
                    self.selected_opening = 0;
                }
            }
            FocusPanel::Categories => {
                if self.selected_category < CATEGORIES.len() - 1 {
                    self.selected_category += 1;
                    self.selected_opening = 0;
                }
            }
            FocusPanel::Openings => {
                let count = self.get_filtered_openings().len();
                if self.selected_opening < count.saturating_sub(1) {
                    self.selected_opening += 1;
                }
            }
        }
    }

    fn navigate_left(&mut self) {
        match self.focus_panel {
            FocusPanel::Openings => self.focus_panel = FocusPanel::Categories,
            FocusPanel::Categories => self.focus_panel = FocusPanel::Levels,
            FocusPanel::Levels => {}
        }
    }

    fn navigate_right(&mut self) {
        match self.focus_panel {
            FocusPanel::Levels => self.focus_panel = FocusPanel::Categories,
            FocusPanel::Categories => self.focus_panel = FocusPanel::Openings,
            FocusPanel::Openings => {}
        }
    }

    fn enter_opening_detail(&mut self) {
        if self.focus_panel == FocusPanel::Openings && self.get_selected_opening().is_some() {
            self.view = View::OpeningDetail;
        }
    }

    /// Wraps around to the last opening.
    fn previous_opening_in_detail(&mut self) {
        let count = self.get_filtered_openings().len();
        if count == 0 {
            return;
        }
        self.selected_opening = if self.selected_opening > 0 {
            self.selected_opening - 1
        } else {
            count - 1
        };
    }

    /// Wraps around to the first opening.
    fn next_opening_in_detail(&mut self) {
        let count = self.get_filtered_openings().len();
        if count == 0 {
            return;
        }
        self.selected_opening = (self.selected_opening + 1) % count;
    }

    #[must_use]
    pub fn selected_kind(&self) -> ElementKind {
        CATEGORIES[self.selected_category.min(CATEGORIES.len() - 1)]
    }

    /// Get selected level ID (None if "All" is selected)
    fn get_selected_level_id(&self) -> Option<u64> {
        if self.selected_level == 0 {
            None
        } else {
            self.levels.get(self.selected_level - 1).map(|l| l.id)
        }
    }

    fn matches_level(&self, record: &PlacementRecord) -> bool {
        match self.get_selected_level_id() {
            None => true,
            Some(level_id) => record.level_id == level_id,
        }
    }

    /// Openings of the selected category on the selected level.
    #[must_use]
    pub fn get_filtered_openings(&self) -> Vec<&PlacementRecord> {
        let kind = self.selected_kind();
        self.report
            .placements
            .iter()
            .filter(|r| r.kind == kind && self.matches_level(r))
            .collect()
    }

    #[must_use]
    pub fn get_selected_opening(&self) -> Option<&PlacementRecord> {
        self.get_filtered_openings()
            .get(self.selected_opening)
            .copied()
    }

    /// Opening count for a category (respects `selected_level`)
    #[must_use]
    pub fn get_filtered_category_count(&self, kind: ElementKind) -> usize {
        self.report
            .placements
            .iter()
            .filter(|r| r.kind == kind && self.matches_level(r))
            .count()
    }

    /// Opening count on a level across both categories
    #[must_use]
    pub fn get_level_count(&self, level_id: u64) -> usize {
        self.report
            .placements
            .iter()
            .filter(|r| r.level_id == level_id)
            .count()
    }

    #[must_use]
    pub fn get_selected_level_name(&self) -> String {
        if self.selected_level == 0 {
            "All".to_string()
        } else {
            self.levels
                .get(self.selected_level - 1)
                .map_or_else(|| "-".to_string(), |l| l.name.clone())
        }
    }

    /// Rows for the detail view of the selected opening.
    #[must_use]
    pub fn get_opening_properties(&self) -> Vec<(String, String)> {
        let record = match self.get_selected_opening() {
            Some(r) => r,
            None => return Vec::new(),
        };

        let link = record
            .link_id
            .map_or_else(|| "-".to_string(), |id| format!("#{id}"));

        vec![
            ("Element".to_string(), format!("{} #{}", record.kind, record.element_id)),
            ("Host wall".to_string(), format!("#{}", record.wall_id)),
            ("Link".to_string(), link),
            ("Level".to_string(), record.level_name.clone()),
            ("X".to_string(), format!("{:.3}", record.x)),
            ("Y".to_string(), format!("{:.3}", record.y)),
            ("Z".to_string(), format!("{:.3}", record.z)),
            ("Width".to_string(), format!("{:.3}", record.width)),
            ("Height".to_string(), format!("{:.3}", record.height)),
        ]
    }
}
