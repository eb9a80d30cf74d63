use std::collections::HashMap;

use ratatui::widgets::TableState;
use sofcalc_core::{
    compose_stamp, expand_key, parse_args, report_for, FileSessionRepository, LaytimeReport,
    SessionService, SofEvent,
};

pub enum InputMode {
    Normal,
    Adding,
    Editing,
}

const EVENT_KEYS: [&str; 5] = ["date", "start", "end", "day", "remarks"];

pub struct App {
    pub service: SessionService<FileSessionRepository>,
    pub report: LaytimeReport,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl App {
    pub fn new() -> App {
        let repo = FileSessionRepository::new(None).expect("Failed to initialize repository");
        let service = SessionService::new(repo);

        let session = service.session().unwrap_or_default();
        let report = report_for(&session);
        let mut state = TableState::default();
        if !report.rows.is_empty() {
            state.select(Some(0));
        }
        App {
            service,
            report,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        }
    }

    pub fn next(&mut self) {
        if self.report.rows.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.report.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.report.rows.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.report.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn recompute(&mut self) {
        if let Ok(session) = self.service.session() {
            self.report = report_for(&session);
        }
    }

    pub fn delete_event(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(metric) = self.report.metrics.get(i) {
                let _ = self.service.delete_event(&metric.event.id);
            }
            self.recompute();

            // Adjust selection after reload
            if self.report.rows.is_empty() {
                self.state.select(None);
            } else if i >= self.report.rows.len() {
                self.state.select(Some(self.report.rows.len() - 1));
            } else {
                self.state.select(Some(i));
            }
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_edit_mode(&mut self) {
        if self.state.selected().is_some() {
            self.input_mode = InputMode::Editing;
            self.input.clear();
            self.cursor_position = 0;
        }
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        match self.input_mode {
            InputMode::Adding => self.submit_add(),
            InputMode::Editing => self.submit_edit(),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_add(&mut self) {
        let args: Vec<String> = self
            .input
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();
        let parsed = parse_args(&args);

        if parsed.text.is_empty() {
            return;
        }

        let metadata = normalize_keys(parsed.metadata);
        let date = metadata.get("date").map(String::as_str);
        let start = compose_stamp(date, metadata.get("start").map(String::as_str));
        let end = compose_stamp(date, metadata.get("end").map(String::as_str));

        let mut event = SofEvent::new(parsed.text, start, end);
        event.day = metadata.get("day").cloned();
        event.remarks = metadata.get("remarks").cloned();

        if self.service.add_event(event).is_ok() {
            self.recompute();
            if !self.report.rows.is_empty() {
                self.state.select(Some(self.report.rows.len() - 1));
            }
        }
    }

    fn submit_edit(&mut self) {
        if let Some(i) = self.state.selected() {
            let mut event = match self.report.metrics.get(i) {
                Some(metric) => metric.event.clone(),
                None => return,
            };

            let args: Vec<String> = self
                .input
                .split_whitespace()
                .map(|s| s.to_string())
                .collect();
            let parsed = parse_args(&args);

            if !parsed.text.is_empty() {
                event.description = parsed.text;
            }

            let metadata = normalize_keys(parsed.metadata);
            let date = metadata.get("date").map(String::as_str);
            if let Some(start) = metadata.get("start") {
                event.start = compose_stamp(date, Some(start));
            }
            if let Some(end) = metadata.get("end") {
                event.end = compose_stamp(date, Some(end));
            }
            if let Some(day) = metadata.get("day") {
                event.day = Some(day.clone());
            }
            if let Some(remarks) = metadata.get("remarks") {
                event.remarks = Some(remarks.clone());
            }

            let _ = self.service.update_event(&event);
            self.recompute();
        }
    }
}

fn normalize_keys(metadata: HashMap<String, String>) -> HashMap<String, String> {
    let mut normalized = HashMap::new();
    for (key, value) in metadata {
        if let Ok(full_key) = expand_key(&key, &EVENT_KEYS) {
            normalized.insert(full_key, value);
        }
    }
    normalized
}
