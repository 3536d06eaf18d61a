// File: ./src/model/display.rs
// Plain-text dumps of grid and header models for terminals and logs.
use crate::model::grid::{GridCell, GridModel};
use crate::model::header::HeaderModel;

const CELL_WIDTH: usize = 10;

pub trait TextDisplay {
    fn to_text(&self) -> String;
}

fn cell_text(cell: &GridCell) -> String {
    let mut label = cell.label.clone();
    if cell.is_nav_control && !cell.is_enabled {
        label = format!("({})", label);
    }
    let marker = if cell.is_selected {
        "*"
    } else if cell.is_in_range {
        "~"
    } else if cell.is_today {
        "!"
    } else {
        ""
    };
    // Month names are long; keep columns aligned.
    let mut text: String = format!("{}{}", label, marker)
        .chars()
        .take(CELL_WIDTH - 1)
        .collect();
    while text.chars().count() < CELL_WIDTH {
        text.push(' ');
    }
    text
}

impl TextDisplay for GridModel {
    fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: String = row.iter().map(cell_text).collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl TextDisplay for HeaderModel {
    fn to_text(&self) -> String {
        let prev = if self.can_go_previous_month { "<" } else { " " };
        let next = if self.can_go_next_month { ">" } else { " " };
        match &self.combined_label {
            Some(label) => format!("{} {} {}", prev, label, next),
            None => {
                let prev_year = if self.can_go_previous_year { "<<" } else { "  " };
                let next_year = if self.can_go_next_year { ">>" } else { "  " };
                format!(
                    "{} [{}] {}   {} [{}] {}",
                    prev, self.month_label, next, prev_year, self.year_label, next_year
                )
            }
        }
    }
}
