use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tdx_core::task::Task;

use super::state::{BoardState, ComposerField, DraftField, TaskDraft};
use crate::common::TextField;
use crate::common::text::{single_line, truncate_with_ellipsis};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn input_line(field: &TextField, placeholder: &'static str, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(if focused { "> " } else { "  " })];
    if field.is_empty() {
        spans.push(Span::styled(placeholder, dim()));
    } else {
        spans.push(Span::raw(single_line(&field.display()).into_owned()));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn task_line(task: &Task, selected: bool, width: usize) -> Line<'static> {
    let mark = if task.completed { "✅" } else { "❌" };
    let title = truncate_with_ellipsis(&single_line(&task.title), width.saturating_sub(8));
    let style = if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(if selected { "› " } else { "  " }),
        Span::styled(format!("{title} - {mark}"), style),
    ])
}

fn draft_lines(draft: &TaskDraft) -> Vec<Line<'static>> {
    let checkbox = if draft.completed { "[x]" } else { "[ ]" };
    let completed_focused = draft.focus == DraftField::Completed;
    let mut completed = Line::from(vec![
        Span::raw(if completed_focused { "  > " } else { "    " }),
        Span::raw(format!("{checkbox} Completed")),
    ]);
    if completed_focused {
        completed = completed.style(Style::default().add_modifier(Modifier::BOLD));
    }

    let mut title = input_line(&draft.title, "Enter task title", draft.focus == DraftField::Title);
    let mut description = input_line(
        &draft.description,
        "Enter task description",
        draft.focus == DraftField::Description,
    );
    title.spans.insert(0, Span::raw("  "));
    description.spans.insert(0, Span::raw("  "));

    vec![
        title,
        description,
        completed,
        Line::styled("    Enter save · Esc cancel · Tab next", dim()),
    ]
}

/// First line to show so that all of `rows` fits in `visible` lines,
/// preferring the top of `rows` when it cannot.
fn scroll_offset(rows: &Range<usize>, visible: usize) -> usize {
    rows.end.saturating_sub(visible).min(rows.start)
}

fn footer(board: &BoardState) -> Line<'static> {
    if board.confirm_delete.is_some() {
        return Line::styled(
            "Delete this task? y/n",
            Style::default().fg(Color::Yellow),
        );
    }
    let help = if board.editing.is_some() {
        "Editing task"
    } else if board.composing {
        "Tab switch field · Enter add · Esc done"
    } else {
        "a add · e edit · x toggle · d delete · r refresh · l logout · q quit"
    };
    Line::styled(help, dim())
}

/// Renders the task board.
pub fn render_board(frame: &mut Frame, board: &BoardState, area: Rect, spinner_frame: usize) {
    let [header_area, composer_area, error_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut header = vec![Span::styled(
        "To-do app",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if board.loading {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        header.push(Span::styled(format!("  {spinner} loading"), dim()));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), header_area);

    let composer = &board.composer;
    let composer_lines = vec![
        input_line(
            &composer.title,
            "Enter task title",
            board.composing && composer.focus == ComposerField::Title,
        ),
        input_line(
            &composer.description,
            "Enter task description",
            board.composing && composer.focus == ComposerField::Description,
        ),
    ];
    let composer_block = Block::default()
        .borders(Borders::ALL)
        .title(" Add Task ")
        .border_style(if board.composing {
            Style::default().fg(Color::Cyan)
        } else {
            dim()
        });
    frame.render_widget(
        Paragraph::new(composer_lines).block(composer_block),
        composer_area,
    );

    if let Some(error) = &board.error {
        frame.render_widget(
            Paragraph::new(Line::styled(error.clone(), Style::default().fg(Color::Red))),
            error_area,
        );
    }

    let width = list_area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    if board.tasks.is_empty() && !board.loading {
        lines.push(Line::styled("  No tasks yet.", dim()));
    }
    let selected_id = board.selected_task().map(|task| task.id);
    let mut selected_rows = 0..0;
    for task in &board.tasks {
        let selected = selected_id == Some(task.id);
        let start = lines.len();
        match &board.editing {
            Some(draft) if draft.id == task.id => lines.extend(draft_lines(draft)),
            _ => lines.push(task_line(task, selected, width)),
        }
        if selected {
            selected_rows = start..lines.len();
        }
    }

    // Keep the selected row on screen. An open edit row spans several lines.
    let visible = list_area.height.saturating_sub(2) as usize;
    let scroll = scroll_offset(&selected_rows, visible);
    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Tasks "))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(list, list_area);

    frame.render_widget(Paragraph::new(footer(board)), footer_area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tdx_core::task::TaskId;

    use super::*;

    fn draw(board: &BoardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render_board(frame, board, frame.area(), 0))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_scroll_offset_keeps_rows_visible() {
        assert_eq!(scroll_offset(&(0..1), 10), 0);
        assert_eq!(scroll_offset(&(9..10), 10), 0);
        assert_eq!(scroll_offset(&(10..11), 10), 1);
        // Edit row below the fold shows all four lines.
        assert_eq!(scroll_offset(&(12..16), 10), 6);
        // Taller than the viewport: start at its first line.
        assert_eq!(scroll_offset(&(3..9), 4), 3);
    }

    #[test]
    fn test_last_row_visible_below_open_edit_row() {
        let mut board = BoardState::new();
        board.tasks.replace_all(
            (1..=16)
                .map(|id| Task {
                    id: TaskId(id),
                    title: format!("Task {id:02}"),
                    description: String::new(),
                    completed: false,
                })
                .collect(),
        );
        board.start_editing(TaskId(1));
        board.selected = 15;

        let screen = draw(&board);
        assert!(screen.contains("Task 16"));
    }
}
