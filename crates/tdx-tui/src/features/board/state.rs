use tdx_core::task::{Task, TaskId, TaskList};

use crate::common::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerField {
    #[default]
    Title,
    Description,
}

/// The "add task" form shown above the list.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub title: TextField,
    pub description: TextField,
    pub focus: ComposerField,
}

impl Composer {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            ComposerField::Title => &mut self.title,
            ComposerField::Description => &mut self.description,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ComposerField::Title => ComposerField::Description,
            ComposerField::Description => ComposerField::Title,
        };
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.focus = ComposerField::Title;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Completed,
}

/// Local copy of the task being edited.
///
/// Changes stay here until the server accepts them; the list keeps showing
/// the stored values.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub id: TaskId,
    pub title: TextField,
    pub description: TextField,
    pub completed: bool,
    pub focus: DraftField,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: TextField::with_value(task.title.clone()),
            description: TextField::with_value(task.description.clone()),
            completed: task.completed,
            focus: DraftField::Title,
        }
    }

    /// Full object sent as the update body.
    pub fn to_task(&self) -> Task {
        Task {
            id: self.id,
            title: self.title.value().to_string(),
            description: self.description.value().to_string(),
            completed: self.completed,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            DraftField::Title => DraftField::Description,
            DraftField::Description => DraftField::Completed,
            DraftField::Completed => DraftField::Title,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            DraftField::Title => DraftField::Completed,
            DraftField::Description => DraftField::Title,
            DraftField::Completed => DraftField::Description,
        };
    }
}

/// State of the signed-in screen.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    /// Sign-in this board belongs to; stamped on every request it sends.
    pub epoch: u64,
    pub tasks: TaskList,
    /// Index of the highlighted row.
    pub selected: usize,
    pub composer: Composer,
    /// Whether keystrokes go to the composer.
    pub composing: bool,
    /// At most one task is edited at a time.
    pub editing: Option<TaskDraft>,
    /// Task awaiting a delete confirmation.
    pub confirm_delete: Option<TaskId>,
    pub error: Option<String>,
    /// A fetch is in flight.
    pub loading: bool,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epoch(epoch: u64) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get_index(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing.as_ref().is_some_and(|draft| draft.id == id)
    }

    pub fn start_editing(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.get(id) {
            self.editing = Some(TaskDraft::from_task(task));
            self.composing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, title: &str) -> Task {
        Task {
            id: TaskId(id),
            title: title.to_string(),
            description: String::new(),
            completed: false,
        }
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut board = BoardState::new();
        board.tasks.replace_all(vec![task(1, "a"), task(2, "b")]);
        board.select_next();
        board.select_next();
        assert_eq!(board.selected, 1);

        board.tasks.remove(TaskId(2));
        board.clamp_selection();
        assert_eq!(board.selected, 0);
        board.select_prev();
        assert_eq!(board.selected, 0);
    }

    #[test]
    fn test_draft_round_trips_to_task() {
        let original = Task {
            id: TaskId(3),
            title: "Task 3".to_string(),
            description: "Desc 3".to_string(),
            completed: true,
        };
        let mut draft = TaskDraft::from_task(&original);
        assert_eq!(draft.to_task(), original);

        draft.title.set("Updated Task");
        assert_eq!(draft.to_task().title, "Updated Task");
        assert_eq!(draft.to_task().id, TaskId(3));
    }

    #[test]
    fn test_start_editing_unknown_task_is_noop() {
        let mut board = BoardState::new();
        board.start_editing(TaskId(9));
        assert!(board.editing.is_none());
    }
}
