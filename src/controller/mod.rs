//! Expense form controller
//!
//! UI events are handled by pure functions from `(state, event)` to a
//! [`Transition`]: the next state, the store commands to run, and any
//! feedback for the user. Nothing here touches the database; the commands
//! are executed afterwards by [`ActiveSession::apply`].
//!
//! # Example
//!
//! ```rust,ignore
//! let transition = dispatch(&state, &UiEvent::NextMonth);
//! let mut applied = Applied::default();
//! session.apply(&store, &transition.commands, &mut applied)?;
//! state = transition.state.with_visible_ids(session.visible_ids());
//! ```

pub mod session;

pub use session::{ActiveSession, Applied};

use std::collections::BTreeSet;

use crate::models::{ExpenseDraft, ExpenseId, FormInput, MonthKey};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Submit the form
    AddExpense(FormInput),
    /// Delete the rows at these table positions
    DeleteExpense { selected_rows: Vec<usize> },
    /// Show the previous month
    PrevMonth,
    /// Show the next month
    NextMonth,
    /// Leave the application
    Exit,
}

/// Discriminant of [`UiEvent`], the key of the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    AddExpense,
    DeleteExpense,
    PrevMonth,
    NextMonth,
    Exit,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::AddExpense(_) => EventKind::AddExpense,
            Self::DeleteExpense { .. } => EventKind::DeleteExpense,
            Self::PrevMonth => EventKind::PrevMonth,
            Self::NextMonth => EventKind::NextMonth,
            Self::Exit => EventKind::Exit,
        }
    }
}

/// A store operation requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    /// Insert a validated expense into the active partition
    Insert(ExpenseDraft),
    /// Delete these ids from the active partition
    Delete(Vec<ExpenseId>),
    /// Make another month's partition the active one
    SwitchMonth(MonthKey),
    /// Reload the rows of the active partition
    Refresh,
    /// Close the active connection
    Close,
}

/// Message for the user produced by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Blocking message that must be dismissed
    Popup(String),
    /// Informational message that goes away on its own
    Notice(String),
}

/// Controller state carried between events
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    /// Month shown in the header and targeted by store commands
    pub current_month: MonthKey,
    /// False for the single-file layout, where every month is the same file
    pub partitioned: bool,
    /// Ids of the table rows as last rendered, in display order
    pub visible_ids: Vec<ExpenseId>,
    /// Cleared once Exit has been handled
    pub running: bool,
}

impl ControllerState {
    pub fn new(current_month: MonthKey, partitioned: bool) -> Self {
        Self {
            current_month,
            partitioned,
            visible_ids: Vec::new(),
            running: true,
        }
    }

    /// Record the ids of the rows that were just rendered
    pub fn with_visible_ids(mut self, ids: Vec<ExpenseId>) -> Self {
        self.visible_ids = ids;
        self
    }
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ControllerState,
    pub commands: Vec<StoreCommand>,
    pub feedback: Option<Feedback>,
    /// Whether the form fields should be emptied
    pub clear_form: bool,
}

impl Transition {
    /// No state change, no commands
    fn idle(state: &ControllerState) -> Self {
        Self {
            state: state.clone(),
            commands: Vec::new(),
            feedback: None,
            clear_form: false,
        }
    }
}

type Handler = fn(&ControllerState, &UiEvent) -> Transition;

const DISPATCH_TABLE: [(EventKind, Handler); 5] = [
    (EventKind::AddExpense, handle_add),
    (EventKind::DeleteExpense, handle_delete),
    (EventKind::PrevMonth, handle_prev_month),
    (EventKind::NextMonth, handle_next_month),
    (EventKind::Exit, handle_exit),
];

/// Handle one event
pub fn dispatch(state: &ControllerState, event: &UiEvent) -> Transition {
    let kind = event.kind();
    match DISPATCH_TABLE.iter().find(|(k, _)| *k == kind) {
        Some((_, handler)) => handler(state, event),
        None => Transition::idle(state),
    }
}

fn handle_add(state: &ControllerState, event: &UiEvent) -> Transition {
    let UiEvent::AddExpense(form) = event else {
        return Transition::idle(state);
    };

    match form.validate() {
        Ok(draft) => Transition {
            state: state.clone(),
            commands: vec![StoreCommand::Insert(draft), StoreCommand::Refresh],
            feedback: None,
            clear_form: true,
        },
        Err(err) => Transition {
            feedback: Some(Feedback::Popup(err.to_string())),
            ..Transition::idle(state)
        },
    }
}

fn handle_delete(state: &ControllerState, event: &UiEvent) -> Transition {
    let UiEvent::DeleteExpense { selected_rows } = event else {
        return Transition::idle(state);
    };

    let ids: BTreeSet<ExpenseId> = selected_rows
        .iter()
        .filter_map(|&row| state.visible_ids.get(row).copied())
        .collect();

    if ids.is_empty() {
        return Transition::idle(state);
    }

    Transition {
        state: state.clone(),
        commands: vec![
            StoreCommand::Delete(ids.into_iter().collect()),
            StoreCommand::Refresh,
        ],
        feedback: None,
        clear_form: false,
    }
}

fn handle_prev_month(state: &ControllerState, _event: &UiEvent) -> Transition {
    switch_month(state, state.current_month.prev())
}

fn handle_next_month(state: &ControllerState, _event: &UiEvent) -> Transition {
    switch_month(state, state.current_month.next())
}

fn switch_month(state: &ControllerState, target: MonthKey) -> Transition {
    if !state.partitioned {
        return Transition {
            feedback: Some(Feedback::Notice(
                "All expenses share one file; month navigation is off".to_string(),
            )),
            ..Transition::idle(state)
        };
    }
    if target == state.current_month {
        return Transition {
            feedback: Some(Feedback::Notice(format!(
                "No month beyond {}",
                target.label()
            ))),
            ..Transition::idle(state)
        };
    }

    Transition {
        state: ControllerState {
            current_month: target,
            visible_ids: Vec::new(),
            ..state.clone()
        },
        commands: vec![StoreCommand::SwitchMonth(target), StoreCommand::Refresh],
        feedback: None,
        clear_form: true,
    }
}

fn handle_exit(state: &ControllerState, _event: &UiEvent) -> Transition {
    Transition {
        state: ControllerState {
            running: false,
            ..state.clone()
        },
        commands: vec![StoreCommand::Close],
        feedback: None,
        clear_form: false,
    }
}
