//! Marker state container.
//!
//! All widget state lives in [`MarkerStore`] and changes only through
//! [`MarkerStore::apply`]. A rejected action leaves the store untouched.
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::datefmt;
use crate::models::{Coordinate, Point, PointId};

/// Title of the confirmation dialog.
pub const CONFIRM_TITLE: &str = "Atenção";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDelete {
    Single(PointId),
    All,
}

impl PendingDelete {
    pub fn message(&self) -> String {
        match self {
            PendingDelete::Single(id) => {
                format!("Tem certeza que deseja remover o Ponto nº {}?", id)
            }
            PendingDelete::All => "Tem certeza que deseja remover todos os pontos?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Idle,
    Pending(PendingDelete),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleAddMode,
    AddPoint {
        coordinate: Coordinate,
        created_at: NaiveDateTime,
    },
    SelectPoint(PointId),
    ClearSelection,
    RequestDeleteSelected,
    RequestDeleteAll,
    Confirm,
    Decline,
    /// Drag end of a selected marker.
    MovePoint { id: PointId, coordinate: Coordinate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("add mode is not active")]
    AddModeInactive,
    #[error("no point is selected")]
    NoSelection,
    #[error("there are no points")]
    NoPoints,
    #[error("unknown point [{0}]")]
    UnknownPoint(PointId),
    #[error("point [{0}] is not selected and cannot be moved")]
    NotDraggable(PointId),
    #[error("a confirmation is pending")]
    ConfirmationPending,
    #[error("no confirmation is pending")]
    NothingPending,
}

type Result<T> = std::result::Result<T, Rejected>;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStore {
    points: Vec<Point>,
    selection: Option<PointId>,
    add_mode: bool,
    dialog: Dialog,
    next_id: u32,
}

impl Default for MarkerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerStore {
    pub fn new() -> Self {
        MarkerStore {
            points: Vec::new(),
            selection: None,
            add_mode: false,
            dialog: Dialog::Idle,
            next_id: 1,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn selection(&self) -> Option<PointId> {
        self.selection
    }

    pub fn selected_point(&self) -> Option<&Point> {
        self.selection.and_then(|id| self.find(id))
    }

    pub fn find(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn is_add_mode(&self) -> bool {
        self.add_mode
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn is_dialog_open(&self) -> bool {
        matches!(self.dialog, Dialog::Pending(_))
    }

    pub fn confirmation_message(&self) -> Option<String> {
        match self.dialog {
            Dialog::Pending(pending) => Some(pending.message()),
            Dialog::Idle => None,
        }
    }

    /// Whether the "delete selected" trigger should be offered.
    pub fn can_delete_selected(&self) -> bool {
        self.selection.is_some() && !self.points.is_empty()
    }

    /// Whether the "delete all" trigger should be offered.
    pub fn can_delete_all(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::ToggleAddMode => self.toggle_add_mode(),
            Action::AddPoint {
                coordinate,
                created_at,
            } => self.add_point(coordinate, created_at).map(|_| ()),
            Action::SelectPoint(id) => self.select(id),
            Action::ClearSelection => self.clear_selection(),
            Action::RequestDeleteSelected => self.request_delete_selected(),
            Action::RequestDeleteAll => self.request_delete_all(),
            Action::Confirm => self.confirm(),
            Action::Decline => self.decline(),
            Action::MovePoint { id, coordinate } => self.move_point(id, coordinate),
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.dialog {
            Dialog::Idle => Ok(()),
            Dialog::Pending(_) => Err(Rejected::ConfirmationPending),
        }
    }

    pub fn toggle_add_mode(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.add_mode = !self.add_mode;
        tracing::debug!(add_mode = self.add_mode, "Toggled add mode");
        Ok(())
    }

    /// Append a point at `coordinate`. Add mode stays on so that further
    /// clicks keep adding.
    pub fn add_point(&mut self, coordinate: Coordinate, created_at: NaiveDateTime) -> Result<PointId> {
        self.ensure_idle()?;
        if !self.add_mode {
            return Err(Rejected::AddModeInactive);
        }
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(Point {
            id,
            date: datefmt::format_timestamp(&created_at),
            coordinate,
            selected: false,
        });
        tracing::debug!(%id, lat = coordinate.lat, lng = coordinate.lng, "Added point");
        Ok(id)
    }

    /// Make `id` the only selected point and leave add mode.
    pub fn select(&mut self, id: PointId) -> Result<()> {
        self.ensure_idle()?;
        if self.find(id).is_none() {
            return Err(Rejected::UnknownPoint(id));
        }
        for p in self.points.iter_mut() {
            p.selected = p.id == id;
        }
        self.selection = Some(id);
        self.add_mode = false;
        tracing::debug!(%id, "Selected point");
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.selection.is_none() {
            return Err(Rejected::NoSelection);
        }
        self.deselect_all();
        tracing::debug!("Cleared selection");
        Ok(())
    }

    fn deselect_all(&mut self) {
        for p in self.points.iter_mut() {
            p.selected = false;
        }
        self.selection = None;
    }

    pub fn request_delete_selected(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let id = self.selection.ok_or(Rejected::NoSelection)?;
        self.dialog = Dialog::Pending(PendingDelete::Single(id));
        tracing::debug!(%id, "Requested delete of selected point");
        Ok(())
    }

    pub fn request_delete_all(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.points.is_empty() {
            return Err(Rejected::NoPoints);
        }
        self.dialog = Dialog::Pending(PendingDelete::All);
        tracing::debug!(count = self.points.len(), "Requested delete of all points");
        Ok(())
    }

    /// Carry out the pending deletion and close the dialog.
    pub fn confirm(&mut self) -> Result<()> {
        let Dialog::Pending(pending) = self.dialog else {
            return Err(Rejected::NothingPending);
        };
        match pending {
            PendingDelete::Single(id) => {
                self.points.retain(|p| p.id != id);
                if self.selection == Some(id) {
                    self.selection = None;
                }
                tracing::debug!(%id, remaining = self.points.len(), "Deleted point");
            }
            PendingDelete::All => {
                let count = self.points.len();
                self.points.clear();
                self.selection = None;
                tracing::debug!(count, "Deleted all points");
            }
        }
        self.dialog = Dialog::Idle;
        if self.points.is_empty() {
            self.add_mode = false;
        }
        Ok(())
    }

    pub fn decline(&mut self) -> Result<()> {
        if !self.is_dialog_open() {
            return Err(Rejected::NothingPending);
        }
        self.dialog = Dialog::Idle;
        tracing::debug!("Declined pending deletion");
        Ok(())
    }

    /// Commit the position a selected marker was dragged to.
    pub fn move_point(&mut self, id: PointId, coordinate: Coordinate) -> Result<()> {
        self.ensure_idle()?;
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Rejected::UnknownPoint(id))?;
        if !point.selected {
            return Err(Rejected::NotDraggable(id));
        }
        point.coordinate = coordinate;
        tracing::debug!(%id, lat = coordinate.lat, lng = coordinate.lng, "Moved point");
        Ok(())
    }
}
