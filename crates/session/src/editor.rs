//! Editor facade over a host.
//!
//! `MeshEditor` owns a host and an [`EditConfig`] and turns scripted
//! [`Request`]s into [`Reply`]s. Errors become `Reply::Error` so one failing
//! request does not stop a script.

use glam::Vec3;
use meshedit_config::EditConfig;
use meshedit_host::{Host, SelectOptions, scene_state, select_object_by_name};
use meshedit_ipc::{
    Mode, MoveCommand, MoveRequest, ObjectCommand, QueryCommand, Reply, Request, SceneState,
};
use tracing::{debug, warn};

use crate::error::EditError;
use crate::ops::{MoveReport, move_geometry};
use crate::selection::SelectionGuard;
use crate::session::GeometrySession;

pub struct MeshEditor<H: Host> {
    host: H,
    config: EditConfig,
}

impl<H: Host> MeshEditor<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, EditConfig::default())
    }

    pub fn with_config(host: H, config: EditConfig) -> Self {
        Self { host, config }
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Move command using the configured space and backend
    pub fn command(&self, object: &str, direction: Vec3, distance: f32) -> MoveCommand {
        MoveCommand::new(object, direction, distance)
            .with_space(self.config.space)
            .with_backend(self.config.backend)
    }

    pub fn move_object(&mut self, object: &str, direction: Vec3, distance: f32) -> Result<MoveReport, EditError> {
        let cmd = self.command(object, direction, distance);
        self.execute(&cmd)
    }

    pub fn execute(&mut self, cmd: &MoveCommand) -> Result<MoveReport, EditError> {
        move_geometry(&mut self.host, cmd)
    }

    /// Select an object by name. Failures are reported, not skipped.
    pub fn select(&mut self, name: &str, options: SelectOptions) -> Result<(), EditError> {
        select_object_by_name(&mut self.host, name, options).map_err(EditError::lookup)
    }

    /// Switch the host into `mode` with `object` active, without restoring later.
    pub fn set_mode(&mut self, object: &str, mode: Mode) -> Result<Mode, EditError> {
        let Some(obj) = self.host.object(object) else {
            return Err(EditError::NotFound(object.to_string()));
        };
        if mode == Mode::Edit && !obj.kind.is_editable() {
            return Err(EditError::invalid_object(
                object,
                format!("{:?} objects have no edit mode", obj.kind),
            ));
        }

        self.select(object, SelectOptions::default())?;
        if self.host.mode() != mode {
            self.host.request_mode(mode)?;
        }
        let actual = self.host.mode();
        if actual != mode {
            return Err(EditError::ModeNotReached {
                requested: mode,
                actual,
            });
        }
        Ok(actual)
    }

    /// Vertex indices of a mesh; `None` uses the configured selected-only default.
    ///
    /// Reads the live edit buffer when the host is in edit mode.
    pub fn vertex_indices(&mut self, object: &str, selected_only: Option<bool>) -> Result<Vec<u32>, EditError> {
        let selected_only = selected_only.unwrap_or(self.config.selected_only);
        let live = self.host.mode() == Mode::Edit;
        let mut session = GeometrySession::enter(&mut self.host, object, live)?;
        session.vertex_indices(selected_only)
    }

    /// Run `f` inside a selection guard honouring `restore_selection`
    pub fn with_selection<R>(&mut self, f: impl FnOnce(&mut SelectionGuard<'_, H>) -> R) -> R {
        let mut guard = SelectionGuard::with_restore(&mut self.host, self.config.restore_selection);
        f(&mut guard)
    }

    pub fn state(&self) -> SceneState {
        scene_state(&self.host)
    }

    /// Run a scripted move; absent space and backend tokens use the config
    pub fn run_move(&mut self, request: MoveRequest) -> Result<Reply, EditError> {
        let cmd = request.resolve(self.config.space, self.config.backend)?;
        let report = self.execute(&cmd)?;
        Ok(Reply::Moved {
            object: cmd.object,
            strategy: report.strategy,
            moved: report.moved,
        })
    }

    /// Run one scripted request
    pub fn handle(&mut self, request: Request) -> Reply {
        debug!("Handling {:?}", request);
        let result = match request {
            Request::Move(request) => self.run_move(request),
            Request::Object(ObjectCommand::Select {
                name,
                make_active,
                deselect_others,
            }) => {
                let options = SelectOptions {
                    make_active,
                    deselect_others,
                };
                self.select(&name, options).map(|()| Reply::Selected { name })
            }
            Request::Object(ObjectCommand::SetMode { object, mode }) => mode
                .parse::<Mode>()
                .map_err(EditError::from)
                .and_then(|mode| self.set_mode(&object, mode))
                .map(|mode| Reply::ModeChanged { mode }),
            Request::Query(QueryCommand::VertexIndices {
                object,
                selected_only,
            }) => self
                .vertex_indices(&object, selected_only)
                .map(|indices| Reply::VertexIndices { object, indices }),
            Request::DumpState => Ok(Reply::State(self.state())),
        };

        result.unwrap_or_else(|e| {
            warn!("Request failed: {}", e);
            Reply::Error {
                code: e.code().to_string(),
                message: e.to_string(),
            }
        })
    }
}
