use actors::{
    actor::{Actor, SupervisionStrategy},
    actor_ref::ActorRef,
    handler::{Handler, Message},
};
use async_trait::async_trait;
use model::{
    location::{InteractionMode, LocationSelection, PositionSample, Role},
    Coordinate,
};

use crate::Result;

/// Label of the live position and of selections copied from it.
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// Selected locations and the map interaction mode of one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    pub current: Option<LocationSelection>,
    pub start: Option<LocationSelection>,
    pub end: Option<LocationSelection>,
    pub mode: InteractionMode,
    /// Set once the position feed delivered its first sample.
    pub has_fix: bool,
}

impl LocationState {
    pub fn get(&self, role: Role) -> Option<&LocationSelection> {
        match role {
            Role::Current => self.current.as_ref(),
            Role::Start => self.start.as_ref(),
            Role::End => self.end.as_ref(),
        }
    }

    fn slot(&mut self, role: Role) -> &mut Option<LocationSelection> {
        match role {
            Role::Current => &mut self.current,
            Role::Start => &mut self.start,
            Role::End => &mut self.end,
        }
    }
}

/// Owns the [`LocationState`]. Every message is applied completely before
/// the next one is looked at.
#[derive(Debug, Default)]
pub struct LocationStore {
    state: LocationState,
}

impl Actor for LocationStore {
    fn name(&self) -> &'static str {
        "location-store"
    }

    fn on_fail(&mut self, _: Box<dyn std::any::Any + Send>) -> SupervisionStrategy {
        // keep the selections, a panic can only happen between transitions
        SupervisionStrategy::Resume
    }
}

pub struct Select(pub LocationSelection);

impl Message for Select {
    type Response = Option<LocationSelection>;
}

#[async_trait]
impl Handler<Select> for LocationStore {
    async fn handle(&mut self, Select(selection): Select) -> Option<LocationSelection> {
        log::debug!("{} location: {}", selection.role, selection.coordinate);
        self.state.slot(selection.role).replace(selection)
    }
}

pub struct MapClick(pub Coordinate);

impl Message for MapClick {
    type Response = Option<LocationSelection>;
}

#[async_trait]
impl Handler<MapClick> for LocationStore {
    async fn handle(&mut self, MapClick(coordinate): MapClick) -> Option<LocationSelection> {
        let role = self.state.mode.picking_role()?;
        let selection = LocationSelection::new(role, coordinate, format!("Map Click ({})", coordinate));
        *self.state.slot(role) = Some(selection.clone());
        self.state.mode = InteractionMode::Idle;
        Some(selection)
    }
}

pub struct TogglePicking(pub Role);

impl Message for TogglePicking {
    type Response = InteractionMode;
}

#[async_trait]
impl Handler<TogglePicking> for LocationStore {
    async fn handle(&mut self, TogglePicking(role): TogglePicking) -> InteractionMode {
        self.state.mode = self.state.mode.toggle(role);
        self.state.mode
    }
}

pub struct UpdatePosition(pub PositionSample);

impl Message for UpdatePosition {
    type Response = bool;
}

#[async_trait]
impl Handler<UpdatePosition> for LocationStore {
    /// Returns `true` for the first fix.
    async fn handle(&mut self, UpdatePosition(sample): UpdatePosition) -> bool {
        let first = !self.state.has_fix;
        self.state.has_fix = true;
        self.state.current = Some(LocationSelection::new(
            Role::Current,
            sample.coordinate,
            CURRENT_LOCATION_LABEL,
        ));
        first
    }
}

pub struct ClearSelections;

impl Message for ClearSelections {
    type Response = ();
}

#[async_trait]
impl Handler<ClearSelections> for LocationStore {
    async fn handle(&mut self, _: ClearSelections) {
        self.state.start = None;
        self.state.end = None;
        self.state.mode = InteractionMode::Idle;
    }
}

pub struct Snapshot;

impl Message for Snapshot {
    type Response = LocationState;
}

#[async_trait]
impl Handler<Snapshot> for LocationStore {
    async fn handle(&mut self, _: Snapshot) -> LocationState {
        self.state.clone()
    }
}

#[async_trait]
pub trait StoreRef {
    async fn select(&self, selection: LocationSelection) -> Result<Option<LocationSelection>>;
    async fn map_click(&self, coordinate: Coordinate) -> Result<Option<LocationSelection>>;
    async fn toggle_picking(&self, role: Role) -> Result<InteractionMode>;
    async fn update_position(&self, sample: PositionSample) -> Result<bool>;
    async fn clear_selections(&self) -> Result<()>;
    async fn snapshot(&self) -> Result<LocationState>;

    async fn get(&self, role: Role) -> Result<Option<LocationSelection>> {
        Ok(self.snapshot().await?.get(role).cloned())
    }
}

#[async_trait]
impl StoreRef for ActorRef<LocationStore> {
    async fn select(&self, selection: LocationSelection) -> Result<Option<LocationSelection>> {
        Ok(self.ask(Select(selection)).await?)
    }

    async fn map_click(&self, coordinate: Coordinate) -> Result<Option<LocationSelection>> {
        Ok(self.ask(MapClick(coordinate)).await?)
    }

    async fn toggle_picking(&self, role: Role) -> Result<InteractionMode> {
        Ok(self.ask(TogglePicking(role)).await?)
    }

    async fn update_position(&self, sample: PositionSample) -> Result<bool> {
        Ok(self.ask(UpdatePosition(sample)).await?)
    }

    async fn clear_selections(&self) -> Result<()> {
        Ok(self.ask(ClearSelections).await?)
    }

    async fn snapshot(&self) -> Result<LocationState> {
        Ok(self.ask(Snapshot).await?)
    }
}
