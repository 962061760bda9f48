use crate::errors::AppError;
use crate::models::{AdjustRequest, ConfirmRequest, EventRequest, NewEvent, Sport, StartRequest, StatKind};
use crate::session::SessionSnapshot;
use crate::state::AppState;
use crate::summary::{Summary, build_summary};
use crate::ui::render_page;
use crate::view::{Haptic, ReturnTo, View};
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub changed: bool,
    pub haptic: &'static [u32],
    pub state: SessionSnapshot,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub summary: bool,
}

#[derive(Debug, Deserialize)]
pub struct StartForm {
    pub sport: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub return_to: ReturnTo,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    pub return_to: ReturnTo,
}

#[derive(Debug, Deserialize)]
pub struct RecordForm {
    pub kind: String,
    pub value: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustForm {
    pub kind: String,
    pub delta: i32,
    pub value: Option<u32>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    let snapshot = tracker.snapshot();
    let summary = match (query.summary, snapshot.view, tracker.game()) {
        (true, View::Game, Some(game)) => Some(build_summary(game)),
        _ => None,
    };
    Html(render_page(&snapshot, summary.as_ref(), &state.base_path))
}

pub async fn start_form(State(state): State<AppState>, Form(form): Form<StartForm>) -> Result<Redirect, AppError> {
    apply_start(&state, &form.sport).await?;
    Ok(redirect(&state, ReturnTo::Game))
}

pub async fn resume_form(State(state): State<AppState>) -> Redirect {
    state.tracker.lock().await.resume();
    redirect(&state, ReturnTo::Game)
}

pub async fn setup_form(State(state): State<AppState>) -> Redirect {
    state.tracker.lock().await.go_to_setup();
    redirect(&state, ReturnTo::Game)
}

pub async fn end_form(State(state): State<AppState>, Form(form): Form<ConfirmForm>) -> Redirect {
    let ended = state.tracker.lock().await.end_session(form.confirmed);
    let target = if ended { ReturnTo::Game } else { form.return_to };
    redirect(&state, target)
}

pub async fn record_form(State(state): State<AppState>, Form(form): Form<RecordForm>) -> Result<Redirect, AppError> {
    let kind = parse_kind(&form.kind)?;
    state
        .tracker
        .lock()
        .await
        .add_event(NewEvent::with_value(kind, form.value))?;
    Ok(redirect(&state, ReturnTo::Game))
}

pub async fn adjust_form(State(state): State<AppState>, Form(form): Form<AdjustForm>) -> Result<Redirect, AppError> {
    let kind = parse_kind(&form.kind)?;
    state.tracker.lock().await.adjust(kind, form.delta, form.value)?;
    Ok(redirect(&state, ReturnTo::Summary))
}

pub async fn undo_form(State(state): State<AppState>) -> Redirect {
    state.tracker.lock().await.undo();
    redirect(&state, ReturnTo::Summary)
}

pub async fn toggle_timer_form(State(state): State<AppState>, Form(form): Form<ReturnForm>) -> Redirect {
    state.toggle_timer().await;
    redirect(&state, form.return_to)
}

pub async fn reset_timer_form(State(state): State<AppState>, Form(form): Form<ConfirmForm>) -> Redirect {
    state.tracker.lock().await.reset_timer(form.confirmed);
    redirect(&state, form.return_to)
}

pub async fn get_state(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.tracker.lock().await.snapshot())
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    let tracker = state.tracker.lock().await;
    let game = tracker
        .game()
        .ok_or_else(|| AppError::not_found("no active session"))?;
    Ok(Json(build_summary(game)))
}

pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let snapshot = apply_start(&state, &payload.sport).await?;
    Ok(Json(respond(true, Haptic::Navigate, snapshot)))
}

pub async fn resume(State(state): State<AppState>) -> Json<ActionResponse> {
    let mut tracker = state.tracker.lock().await;
    let changed = tracker.resume();
    Json(respond(changed, Haptic::Navigate, tracker.snapshot()))
}

pub async fn setup(State(state): State<AppState>) -> Json<ActionResponse> {
    let mut tracker = state.tracker.lock().await;
    tracker.go_to_setup();
    Json(respond(true, Haptic::Navigate, tracker.snapshot()))
}

pub async fn end(State(state): State<AppState>, Json(payload): Json<ConfirmRequest>) -> Json<ActionResponse> {
    let mut tracker = state.tracker.lock().await;
    let changed = tracker.end_session(payload.confirmed);
    Json(respond(changed, Haptic::Navigate, tracker.snapshot()))
}

pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<EventRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let kind = parse_kind(&payload.kind)?;
    let mut tracker = state.tracker.lock().await;
    let changed = tracker.add_event(NewEvent::with_value(kind, payload.value))?;
    Ok(Json(respond(changed, Haptic::Record, tracker.snapshot())))
}

pub async fn adjust(
    State(state): State<AppState>,
    Json(payload): Json<AdjustRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let kind = parse_kind(&payload.kind)?;
    let mut tracker = state.tracker.lock().await;
    let changed = tracker.adjust(kind, payload.delta, payload.value)?;
    Ok(Json(respond(changed, Haptic::Adjust, tracker.snapshot())))
}

pub async fn undo(State(state): State<AppState>) -> Json<ActionResponse> {
    let mut tracker = state.tracker.lock().await;
    let changed = tracker.undo();
    Json(respond(changed, Haptic::Undo, tracker.snapshot()))
}

pub async fn toggle_timer(State(state): State<AppState>) -> Json<ActionResponse> {
    let before = state.tracker.lock().await.revision();
    let snapshot = state.toggle_timer().await;
    Json(respond(snapshot.revision != before, Haptic::Timer, snapshot))
}

pub async fn reset_timer(State(state): State<AppState>, Json(payload): Json<ConfirmRequest>) -> Json<ActionResponse> {
    let mut tracker = state.tracker.lock().await;
    let changed = tracker.reset_timer(payload.confirmed);
    Json(respond(changed, Haptic::Timer, tracker.snapshot()))
}

async fn apply_start(state: &AppState, sport: &str) -> Result<SessionSnapshot, AppError> {
    let sport: Sport = sport.parse()?;
    let mut tracker = state.tracker.lock().await;
    tracker.start(sport);
    Ok(tracker.snapshot())
}

fn parse_kind(raw: &str) -> Result<StatKind, AppError> {
    raw.parse::<StatKind>().map_err(|err| {
        warn!("rejected stat: {err}");
        AppError::from(err)
    })
}

fn respond(changed: bool, haptic: Haptic, state: SessionSnapshot) -> ActionResponse {
    ActionResponse {
        changed,
        haptic: haptic.pattern(),
        state,
    }
}

fn redirect(state: &AppState, target: ReturnTo) -> Redirect {
    Redirect::to(&target.location(&state.base_path))
}
