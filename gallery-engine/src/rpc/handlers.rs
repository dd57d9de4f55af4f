use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};

use super::web_rpc::{RpcError, RpcRequest, RpcResponse, create_error_response};
use crate::capability::SupportStatus;
use crate::catalog::{ArtworkCatalog, ArtworkRecord, CatalogFilter, FavoriteSet, search};
use crate::error::GalleryError;
use crate::notify::{Notification, Notifications};
use crate::routes;
use crate::session::{
    HitTestResult, PlacementSessionController, PlatformError, Pose, SessionError, wall_clock_ms,
};
use crate::view::ArViewState;
use constants::category::{get_category_icon, get_category_label};

/// Follow-up work a request asks of the engine beyond its direct state change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RpcEffects {
    pub retry_support: bool,
}

/// Mutable view over the gallery resources a request may touch.
pub struct GalleryContext<'a> {
    pub catalog: &'a ArtworkCatalog,
    pub favorites: &'a mut FavoriteSet,
    pub support: &'a SupportStatus,
    pub view: &'a mut ArViewState,
    pub session: &'a mut PlacementSessionController,
    pub notifications: &'a mut Notifications,
    pub effects: RpcEffects,
    pub now_ms: u64,
}

/// The resources behind [`GalleryContext`], as a system parameter.
#[derive(SystemParam)]
pub struct GalleryParams<'w> {
    catalog: Res<'w, ArtworkCatalog>,
    favorites: ResMut<'w, FavoriteSet>,
    support: Res<'w, SupportStatus>,
    view: ResMut<'w, ArViewState>,
    session: ResMut<'w, PlacementSessionController>,
    notifications: ResMut<'w, Notifications>,
}

impl GalleryParams<'_> {
    pub fn context(&mut self) -> GalleryContext<'_> {
        GalleryContext {
            catalog: &self.catalog,
            favorites: &mut self.favorites,
            support: &self.support,
            view: &mut self.view,
            session: &mut self.session,
            notifications: &mut self.notifications,
            effects: RpcEffects::default(),
            now_ms: wall_clock_ms(),
        }
    }
}

impl From<GalleryError> for RpcError {
    fn from(error: GalleryError) -> Self {
        let code = match error {
            GalleryError::NotFoundInCatalog(_) => -32001,
            GalleryError::PreconditionNotMet(_)
            | GalleryError::PermissionDenied(_)
            | GalleryError::DeviceUnsupported(_)
            | GalleryError::RuntimeUnavailable(_)
            | GalleryError::SessionFault(_) => -32002,
            GalleryError::Config(_) => -32603,
        };
        Self {
            code,
            message: error.to_string(),
            data: Some(json!({ "kind": error.kind() })),
        }
    }
}

/// Execute a request. Every request is applied; only requests with an id get
/// a response.
pub fn dispatch(request: &RpcRequest, ctx: &mut GalleryContext) -> Option<RpcResponse> {
    if request.jsonrpc != "2.0" {
        warn!("Rejecting RPC with jsonrpc version {:?}", request.jsonrpc);
        return request.id.clone().map(|id| {
            create_error_response(id, -32600, "Invalid request", Some(json!({"jsonrpc": request.jsonrpc})))
        });
    }

    debug!("RPC {}", request.method);
    let params = &request.params;
    let result = match request.method.as_str() {
        // Catalog
        "list_artworks" => handle_list_artworks(params, ctx),
        "get_artwork" => handle_get_artwork(params, ctx),
        "toggle_favorite" => handle_toggle_favorite(params, ctx),
        "share_artwork" => handle_share_artwork(params, ctx),
        // Routing
        "resolve_route" => handle_resolve_route(params, ctx),
        // Support
        "get_support" => Ok(support_json(ctx.support)),
        "retry_support" => handle_retry_support(ctx),
        // View
        "select_artwork" => handle_select_artwork(params, ctx),
        "zoom_in" => Ok(json!({ "scale": ctx.view.controls_mut().zoom_in() })),
        "zoom_out" => Ok(json!({ "scale": ctx.view.controls_mut().zoom_out() })),
        "rotate" => Ok(json!({ "rotation": ctx.view.controls_mut().rotate() })),
        "reset_view" => handle_reset_view(ctx),
        "get_view" => Ok(ctx.view.to_json(ctx.catalog)),
        // Session
        "start_session" => handle_start_session(ctx),
        "end_session" => handle_end_session(ctx),
        "commit_placement" | "xr_select" => handle_commit_placement(ctx),
        "get_session" => Ok(ctx.session.to_json()),
        "dismiss_fault" => {
            ctx.session.dismiss_fault();
            Ok(ctx.session.to_json())
        }
        // Platform callbacks
        "xr_session_started" => handle_session_started(params, ctx),
        "xr_session_ended" => handle_session_ended(params, ctx),
        "xr_hit_test" => handle_hit_test(params, ctx),
        "xr_session_error" => handle_session_error(params, ctx),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(value) => RpcResponse::success(id, value),
        Err(error) => {
            debug!("RPC {} failed: {}", request.method, error.message);
            RpcResponse::failure(id, error)
        }
    })
}

#[derive(Deserialize)]
struct IdParams {
    id: String,
}

fn id_param(params: &Value) -> Result<String, RpcError> {
    serde_json::from_value::<IdParams>(params.clone())
        .map(|p| p.id)
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))
}

fn lookup<'a>(catalog: &'a ArtworkCatalog, id: &str) -> Result<&'a ArtworkRecord, RpcError> {
    catalog
        .get_by_id(id)
        .ok_or_else(|| GalleryError::NotFoundInCatalog(id.to_string()).into())
}

fn artwork_json(artwork: &ArtworkRecord, favorites: &FavoriteSet) -> Value {
    json!({
        "artwork": artwork,
        "favorite": favorites.contains(&artwork.id),
        "category_label": get_category_label(artwork.category.as_str()),
        "category_icon": get_category_icon(artwork.category.as_str()),
    })
}

/// Verdict summary shared by `get_support` and `support_changed`. An
/// unsupported verdict carries its reason as a gallery error class.
pub fn support_json(support: &SupportStatus) -> Value {
    let verdict = support.verdict();
    json!({
        "verdict": verdict,
        "checking": support.is_checking(),
        "error": verdict
            .reason
            .clone()
            .map(|reason| GalleryError::from(reason).to_json()),
    })
}

fn handle_list_artworks(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    #[derive(Deserialize, Default)]
    struct ListParams {
        #[serde(default)]
        filter: Option<String>,
        #[serde(default)]
        query: Option<String>,
    }

    let list_params = if params.is_null() {
        ListParams::default()
    } else {
        serde_json::from_value::<ListParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected optional 'filter' and 'query' strings"))?
    };

    let filter = CatalogFilter::from_query(list_params.filter.as_deref());
    let listing = filter.apply(ctx.catalog, ctx.favorites);
    let listing = search(listing, list_params.query.as_deref().unwrap_or_default());

    Ok(json!({
        "filter": filter.as_query(),
        "artworks": listing
            .into_iter()
            .map(|artwork| artwork_json(artwork, ctx.favorites))
            .collect::<Vec<_>>(),
    }))
}

fn handle_get_artwork(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    let id = id_param(params)?;
    let artwork = lookup(ctx.catalog, &id)?;
    Ok(artwork_json(artwork, ctx.favorites))
}

fn handle_toggle_favorite(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    let id = id_param(params)?;
    let artwork = lookup(ctx.catalog, &id)?;

    let favorite = ctx.favorites.toggle(&artwork.id);
    let notification = if favorite {
        Notification::info(
            "Added to favorites",
            format!("\"{}\" was added to your favorites.", artwork.title),
        )
    } else {
        Notification::info(
            "Removed from favorites",
            format!("\"{}\" was removed from your favorites.", artwork.title),
        )
    };
    ctx.notifications.push(notification);

    Ok(json!({ "id": artwork.id, "favorite": favorite }))
}

fn handle_share_artwork(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    let id = id_param(params)?;
    let artwork = lookup(ctx.catalog, &id)?;
    Ok(json!({
        "title": artwork.title,
        "text": artwork.share_text(),
        "path": format!("/artwork/{}", artwork.id),
    }))
}

fn handle_resolve_route(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct RouteParams {
        path: String,
    }

    let route_params = serde_json::from_value::<RouteParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'path' parameter"))?;

    let resolution = routes::resolve(&route_params.path, ctx.catalog, ctx.notifications);

    // A deep link into the AR view preselects its artwork.
    if let routes::Route::ArView {
        artwork_id: Some(id),
    } = &resolution.route
    {
        ctx.view
            .select(id, ctx.catalog, ctx.notifications)
            .map_err(RpcError::from)?;
    }

    serde_json::to_value(&resolution).map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn handle_retry_support(ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    ctx.effects.retry_support = true;
    Ok(json!({ "requested": true }))
}

fn handle_select_artwork(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    let id = id_param(params)?;
    let artwork = ctx.view.select(&id, ctx.catalog, ctx.notifications)?;
    Ok(json!({ "artwork": artwork }))
}

fn handle_reset_view(ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    ctx.view.reset(ctx.notifications);
    Ok(ctx.view.to_json(ctx.catalog))
}

fn handle_start_session(ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    let verdict = ctx.support.verdict();
    let ticket = ctx.session.start(verdict).map_err(|error| match (&error, &verdict.reason) {
        (SessionError::Unsupported(_), Some(reason)) => GalleryError::from(reason.clone()),
        _ => GalleryError::from(error),
    })?;
    Ok(ticket.to_json())
}

fn handle_end_session(ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    ctx.session.end();
    Ok(ctx.session.to_json())
}

/// Platform report that its session ended. A tagged epoch older than the
/// current one is ignored.
fn handle_session_ended(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    #[derive(Deserialize, Default)]
    struct EndedParams {
        #[serde(default)]
        epoch: Option<u64>,
    }

    let ended = if params.is_null() {
        EndedParams::default()
    } else {
        serde_json::from_value::<EndedParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected optional 'epoch' parameter"))?
    };

    ctx.session.on_platform_ended(ended.epoch);
    Ok(ctx.session.to_json())
}

/// Commit the selected artwork at the reticle with the current controls.
/// Shared by `commit_placement`, `xr_select` and the desktop click.
pub fn commit_selected_placement(ctx: &mut GalleryContext) -> Option<Value> {
    let controls = *ctx.view.controls();
    let artwork_id = ctx.view.selected_id().map(str::to_string);

    let placed = ctx
        .session
        .commit_placement(
            artwork_id.as_deref(),
            controls.scale(),
            controls.rotation_degrees(),
            ctx.now_ms,
        )
        .map(|placed| placed.to_json());

    if placed.is_some() {
        if let Some(artwork) = ctx.view.selected(ctx.catalog) {
            ctx.notifications.push(Notification::info(
                "Artwork placed",
                format!("\"{}\" was placed in your space.", artwork.title),
            ));
        }
    }
    placed
}

fn handle_commit_placement(ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    Ok(json!({ "placed": commit_selected_placement(ctx) }))
}

fn handle_session_started(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct StartedParams {
        epoch: u64,
    }

    let started = serde_json::from_value::<StartedParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'epoch' parameter"))?;

    Ok(json!({ "active": confirm_session_started(ctx, started.epoch) }))
}

/// Platform confirmation of a started session.
pub fn confirm_session_started(ctx: &mut GalleryContext, epoch: u64) -> bool {
    let active = ctx.session.confirm_started(epoch);
    if active {
        ctx.notifications.push(Notification::info(
            "AR session started",
            "Move your device to detect surfaces, then tap to place the artwork.",
        ));
    }
    active
}

fn handle_hit_test(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct PoseParams {
        position: [f32; 3],
        #[serde(default)]
        orientation: Option<[f32; 4]>,
    }

    #[derive(Deserialize)]
    struct HitTestParams {
        #[serde(default)]
        pose: Option<PoseParams>,
    }

    let hit_params = if params.is_null() {
        HitTestParams { pose: None }
    } else {
        serde_json::from_value::<HitTestParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected 'pose' object or null"))?
    };

    let result = match hit_params.pose {
        Some(pose) => {
            let position = Vec3::from_array(pose.position);
            let orientation = pose.orientation.map_or(Quat::IDENTITY, Quat::from_array);
            if !position.is_finite() || !orientation.is_finite() || orientation.length_squared() == 0.0 {
                return Err(RpcError::invalid_params("Pose must be finite with a non-zero orientation"));
            }
            HitTestResult::hit(Pose::new(position, orientation.normalize()))
        }
        None => HitTestResult::miss(),
    };

    ctx.session.on_frame_hit_test(&result);
    Ok(json!({ "surface_detected": ctx.session.is_surface_detected() }))
}

fn handle_session_error(params: &Value, ctx: &mut GalleryContext) -> Result<Value, RpcError> {
    let platform_error = if params.is_null() {
        PlatformError::default()
    } else {
        serde_json::from_value::<PlatformError>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected optional 'code' and 'message'"))?
    };

    let fault = ctx.session.on_error(&platform_error).cloned();
    if let Some(fault) = &fault {
        ctx.notifications.push(Notification::destructive(
            "AR session error",
            fault.message.clone(),
        ));
    }
    let error = fault.clone().map(|fault| GalleryError::from(fault).to_json());
    Ok(json!({ "fault": fault, "error": error }))
}
