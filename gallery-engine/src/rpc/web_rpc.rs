use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

use super::handlers::{GalleryParams, dispatch, support_json};
use crate::capability::SupportStatus;
use crate::engine::systems::support_check::SupportCheckRequested;
use crate::notify::Notifications;
use crate::session::PlacementSessionController;

/// JSON-RPC 2.0 request structure. Requests without an id are notifications.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

impl RpcResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    pub fn failure(id: serde_json::Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }
    }
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing traffic to the host page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage bridge to the host page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<MessageQueue>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    publish_state_changes,
                    forward_notifications,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(message_queue: Res<MessageQueue>) {
    let queue = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                queue.push(message_str);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC bridge disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership passes to JS for the lifetime of the page.
    closure.forget();
    info!("RPC message listener registered");
}

/// Raw incoming messages, filled by the page's message listener.
#[derive(Resource, Default, Clone)]
pub struct MessageQueue(Arc<Mutex<Vec<String>>>);

impl MessageQueue {
    /// Queue a raw message as if the host page had posted it.
    pub fn push(&self, message: impl Into<String>) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message.into());
        }
    }
}

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Res<MessageQueue>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let messages = if let Ok(mut queue) = message_queue.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut gallery: GalleryParams,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut support_checks: EventWriter<SupportCheckRequested>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Failed to parse RPC message: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    serde_json::Value::Null,
                    -32700,
                    "Parse error",
                    Some(serde_json::json!({ "message": parse_error.to_string() })),
                ));
                continue;
            }
        };

        let mut ctx = gallery.context();
        let response = dispatch(&request, &mut ctx);
        let effects = ctx.effects;

        if effects.retry_support {
            support_checks.write(SupportCheckRequested);
        }
        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }
}

/// Announce support and session summaries to the host when they change.
fn publish_state_changes(
    support: Res<SupportStatus>,
    session: Res<PlacementSessionController>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_support: Local<Option<serde_json::Value>>,
    mut last_session: Local<Option<serde_json::Value>>,
) {
    let support_summary = support_json(&support);
    if last_support.as_ref() != Some(&support_summary) {
        rpc_interface.send_notification("support_changed", support_summary.clone());
        *last_support = Some(support_summary);
    }

    // Reticle poses change every frame; the host only needs the summary.
    let session_summary = serde_json::json!({
        "phase": session.phase(),
        "epoch": session.epoch(),
        "surface_detected": session.is_surface_detected(),
        "placed_count": session.placed_objects().len(),
        "fault": session.fault(),
    });
    if last_session.as_ref() != Some(&session_summary) {
        rpc_interface.send_notification("session_changed", session_summary.clone());
        *last_session = Some(session_summary);
    }
}

fn forward_notifications(
    mut notifications: ResMut<Notifications>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if notifications.is_empty() {
        return;
    }
    for notification in notifications.drain() {
        match serde_json::to_value(&notification) {
            Ok(params) => rpc_interface.send_notification("notification", params),
            Err(e) => error!("Failed to serialize notification: {}", e),
        }
    }
}

/// Create standardized error response with optional data payload.
pub fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse::failure(
        id,
        RpcError {
            code,
            message: message.to_string(),
            data,
        },
    )
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match serde_json::to_string(message) {
            Ok(json) => trace!("RPC out: {}", json),
            Err(e) => error!("Failed to serialize message: {}", e),
        }
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArtworkCatalog, FavoriteSet};
    use crate::view::ArViewState;

    fn bridge_app() -> App {
        let mut app = App::new();
        app.add_plugins(WebRpcPlugin)
            .init_resource::<ArtworkCatalog>()
            .init_resource::<FavoriteSet>()
            .init_resource::<SupportStatus>()
            .init_resource::<ArViewState>()
            .init_resource::<PlacementSessionController>()
            .init_resource::<Notifications>()
            .add_event::<SupportCheckRequested>();
        app
    }

    #[test]
    fn queued_messages_are_applied_next_frame() {
        let mut app = bridge_app();
        let queue = app.world().resource::<MessageQueue>().clone();
        queue.push(r#"{"jsonrpc":"2.0","method":"select_artwork","params":{"id":"2"}}"#);
        queue.push(r#"{"jsonrpc":"2.0","method":"retry_support","id":1}"#);

        app.update();

        let view = app.world().resource::<ArViewState>();
        assert_eq!(view.selected_id(), Some("2"));
        let requests = app.world().resource::<Events<SupportCheckRequested>>();
        assert_eq!(requests.len(), 1);
        // Toasts were forwarded to the host.
        assert!(app.world().resource::<Notifications>().is_empty());
    }

    #[test]
    fn malformed_message_does_not_touch_state() {
        let mut app = bridge_app();
        let queue = app.world().resource::<MessageQueue>().clone();
        queue.push("{ jsonrpc");

        app.update();

        assert!(app.world().resource::<ArViewState>().selected_id().is_none());
        assert!(app.world().resource::<MessageQueue>().0.lock().is_ok_and(|q| q.is_empty()));
    }
}
