//! Wire types for the length-prefixed JSON envelope protocol (spec.md §6).
//! The framing codec itself (length prefix, socket I/O) lives in
//! `autarch-net`; this module only defines the JSON shapes carried inside.

use serde::{Deserialize, Serialize};

use crate::snapshot::{Snapshot, TerrainGrid};

/// Generic outer envelope: `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
}

/// `hello` message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hello {
    pub player: String,
    pub faction: String,
    #[serde(default)]
    pub terrain: Option<TerrainGrid>,
}

/// `ack` reply payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// The full set of inbound message payloads, after dispatch-by-type.
#[derive(Debug, Clone)]
pub enum InboundMessage {
    Hello(Hello),
    GameState(Box<Snapshot>),
}

/// All outbound command types an action may emit (spec.md §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundCommand {
    #[serde(rename = "produce")]
    Produce {
        queue: String,
        item: String,
        count: u32,
    },
    #[serde(rename = "place_building")]
    PlaceBuilding {
        queue: String,
        item: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint_x: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint_y: Option<f64>,
    },
    #[serde(rename = "cancel_production")]
    CancelProduction {
        queue: String,
        item: String,
        count: u32,
    },
    #[serde(rename = "attack_move")]
    AttackMove {
        actor_ids: Vec<u32>,
        x: f64,
        y: f64,
    },
    #[serde(rename = "move")]
    Move { actor_id: u32, x: f64, y: f64 },
    #[serde(rename = "set_rally")]
    SetRally { actor_id: u32, x: f64, y: f64 },
    #[serde(rename = "deploy")]
    Deploy { actor_id: u32 },
    #[serde(rename = "repair_building")]
    RepairBuilding { actor_id: u32 },
    #[serde(rename = "attack")]
    Attack { actor_id: u32, target_id: u32 },
    #[serde(rename = "harvest")]
    Harvest { actor_id: u32, x: f64, y: f64 },
    #[serde(rename = "capture")]
    Capture { actor_id: u32, target_id: u32 },
    #[serde(rename = "enter_transport")]
    EnterTransport { actor_id: u32, transport_id: u32 },
    #[serde(rename = "unload")]
    Unload { actor_id: u32 },
    #[serde(rename = "support_power")]
    SupportPower { power_key: String, x: f64, y: f64 },
}

impl Envelope {
    pub fn new(kind: impl Into<String>, data: impl Serialize) -> serde_json::Result<Self> {
        Ok(Self {
            kind: kind.into(),
            data: serde_json::to_value(data)?,
        })
    }
}

impl OutboundCommand {
    /// Wrap this command in its outer envelope, ready for framing.
    pub fn into_envelope(self) -> serde_json::Result<Envelope> {
        let value = serde_json::to_value(&self)?;
        // `#[serde(tag = "type")]` inlines the discriminant into the object
        // itself; lift it back out so the wire shape matches spec.md §6's
        // `{"type", "data"}` envelope rather than a flattened object.
        let serde_json::Value::Object(mut obj) = value else {
            unreachable!("OutboundCommand always serializes to an object")
        };
        let kind = obj
            .remove("type")
            .and_then(|v| v.as_str().map(str::to_string))
            .expect("tagged enum always carries a type field");
        Ok(Envelope {
            kind,
            data: serde_json::Value::Object(obj),
        })
    }
}
