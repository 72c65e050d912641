//! Integration tests for API body serialization.
//!
//! The browser frontend depends on these exact field names and shapes, so
//! each body type is pinned against literal JSON.

use ragsim_core::NodeId;
use ragsim_server::protocol::*;

#[test]
fn test_add_edge_body_deserializes() {
    let body: AddEdgeBody = serde_json::from_str(r#"{"src":"P1","dst":"R1"}"#)
        .expect("Failed to deserialize");
    assert_eq!(body.src, NodeId::from("P1"));
    assert_eq!(body.dst, NodeId::from("R1"));
}

#[test]
fn test_release_body_takes_only_src() {
    let body: ReleaseBody =
        serde_json::from_str(r#"{"src":"R2"}"#).expect("Failed to deserialize");
    assert_eq!(body.src, NodeId::from("R2"));
}

#[test]
fn test_node_created_shape() {
    let json = serde_json::to_value(NodeCreated {
        node: NodeId::from("P1"),
    })
    .expect("Failed to serialize");
    assert_eq!(json, serde_json::json!({"node": "P1"}));
}

#[test]
fn test_node_list_shape() {
    let json = serde_json::to_value(NodeList {
        processes: vec![NodeId::from("P1"), NodeId::from("P2")],
        resources: vec![NodeId::from("R1")],
    })
    .expect("Failed to serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "processes": ["P1", "P2"],
            "resources": ["R1"],
        })
    );
}

#[test]
fn test_ack_variants() {
    let ok = serde_json::to_value(Ack::ok()).expect("Failed to serialize");
    assert_eq!(ok, serde_json::json!({"status": "ok"}));

    let reset = serde_json::to_value(Ack::reset()).expect("Failed to serialize");
    assert_eq!(reset, serde_json::json!({"status": "reset"}));
}

#[test]
fn test_released_is_nullable() {
    let held = serde_json::to_value(Released {
        released_by: Some(NodeId::from("P2")),
    })
    .expect("Failed to serialize");
    assert_eq!(held, serde_json::json!({"released_by": "P2"}));

    let free = serde_json::to_value(Released { released_by: None })
        .expect("Failed to serialize");
    assert_eq!(free, serde_json::json!({"released_by": null}));
}

#[test]
fn test_auto_allocated_shape() {
    let json = serde_json::to_value(AutoAllocated { allocated: 3 })
        .expect("Failed to serialize");
    assert_eq!(json, serde_json::json!({"allocated": 3}));
}

#[test]
fn test_deadlocks_shape() {
    let json = serde_json::to_value(Deadlocks {
        cycles: vec![
            vec![NodeId::from("P1"), NodeId::from("P2")],
            vec![NodeId::from("P3")],
        ],
    })
    .expect("Failed to serialize");
    assert_eq!(
        json,
        serde_json::json!({"cycles": [["P1", "P2"], ["P3"]]})
    );
}

#[test]
fn test_bodies_roundtrip() {
    let body = AddEdgeBody {
        src: NodeId::from("P1"),
        dst: NodeId::from("R1"),
    };
    let json = serde_json::to_string(&body).expect("Failed to serialize");
    let parsed: AddEdgeBody = serde_json::from_str(&json).expect("Failed to deserialize");
    assert_eq!(parsed.src, body.src);
    assert_eq!(parsed.dst, body.dst);
}
