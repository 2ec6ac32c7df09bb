/// Integration tests for placement collisions at the authority
/// Depending on `reject_blocked_placement`, a Place whose footprint is taken
/// is either applied anyway and relayed, or dropped and kept from the other
/// peers.
use wirenet_client::{Client, ClientConfig};
use wirenet_server::{RejectEvent, Server, ServerConfig};
use wirenet_shared::{ApplyError, DeviceRegistry, GraphConfig, ParticipantId, Rect, WorldQuery};
use wirenet_test::{hub_with_config, LocalHub};

const ALICE: ParticipantId = ParticipantId::new(1);
const BOB: ParticipantId = ParticipantId::new(2);
const CAROL: ParticipantId = ParticipantId::new(3);

fn hub_with_peers(config: ServerConfig) -> LocalHub {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut hub = hub_with_config(config);
    for id in [ALICE, BOB, CAROL] {
        hub.add_client(id, ClientConfig::default());
    }
    hub.settle();
    hub
}

fn device_counts(hub: &LocalHub) -> (usize, usize, usize, usize) {
    (
        hub.server().graph().device_count(),
        hub.client(&ALICE).unwrap().graph().device_count(),
        hub.client(&BOB).unwrap().graph().device_count(),
        hub.client(&CAROL).unwrap().graph().device_count(),
    )
}

#[test]
fn overlapping_place_is_applied_when_permissive() {
    let mut hub = hub_with_peers(ServerConfig::default());

    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("AndGate", 10, 10)
        .unwrap();
    hub.settle();

    hub.client_mut(&BOB)
        .unwrap()
        .place_device("IntegerConstant", 10, 10)
        .unwrap();
    let settled = hub.settle();

    assert_eq!(device_counts(&hub), (2, 2, 2, 2));
    for mut events in settled.server {
        assert!(!events.has::<RejectEvent>());
    }
}

#[test]
fn overlapping_place_is_dropped_when_strict() {
    let mut hub = hub_with_peers(ServerConfig {
        reject_blocked_placement: true,
        ..ServerConfig::default()
    });

    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("AndGate", 10, 10)
        .unwrap();
    hub.settle();

    hub.client_mut(&BOB)
        .unwrap()
        .place_device("IntegerConstant", 11, 11)
        .unwrap();
    let settled = hub.settle();

    let mut rejections = Vec::new();
    for mut events in settled.server {
        rejections.extend(events.read::<RejectEvent>());
    }
    assert_eq!(rejections.len(), 1);
    let (from, _, error) = &rejections[0];
    assert_eq!(*from, BOB);
    assert!(matches!(
        error,
        ApplyError::PlacementBlocked { x: 11, y: 11, .. }
    ));

    // never relayed, so not even Bob's replica has it
    assert_eq!(device_counts(&hub), (1, 1, 1, 1));
}

#[test]
fn free_place_is_relayed_when_strict() {
    let mut hub = hub_with_peers(ServerConfig {
        reject_blocked_placement: true,
        ..ServerConfig::default()
    });

    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("AndGate", 10, 10)
        .unwrap();
    hub.client_mut(&BOB)
        .unwrap()
        .place_device("IntegerConstant", 12, 10)
        .unwrap();
    hub.settle();

    assert_eq!(device_counts(&hub), (2, 2, 2, 2));
}

// Terrain occupies every cell with x >= 20
struct Cliff;

impl WorldQuery for Cliff {
    fn is_area_free(&self, area: &Rect) -> bool {
        area.x + area.width <= 20
    }
}

#[test]
fn authority_terrain_blocks_placement() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = Server::with_world(
        ServerConfig {
            reject_blocked_placement: true,
            ..ServerConfig::default()
        },
        DeviceRegistry::default(),
        GraphConfig::default(),
        Cliff,
    );
    let mut hub = LocalHub::new(server);
    hub.add_client(ALICE, ClientConfig::default());
    hub.attach_client(Client::with_world(
        BOB,
        ClientConfig::default(),
        DeviceRegistry::default(),
        GraphConfig::default(),
        Cliff,
    ));
    hub.settle();

    // AndGate anchored at (19, 0) spans x 18..=20
    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("AndGate", 19, 0)
        .unwrap();
    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("AndGate", 10, 0)
        .unwrap();
    let settled = hub.settle();

    let mut rejected = 0;
    for mut events in settled.server {
        rejected += events.read::<RejectEvent>().count();
    }
    assert_eq!(rejected, 1);

    let graph = hub.server().graph();
    assert_eq!(graph.device_count(), 1);
    assert!(graph.get_device(19, 0).is_none());
    assert!(graph.get_device(10, 0).is_some());

    assert_eq!(hub.client(&ALICE).unwrap().graph().device_count(), 1);
    assert_eq!(hub.client(&BOB).unwrap().graph().device_count(), 1);
}
