/// Integration tests for snapshot requests
/// A peer joining late asks the authority for its graph and rebuilds it from
/// the replayed Place and Connect operations.
use wirenet_client::ClientConfig;
use wirenet_server::{ServerConfig, SnapshotEvent};
use wirenet_shared::{OutputLamp, ParticipantId, Point};
use wirenet_test::{hub_with_config, GraphSummary, LocalHub};

const ALICE: ParticipantId = ParticipantId::new(1);
const DAVE: ParticipantId = ParticipantId::new(4);

// AndGate anchored at (10, 10): inputs at (9, 10) and (11, 10), output at
// (10, 11). Both inputs fed by true constants, output drives a lamp.
fn build_lit_circuit(hub: &mut LocalHub) {
    let alice = hub.client_mut(&ALICE).unwrap();
    alice.place_device("AndGate", 10, 10).unwrap();
    alice.place_device("OutputLamp", 13, 10).unwrap();
    alice.place_device("BooleanConstant", 7, 10).unwrap();
    alice.place_device("BooleanConstant", 11, 8).unwrap();
    alice.change_setting(7, 10, "Value", "1").unwrap();
    alice.change_setting(11, 8, "Value", "1").unwrap();
    alice
        .connect_pins(
            Point::new(10, 11),
            Point::new(13, 10),
            vec![Point::new(10, 12), Point::new(13, 12)],
        )
        .unwrap();
    alice
        .connect_pins(Point::new(7, 10), Point::new(9, 10), Vec::new())
        .unwrap();
    alice
        .connect_pins(Point::new(11, 10), Point::new(11, 8), Vec::new())
        .unwrap();
    hub.settle();
}

fn hub_with_alice() -> LocalHub {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut hub = hub_with_config(ServerConfig::default());
    hub.add_client(ALICE, ClientConfig::default());
    hub.settle();
    hub
}

#[test]
fn late_joiner_rebuilds_the_graph() {
    let mut hub = hub_with_alice();
    build_lit_circuit(&mut hub);

    hub.add_client(DAVE, ClientConfig::default());
    let settled = hub.settle();

    let mut snapshots = Vec::new();
    for mut events in settled.server {
        snapshots.extend(events.read::<SnapshotEvent>());
    }
    // four places and three connects
    assert_eq!(snapshots, vec![(DAVE, 7)]);

    let authority = GraphSummary::of(hub.server().graph());
    let dave = hub.client(&DAVE).unwrap().graph();
    assert_eq!(GraphSummary::of(dave), authority);

    let lamp = dave.get_device(13, 10).unwrap();
    assert!(OutputLamp::is_lit(dave, &lamp));

    let wire = dave
        .get_wire(
            &dave.get_device_pin(10, 11).unwrap(),
            &dave.get_device_pin(13, 10).unwrap(),
        )
        .unwrap();
    assert_eq!(
        dave.wire_path(&wire).unwrap(),
        vec![
            Point::new(10, 11),
            Point::new(10, 12),
            Point::new(13, 12),
            Point::new(13, 10)
        ]
    );
}

#[test]
fn snapshot_reaches_only_the_requester() {
    let mut hub = hub_with_alice();
    build_lit_circuit(&mut hub);
    let before = GraphSummary::of(hub.client(&ALICE).unwrap().graph());

    hub.add_client(DAVE, ClientConfig::default());
    let settled = hub.settle();

    for (id, mut events) in settled.clients {
        if id == ALICE {
            assert!(!events.has::<wirenet_client::OperationEvent>());
            assert!(!events.has::<wirenet_client::RejectEvent>());
        }
    }
    assert_eq!(GraphSummary::of(hub.client(&ALICE).unwrap().graph()), before);
    assert_eq!(hub.server().user(&DAVE).unwrap().snapshots_served(), 1);
}

#[test]
fn snapshot_can_be_requested_later() {
    let mut hub = hub_with_alice();
    build_lit_circuit(&mut hub);

    hub.add_client(
        DAVE,
        ClientConfig {
            request_snapshot_on_connect: false,
        },
    );
    hub.settle();
    assert_eq!(hub.client(&DAVE).unwrap().graph().device_count(), 0);

    hub.client_mut(&DAVE).unwrap().request_snapshot().unwrap();
    hub.settle();

    assert_eq!(
        GraphSummary::of(hub.client(&DAVE).unwrap().graph()),
        GraphSummary::of(hub.server().graph())
    );
}

#[test]
fn snapshot_of_empty_graph_sends_nothing() {
    let mut hub = hub_with_alice();

    hub.add_client(DAVE, ClientConfig::default());
    let settled = hub.settle();

    let mut snapshots = Vec::new();
    for mut events in settled.server {
        snapshots.extend(events.read::<SnapshotEvent>());
    }
    assert_eq!(snapshots, vec![(DAVE, 0)]);
    assert_eq!(hub.client(&DAVE).unwrap().graph().device_count(), 0);
}
