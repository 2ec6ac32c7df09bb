/// Integration tests for the authority relay
/// Edits made by one peer reach the authority, which relays them to every
/// peer in its own apply order, so all replicas converge on the same
/// topology.
use std::collections::BTreeMap;

use wirenet_client::ClientConfig;
use wirenet_server::{OperationEvent, RejectEvent, ServerConfig};
use wirenet_shared::{OutputLamp, ParticipantId, Point};
use wirenet_test::{hub_with_config, GraphSummary, LocalHub};

const ALICE: ParticipantId = ParticipantId::new(1);
const BOB: ParticipantId = ParticipantId::new(2);
const CAROL: ParticipantId = ParticipantId::new(3);

fn hub_with_peers() -> LocalHub {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut hub = hub_with_config(ServerConfig::default());
    for id in [ALICE, BOB, CAROL] {
        hub.add_client(id, ClientConfig::default());
    }
    hub.settle();
    hub
}

fn assert_converged(hub: &LocalHub) -> GraphSummary {
    let authority = GraphSummary::of(hub.server().graph());
    for id in hub.client_ids() {
        let peer = GraphSummary::of(hub.client(&id).unwrap().graph());
        assert_eq!(peer, authority, "replica of {} diverged", id);
    }
    authority
}

#[test]
fn edits_from_one_peer_reach_everyone() {
    let mut hub = hub_with_peers();

    let alice = hub.client_mut(&ALICE).unwrap();
    alice.place_device("BooleanConstant", 0, 0).unwrap();
    alice.change_setting(0, 0, "Value", "1").unwrap();
    alice.place_device("OutputLamp", 4, 0).unwrap();
    alice
        .connect_pins(Point::new(0, 0), Point::new(4, 0), vec![Point::new(2, 0)])
        .unwrap();
    hub.settle();

    let summary = assert_converged(&hub);
    assert_eq!(summary.device_count(), 2);
    assert_eq!(summary.wire_count(), 1);

    for id in [BOB, CAROL] {
        let graph = hub.client(&id).unwrap().graph();
        let lamp = graph.get_device(4, 0).unwrap();
        assert!(OutputLamp::is_lit(graph, &lamp));
    }
}

#[test]
fn origin_receives_its_own_operation_back() {
    let mut hub = hub_with_peers();

    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("IntegerConstant", 0, 0)
        .unwrap();
    let settled = hub.settle();

    let mut per_peer: BTreeMap<ParticipantId, usize> = BTreeMap::new();
    for (id, mut events) in settled.clients {
        *per_peer.entry(id).or_default() += events.read::<wirenet_client::OperationEvent>().count();
    }
    assert_eq!(per_peer.into_iter().collect::<Vec<_>>(), vec![(ALICE, 1), (BOB, 1), (CAROL, 1)]);

    let applied: usize = settled
        .server
        .into_iter()
        .map(|mut events| events.read::<OperationEvent>().count())
        .sum();
    assert_eq!(applied, 1);
}

#[test]
fn edits_from_several_peers_converge() {
    let mut hub = hub_with_peers();

    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("IntegerConstant", 0, 0)
        .unwrap();
    hub.client_mut(&BOB)
        .unwrap()
        .place_device("IntegerConstant", 0, 4)
        .unwrap();
    hub.client_mut(&CAROL)
        .unwrap()
        .place_device("Add", 5, 2)
        .unwrap();
    hub.settle();

    // Add anchored at (5, 2): inputs at (4, 2) and (6, 2), output at (5, 3)
    hub.client_mut(&BOB)
        .unwrap()
        .connect_pins(Point::new(0, 0), Point::new(4, 2), Vec::new())
        .unwrap();
    hub.client_mut(&CAROL)
        .unwrap()
        .connect_pins(Point::new(6, 2), Point::new(0, 4), Vec::new())
        .unwrap();
    hub.client_mut(&ALICE)
        .unwrap()
        .change_setting(0, 4, "Value", "5")
        .unwrap();
    hub.client_mut(&BOB)
        .unwrap()
        .change_setting(0, 0, "Value", "2")
        .unwrap();
    hub.settle();

    let summary = assert_converged(&hub);
    assert_eq!(summary.device_count(), 3);
    assert_eq!(summary.wire_count(), 2);

    let graph = hub.server().graph();
    let add = graph.get_device(5, 2).unwrap();
    assert_eq!(graph.output_value(&add, 0).as_int(), Some(7));
}

#[test]
fn removal_cascades_on_every_replica() {
    let mut hub = hub_with_peers();

    let alice = hub.client_mut(&ALICE).unwrap();
    alice.place_device("BooleanConstant", 0, 0).unwrap();
    alice.place_device("OutputLamp", 3, 0).unwrap();
    alice.place_device("OutputLamp", 3, 2).unwrap();
    alice
        .connect_pins(Point::new(0, 0), Point::new(3, 0), Vec::new())
        .unwrap();
    alice
        .connect_pins(Point::new(3, 2), Point::new(0, 0), Vec::new())
        .unwrap();
    hub.settle();
    assert_eq!(assert_converged(&hub).wire_count(), 2);

    hub.client_mut(&BOB).unwrap().remove_device(0, 0).unwrap();
    hub.settle();

    let summary = assert_converged(&hub);
    assert_eq!(summary.device_count(), 2);
    assert_eq!(summary.wire_count(), 0);

    for id in hub.client_ids() {
        let graph = hub.client(&id).unwrap().graph();
        for (_, pin) in graph.pins() {
            assert!(!pin.is_connected(None));
        }
    }
}

#[test]
fn failed_operation_is_not_relayed() {
    let mut hub = hub_with_peers();

    hub.client_mut(&ALICE)
        .unwrap()
        .place_device("IntegerConstant", 0, 0)
        .unwrap();
    hub.settle();

    // both remove the same device before hearing from each other; Bob's
    // packet reaches the authority first
    hub.client_mut(&BOB).unwrap().remove_device(0, 0).unwrap();
    hub.client_mut(&CAROL).unwrap().remove_device(0, 0).unwrap();
    let settled = hub.settle();

    let mut rejected = Vec::new();
    for mut events in settled.server {
        rejected.extend(events.read::<RejectEvent>().map(|(from, _, _)| from));
    }
    assert_eq!(rejected, vec![CAROL]);

    let mut per_peer: BTreeMap<ParticipantId, (usize, usize)> = BTreeMap::new();
    for (id, mut events) in settled.clients {
        let counts = per_peer.entry(id).or_default();
        counts.0 += events.read::<wirenet_client::OperationEvent>().count();
        counts.1 += events.read::<wirenet_client::RejectEvent>().count();
    }
    // only Bob's removal is relayed, and it applies cleanly everywhere
    for (_, counts) in per_peer {
        assert_eq!(counts, (1, 0));
    }

    assert_eq!(assert_converged(&hub).device_count(), 0);
}

#[test]
fn conflicting_edits_follow_authority_order() {
    let mut hub = hub_with_peers();

    let alice = hub.client_mut(&ALICE).unwrap();
    alice.place_device("IntegerConstant", 0, 0).unwrap();
    alice.place_device("IntegerConstant", 0, 3).unwrap();
    alice.place_device("OutputLamp", 8, 0).unwrap();
    hub.settle();

    // issued in the same window, Alice's packets reach the authority first
    let alice = hub.client_mut(&ALICE).unwrap();
    alice.change_setting(0, 0, "Value", "1").unwrap();
    alice
        .connect_pins(Point::new(0, 0), Point::new(8, 0), Vec::new())
        .unwrap();
    let bob = hub.client_mut(&BOB).unwrap();
    bob.change_setting(0, 0, "Value", "2").unwrap();
    bob.connect_pins(Point::new(0, 3), Point::new(8, 0), Vec::new())
        .unwrap();
    hub.settle();

    let summary = assert_converged(&hub);
    assert_eq!(summary.wire_count(), 1);
    assert!(summary
        .wires
        .contains(&(Point::new(0, 3), Point::new(8, 0), Vec::new())));

    for id in hub.client_ids() {
        let graph = hub.client(&id).unwrap().graph();
        let constant = graph.get_device(0, 0).unwrap();
        assert_eq!(graph.device(&constant).unwrap().setting("Value"), Some("2"));
    }
}
