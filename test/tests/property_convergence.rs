/// PROPERTY-BASED TESTS: Replica convergence
///
/// Random edits issued by random peers must leave every replica with the
/// authority's topology, whether each edit is settled before the next or
/// several are in flight at once.
use proptest::prelude::*;
use wirenet_client::{Client, ClientConfig};
use wirenet_server::ServerConfig;
use wirenet_shared::{OutputLamp, ParticipantId, Point};
use wirenet_test::{hub_with_config, GraphSummary, LocalHub};

const PEERS: [ParticipantId; 3] = [
    ParticipantId::new(1),
    ParticipantId::new(2),
    ParticipantId::new(3),
];
const SOURCE_SLOTS: [(i32, i32); 3] = [(0, 0), (0, 3), (0, 6)];
const LAMP_SLOTS: [(i32, i32); 3] = [(8, 0), (8, 3), (8, 6)];

#[derive(Clone, Debug)]
enum Intent {
    PlaceSource(usize),
    PlaceLamp(usize),
    Connect { source: usize, lamp: usize },
    DisconnectLamp(usize),
    Remove(usize),
    SetValue { source: usize, on: bool },
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        2 => (0..3usize).prop_map(Intent::PlaceSource),
        2 => (0..3usize).prop_map(Intent::PlaceLamp),
        3 => (0..3usize, 0..3usize).prop_map(|(source, lamp)| Intent::Connect { source, lamp }),
        1 => (0..3usize).prop_map(Intent::DisconnectLamp),
        1 => (0..6usize).prop_map(Intent::Remove),
        2 => (0..3usize, any::<bool>()).prop_map(|(source, on)| Intent::SetValue { source, on }),
    ]
}

fn point((x, y): (i32, i32)) -> Point {
    Point::new(x, y)
}

// Sends one intent from `client`. Failures stay local and send nothing.
fn submit(client: &mut Client, intent: Intent) {
    let _ = match intent {
        Intent::PlaceSource(slot) => {
            let (x, y) = SOURCE_SLOTS[slot];
            if client.graph().get_device(x, y).is_some() {
                return;
            }
            client.place_device("BooleanConstant", x, y)
        }
        Intent::PlaceLamp(slot) => {
            let (x, y) = LAMP_SLOTS[slot];
            if client.graph().get_device(x, y).is_some() {
                return;
            }
            client.place_device("OutputLamp", x, y)
        }
        Intent::Connect { source, lamp } => client.connect_pins(
            point(SOURCE_SLOTS[source]),
            point(LAMP_SLOTS[lamp]),
            Vec::new(),
        ),
        Intent::DisconnectLamp(slot) => {
            let (x, y) = LAMP_SLOTS[slot];
            client.disconnect_pin(x, y)
        }
        Intent::Remove(slot) => {
            let (x, y) = if slot < 3 { SOURCE_SLOTS[slot] } else { LAMP_SLOTS[slot - 3] };
            client.remove_device(x, y)
        }
        Intent::SetValue { source, on } => {
            let (x, y) = SOURCE_SLOTS[source];
            client.change_setting(x, y, "Value", if on { "1" } else { "0" })
        }
    };
}

fn hub_with_peers(config: ServerConfig) -> LocalHub {
    let mut hub = hub_with_config(config);
    for id in PEERS {
        hub.add_client(id, ClientConfig::default());
    }
    hub.settle();
    hub
}

fn check_converged(hub: &LocalHub) -> Result<(), TestCaseError> {
    let authority = hub.server().graph();
    let summary = GraphSummary::of(authority);
    for id in PEERS {
        let graph = hub.client(&id).unwrap().graph();
        prop_assert_eq!(&GraphSummary::of(graph), &summary);
        prop_assert_eq!(graph.device_count(), authority.device_count());
        prop_assert_eq!(graph.wire_count(), authority.wire_count());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_replicas_converge(
        steps in prop::collection::vec((0..3usize, intent_strategy()), 1..24)
    ) {
        let mut hub = hub_with_peers(ServerConfig::default());

        for (peer, intent) in steps {
            submit(hub.client_mut(&PEERS[peer]).unwrap(), intent);
            hub.settle();
        }

        check_converged(&hub)?;

        let graph = hub.server().graph();
        for (x, y) in LAMP_SLOTS {
            let Some(lamp) = graph.get_device(x, y) else { continue };
            let pin = graph.get_device_pin(x, y).unwrap();
            let expected = match graph.pin(&pin).unwrap().connected_pin() {
                Some(source) => graph.pin_value(&source).as_bool() == Some(true),
                None => false,
            };
            prop_assert_eq!(OutputLamp::is_lit(graph, &lamp), expected);
        }
    }

    #[test]
    fn prop_concurrent_intents_converge(
        strict in any::<bool>(),
        rounds in prop::collection::vec(
            prop::collection::vec((0..3usize, intent_strategy()), 1..8),
            1..8,
        )
    ) {
        let mut hub = hub_with_peers(ServerConfig {
            reject_blocked_placement: strict,
            ..ServerConfig::default()
        });

        // every intent of a round is in flight before anyone hears back
        for round in rounds {
            for (peer, intent) in round {
                submit(hub.client_mut(&PEERS[peer]).unwrap(), intent);
            }
            hub.settle();
            check_converged(&hub)?;
        }
    }
}
