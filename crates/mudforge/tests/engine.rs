//! Integration tests for the engine: whole ticks driven through an
//! in-memory transport and in-memory snapshots.

use mudforge::prelude::*;
use mudforge::protocol::text;

// =========================================================================
// Helpers
// =========================================================================

struct Harness {
    net: MemoryTransport,
    world_storage: MemoryStorage,
    players_storage: MemoryStorage,
    engine: Engine<MemoryTransport>,
}

impl Harness {
    fn new() -> Self {
        Self::with_spawner(SpawnerConfig::default())
    }

    fn with_spawner(config: SpawnerConfig) -> Self {
        let world_storage = MemoryStorage::new();
        let players_storage = MemoryStorage::new();
        Self::build(world_storage, players_storage, config)
    }

    fn build(
        world_storage: MemoryStorage,
        players_storage: MemoryStorage,
        config: SpawnerConfig,
    ) -> Self {
        let net = MemoryTransport::new();
        let world = WorldStore::open(world_storage.clone()).unwrap();
        let records = PlayerRegistry::open(players_storage.clone()).unwrap();
        let engine = Engine::new(
            net.clone(),
            world,
            SessionRegistry::new(Some(records)),
            CreatureSpawner::new(config),
        );
        Self {
            net,
            world_storage,
            players_storage,
            engine,
        }
    }

    /// Connects and names a player, then discards everything sent so far.
    fn join(&mut self, name: &str) -> ConnectionId {
        let id = self.net.connect();
        self.net.push_line(id, name);
        self.engine.tick();
        id
    }

    fn say(&mut self, id: ConnectionId, line: &str) {
        self.net.push_line(id, line);
        self.engine.tick();
    }

    fn sent(&self, id: ConnectionId) -> Vec<String> {
        self.net.take_sent(id)
    }

    fn room_of(&self, id: ConnectionId) -> Option<String> {
        self.engine.sessions().get(id).and_then(|p| p.room.clone())
    }
}

const TAVERNA: &str = "Sei in una confortevole taverna riscaldata da un caminetto";

// =========================================================================
// Connection lifecycle
// =========================================================================

#[test]
fn test_new_connection_is_asked_for_name() {
    let mut h = Harness::new();
    let id = h.net.connect();
    h.engine.tick();

    assert_eq!(h.sent(id), vec![text::ASK_NAME]);
    assert!(!h.engine.sessions().get(id).unwrap().is_active());
}

#[test]
fn test_end_to_end_alice_and_bob() {
    let mut h = Harness::new();

    let alice = h.join("Alice");
    assert_eq!(
        h.sent(alice),
        vec![
            text::ASK_NAME.to_string(),
            text::entered_game("Alice"),
            text::welcome("Alice"),
            TAVERNA.to_string(),
        ]
    );

    let bob = h.join("Bob");
    assert_eq!(h.sent(alice), vec![text::entered_game("Bob")]);
    h.sent(bob);

    h.say(alice, "say hello");
    assert_eq!(h.sent(bob), vec!["Alice says: hello"]);
    assert_eq!(h.sent(alice), vec!["Alice says: hello"]);

    h.say(alice, "go Esterno");
    assert_eq!(h.sent(bob), vec!["Alice è andato via verso: 'Esterno'"]);
    assert_eq!(h.sent(alice), vec!["Sei arrivato in 'Esterno'"]);
    assert_eq!(h.room_of(alice).as_deref(), Some("Esterno"));
    assert_eq!(h.room_of(bob).as_deref(), Some(START_ROOM));
}

#[test]
fn test_arrival_is_announced_to_new_room() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    let bob = h.join("Bob");
    h.say(bob, "vai Esterno");
    h.sent(alice);
    h.sent(bob);

    h.say(alice, "vai Esterno");

    assert_eq!(h.sent(bob), vec![text::arrived_from("Alice", START_ROOM)]);
}

#[test]
fn test_disconnect_is_broadcast_by_name() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    let bob = h.join("Bob");
    let lurker = h.net.connect();
    h.engine.tick();
    h.sent(alice);

    h.net.disconnect(bob);
    h.net.disconnect(lurker);
    h.engine.tick();

    assert_eq!(h.sent(alice), vec![text::left_game("Bob")]);
    assert_eq!(h.engine.sessions().len(), 1);
}

#[test]
fn test_blank_lines_do_not_name_a_player() {
    let mut h = Harness::new();
    let id = h.net.connect();
    h.net.push_line(id, "   ");
    h.engine.tick();

    assert!(!h.engine.sessions().get(id).unwrap().is_active());
}

#[test]
fn test_two_connections_may_share_a_name() {
    let mut h = Harness::new();
    let first = h.join("Alice");
    let second = h.join("Alice");

    assert!(h.engine.sessions().get(first).unwrap().is_active());
    assert!(h.engine.sessions().get(second).unwrap().is_active());
}

// =========================================================================
// look / go
// =========================================================================

#[test]
fn test_look_lists_players_in_same_room_only() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    let bob = h.join("Bob");
    let carla = h.join("Carla");
    h.say(carla, "go Esterno");
    h.sent(alice);

    h.say(alice, "look");
    assert_eq!(
        h.sent(alice),
        vec![
            TAVERNA.to_string(),
            text::players_here(&["Alice", "Bob"]),
            text::exits(&["Esterno"]),
        ]
    );

    h.say(carla, "osserva");
    let carla_view = h.sent(carla);
    assert!(carla_view.contains(&text::players_here(&["Carla"])));
    h.sent(bob);
}

#[test]
fn test_unknown_exit_changes_nothing() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    let bob = h.join("Bob");
    h.sent(alice);
    h.sent(bob);

    h.say(alice, "go Cantina");

    assert_eq!(h.sent(alice), vec![text::unknown_exit("Cantina")]);
    assert!(h.sent(bob).is_empty());
    assert_eq!(h.room_of(alice).as_deref(), Some(START_ROOM));
    assert_eq!(h.room_of(bob).as_deref(), Some(START_ROOM));
}

// =========================================================================
// Building
// =========================================================================

#[test]
fn test_create_then_walk_into_new_room() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    h.say(alice, "crea Cantina");
    h.say(alice, "vai Cantina");
    h.say(alice, "descrivi Botti di vino ovunque");
    h.sent(alice);

    h.say(alice, "guarda");

    assert_eq!(
        h.sent(alice),
        vec![
            "Botti di vino ovunque".to_string(),
            text::players_here(&["Alice"]),
            text::exits(&[START_ROOM]),
        ]
    );
}

#[test]
fn test_delete_relocates_every_occupant() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    let bob = h.join("Bob");
    let carla = h.join("Carla");
    h.say(alice, "crea Cantina");
    h.say(alice, "vai Cantina");
    h.say(bob, "vai Cantina");
    for id in [alice, bob, carla] {
        h.sent(id);
    }

    h.say(alice, "cancella");

    let notice = text::room_deleted("Cantina", START_ROOM);
    assert_eq!(h.sent(alice), vec![notice.clone()]);
    assert_eq!(h.sent(bob), vec![notice]);
    assert_eq!(
        h.sent(carla),
        vec![
            text::arrived_from("Alice", "Cantina"),
            text::arrived_from("Bob", "Cantina"),
        ]
    );
    assert_eq!(h.room_of(bob).as_deref(), Some(START_ROOM));
    assert!(!h.engine.world().contains("Cantina"));
    assert!(!h.engine.world().get_room(START_ROOM).unwrap().has_exit("Cantina"));
}

#[test]
fn test_delete_hub_is_refused() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    h.say(alice, "vai Esterno");
    h.say(alice, "crea Bosco");
    h.sent(alice);

    h.say(alice, "delete");

    assert_eq!(h.sent(alice), vec![text::ambiguous_deletion(2)]);
    assert!(h.engine.world().contains("Esterno"));
    assert_eq!(h.room_of(alice).as_deref(), Some("Esterno"));
}

#[test]
fn test_failed_save_rolls_back_create() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    h.sent(alice);
    h.world_storage.fail_writes(true);

    h.say(alice, "create Cantina");

    assert_eq!(h.sent(alice), vec![text::SAVE_FAILED]);
    assert!(!h.engine.world().contains("Cantina"));
    assert!(!h.engine.world().get_room(START_ROOM).unwrap().has_exit("Cantina"));
}

// =========================================================================
// Persistence across restarts
// =========================================================================

#[test]
fn test_returning_player_resumes_in_last_room() {
    let mut h = Harness::new();
    let alice = h.join("Alice");
    h.say(alice, "vai Esterno");
    h.net.disconnect(alice);
    h.engine.tick();

    let mut restarted = Harness::build(
        h.world_storage.clone(),
        h.players_storage.clone(),
        SpawnerConfig::default(),
    );
    let again = restarted.join("Alice");

    let greeting = restarted.sent(again);
    assert!(greeting.contains(&text::welcome_back("Alice", "Esterno")));
    assert_eq!(restarted.room_of(again).as_deref(), Some("Esterno"));
}

// =========================================================================
// Creatures
// =========================================================================

#[test]
fn test_spawn_is_announced_and_visible_in_look() {
    let mut h = Harness::with_spawner(SpawnerConfig { threshold_ticks: 3 });
    let alice = h.join("Alice"); // tick 1
    h.say(alice, "vai Esterno"); // tick 2
    h.engine.tick(); // tick 3
    h.sent(alice);

    h.engine.tick(); // tick 4: counter passes the threshold
    assert_eq!(h.sent(alice), vec![text::creature_appeared("topo")]);

    h.say(alice, "look");
    assert!(h.sent(alice).contains(&text::creature_here("topo")));
}
