//! Command dispatch: turns one player line into world changes and replies.
//!
//! The first line from a connection always names the player, whatever it
//! says. Every later line is parsed into a [`Verb`] and handled against
//! the world and the session registry. Replies and broadcasts are queued
//! in an [`Outbox`]; nothing is written to the transport from here.

use mudforge_protocol::{Command, Outbox, Verb, text};
use mudforge_session::{SessionError, SessionRegistry};
use mudforge_transport::{ConnectionId, InboundCommand};
use mudforge_world::{ExitOutcome, WorldError, WorldStore, ZoneReply};

/// Borrows the game state for one tick's worth of commands.
pub struct Dispatcher<'a> {
    world: &'a mut WorldStore,
    sessions: &'a mut SessionRegistry,
    outbox: &'a mut Outbox,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        world: &'a mut WorldStore,
        sessions: &'a mut SessionRegistry,
        outbox: &'a mut Outbox,
    ) -> Self {
        Self {
            world,
            sessions,
            outbox,
        }
    }

    /// Handles one line. Lines from connections the registry doesn't know
    /// (already gone, or never announced) are dropped.
    pub fn handle(&mut self, inbound: InboundCommand) {
        let id = inbound.id;
        let Some(player) = self.sessions.get(id) else {
            tracing::debug!(%id, "command from unknown connection, ignoring");
            return;
        };

        let Some((name, room)) = player.name.clone().zip(player.room.clone()) else {
            self.join(id, &inbound.verb);
            return;
        };

        let command = Command::new(&inbound.verb, &inbound.args);
        tracing::debug!(%id, %name, %room, verb = %command.verb, arg = %command.arg, "command");

        match command.verb {
            Verb::Help => {
                for line in text::help() {
                    self.outbox.send(id, line);
                }
            }
            Verb::Say => self.say(&name, &room, &command.arg),
            Verb::Look => self.look(id, &room),
            Verb::Go => self.go(id, &name, &room, &command.arg),
            Verb::Create => self.create(id, &room, &command.arg),
            Verb::Describe => self.describe(id, &room, &command.arg),
            Verb::Zone => self.zone(id, &room, &command.arg),
            Verb::Delete => self.delete(id, &room),
            Verb::Unknown(word) => self.outbox.send(id, text::unknown_command(&word)),
        }
    }

    // -- Naming -----------------------------------------------------------

    fn join(&mut self, id: ConnectionId, proposed: &str) {
        let world = &*self.world;
        let outcome = match self
            .sessions
            .bind_name(id, proposed, |room| world.contains(room))
        {
            Ok(outcome) => outcome,
            Err(SessionError::EmptyName) => {
                self.outbox.send(id, text::ASK_NAME);
                return;
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to bind name");
                self.outbox.send(id, text::INTERNAL_ERROR);
                return;
            }
        };

        self.sessions
            .broadcast(self.outbox, |_| true, &text::entered_game(&outcome.name));
        let greeting = if outcome.resumed {
            text::welcome_back(&outcome.name, &outcome.room)
        } else {
            text::welcome(&outcome.name)
        };
        self.outbox.send(id, greeting);
        match self.world.get_room(&outcome.room) {
            Ok(room) => self.outbox.send(id, room.description.clone()),
            Err(e) => self.report(id, e),
        }
    }

    // -- Verbs ------------------------------------------------------------

    fn say(&mut self, name: &str, room: &str, message: &str) {
        self.sessions
            .broadcast_room(self.outbox, room, None, &text::says(name, message));
    }

    fn look(&mut self, id: ConnectionId, room: &str) {
        let current = match self.world.get_room(room) {
            Ok(current) => current,
            Err(e) => return self.report(id, e),
        };
        let here: Vec<&str> = self
            .sessions
            .players_in(room)
            .filter_map(|p| p.name.as_deref())
            .collect();
        let exits: Vec<&str> = current.exits.iter().map(String::as_str).collect();

        self.outbox.send(id, current.description.clone());
        self.outbox.send(id, text::players_here(&here));
        if let Some(creature) = current.creature {
            self.outbox.send(id, text::creature_here(creature.kind.name()));
        }
        self.outbox.send(id, text::exits(&exits));
    }

    fn go(&mut self, id: ConnectionId, name: &str, from: &str, arg: &str) {
        if arg.is_empty() {
            self.outbox.send(id, text::MISSING_DESTINATION);
            return;
        }
        let to = match self.world.resolve_exit(from, arg) {
            Ok(to) => to,
            Err(e) => return self.report(id, e),
        };
        if !self.world.contains(&to) {
            return self.report(id, WorldError::UnknownRoom(to));
        }

        self.sessions
            .broadcast_room(self.outbox, from, Some(id), &text::departed(name, &to));
        if let Err(e) = self.sessions.move_to(id, &to) {
            tracing::error!(%id, error = %e, "failed to move player");
            self.outbox.send(id, text::INTERNAL_ERROR);
            return;
        }
        self.sessions
            .broadcast_room(self.outbox, &to, Some(id), &text::arrived_from(name, from));
        self.outbox.send(id, text::you_arrived(&to));
    }

    fn create(&mut self, id: ConnectionId, room: &str, exit: &str) {
        match self.world.create_exit(room, exit) {
            Ok(ExitOutcome::Linked) => self.outbox.send(id, text::exit_created(exit)),
            Ok(ExitOutcome::Created) => {
                self.outbox.send(id, text::exit_created(exit));
                self.outbox.send(id, text::room_created(exit));
            }
            Err(e) => self.report(id, e),
        }
    }

    fn describe(&mut self, id: ConnectionId, room: &str, description: &str) {
        match self.world.set_description(room, description) {
            Ok(()) => self.outbox.send(id, text::DESCRIPTION_UPDATED),
            Err(e) => self.report(id, e),
        }
    }

    fn zone(&mut self, id: ConnectionId, room: &str, arg: &str) {
        match self.world.zone(room, arg) {
            Ok(ZoneReply::Current(Some(zone))) => self.outbox.send(id, text::current_zone(&zone)),
            Ok(ZoneReply::Current(None)) => self.outbox.send(id, text::NO_ZONE),
            Ok(ZoneReply::Set(zone)) => self.outbox.send(id, text::zone_set(&zone)),
            Err(e) => self.report(id, e),
        }
    }

    /// Deletes the current room and walks everyone in it to the fallback.
    fn delete(&mut self, id: ConnectionId, room: &str) {
        let fallback = match self.world.delete_room(room) {
            Ok(fallback) => fallback,
            Err(e) => return self.report(id, e),
        };

        // Who was already there, before the evicted players arrive.
        let waiting: Vec<ConnectionId> = self.sessions.players_in(&fallback).map(|p| p.id).collect();
        let moved = self.sessions.relocate_room(room, &fallback);

        let notice = text::room_deleted(room, &fallback);
        self.outbox.send_all(moved.iter().copied(), &notice);
        for mover in &moved {
            let Some(name) = self.sessions.get(*mover).and_then(|p| p.name.clone()) else {
                continue;
            };
            self.outbox
                .send_all(waiting.iter().copied(), &text::arrived_from(&name, room));
        }
    }

    // -- Errors -----------------------------------------------------------

    /// Turns a world error into a reply for `id`.
    fn report(&mut self, id: ConnectionId, error: WorldError) {
        let line = match error {
            WorldError::UnknownExit(exit) => text::unknown_exit(&exit),
            WorldError::ExitAlreadyExists { exit, .. } => text::exit_exists(&exit),
            WorldError::EmptyExitName => text::MISSING_EXIT_NAME.to_string(),
            WorldError::SelfExit(_) => text::SELF_EXIT.to_string(),
            WorldError::EmptyDescription => text::EMPTY_DESCRIPTION.to_string(),
            WorldError::AmbiguousDeletion { exits, .. } => text::ambiguous_deletion(exits),
            WorldError::IsolatedRoom(_) => text::ISOLATED_ROOM.to_string(),
            WorldError::StartingRoomProtected(_) => text::STARTING_ROOM_PROTECTED.to_string(),
            WorldError::Persistence(e) => {
                tracing::error!(%id, error = %e, "world change rolled back");
                text::SAVE_FAILED.to_string()
            }
            WorldError::UnknownRoom(room) => {
                tracing::error!(%id, %room, "player refers to a room that does not exist");
                text::INTERNAL_ERROR.to_string()
            }
        };
        self.outbox.send(id, line);
    }
}
