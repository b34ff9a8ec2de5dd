//! Every line the world says to a player.
//!
//! Kept in one place so the wording stays consistent and tests can
//! compare against the same functions the engine uses.

pub const ASK_NAME: &str = "Qual è il tuo nome?";
pub const SAVE_FAILED: &str = "Impossibile salvare il mondo, modifica annullata";
pub const DESCRIPTION_UPDATED: &str = "Descrizione aggiornata";
pub const EMPTY_DESCRIPTION: &str = "La descrizione non può essere vuota";
pub const MISSING_EXIT_NAME: &str = "Specifica il nome dell'uscita, ad es. 'crea Cantina'";
pub const MISSING_DESTINATION: &str = "Specifica dove andare, ad es. 'vai Esterno'";
pub const NO_ZONE: &str = "Nessuna zona definita";
pub const STARTING_ROOM_PROTECTED: &str = "La stanza iniziale non può essere cancellata";
pub const ISOLATED_ROOM: &str = "Questa stanza non ha uscite: non saprei dove portarti";
pub const INTERNAL_ERROR: &str = "Qualcosa è andato storto, riprova";
pub const SELF_EXIT: &str = "Una stanza non può avere un'uscita verso se stessa";

/// The command list sent by `aiuto`.
pub fn help() -> Vec<&'static str> {
    vec![
        "Comandi:",
        "  di <messaggio>     - di' qualcosa ad alta voce, ad es. 'di Ciao'",
        "  osserva            - esamina il circondario, ad es. 'osserva'",
        "  vai <uscita>       - muoviti verso l'uscita indicata, ad es. 'vai Esterno'",
        "  crea <stanza>      - crea un'uscita verso una stanza (nuova o esistente)",
        "  descrivi <testo>   - cambia la descrizione della stanza in cui ti trovi",
        "  zona [nome]        - mostra o imposta la zona della stanza",
        "  cancella           - cancella la stanza se ha una sola uscita",
        "Valgono anche i comandi inglesi: help, say, look, go, create, describe, zone, delete",
    ]
}

pub fn welcome(name: &str) -> String {
    format!(
        "Benvenuto nel gioco, {name}. Scrivi 'aiuto' per una lista dei comandi. Buon divertimento!"
    )
}

pub fn welcome_back(name: &str, room: &str) -> String {
    format!("Bentornato, {name}! Riprendi da '{room}'. Scrivi 'aiuto' per una lista dei comandi.")
}

pub fn entered_game(name: &str) -> String {
    format!("{name} è entrato nel gioco")
}

pub fn left_game(name: &str) -> String {
    format!("{name} ha lasciato il gioco")
}

pub fn says(name: &str, message: &str) -> String {
    format!("{name} says: {message}")
}

pub fn players_here(names: &[&str]) -> String {
    format!("Giocatori qui: {}", names.join(", "))
}

pub fn exits(names: &[&str]) -> String {
    format!("Le uscite sono: {}", names.join(", "))
}

pub fn creature_here(kind: &str) -> String {
    format!("C'è un {kind} qui!")
}

pub fn creature_appeared(kind: &str) -> String {
    format!("Un {kind} è apparso!")
}

pub fn departed(name: &str, destination: &str) -> String {
    format!("{name} è andato via verso: '{destination}'")
}

pub fn arrived_from(name: &str, origin: &str) -> String {
    format!("{name} è arrivato da: '{origin}'")
}

pub fn you_arrived(room: &str) -> String {
    format!("Sei arrivato in '{room}'")
}

pub fn unknown_exit(exit: &str) -> String {
    format!("Uscita sconosciuta: '{exit}'")
}

pub fn unknown_command(verb: &str) -> String {
    format!("Comando sconosciuto: '{verb}'")
}

pub fn exit_created(exit: &str) -> String {
    format!("Hai creato l'uscita verso '{exit}'")
}

pub fn room_created(exit: &str) -> String {
    format!("La stanza '{exit}' non esisteva: l'hai appena costruita")
}

pub fn exit_exists(exit: &str) -> String {
    format!("L'uscita '{exit}' esiste già")
}

pub fn current_zone(zone: &str) -> String {
    format!("La zona di questa stanza è: '{zone}'")
}

pub fn zone_set(zone: &str) -> String {
    format!("Zona impostata a: '{zone}'")
}

pub fn ambiguous_deletion(exits: usize) -> String {
    format!("Non puoi cancellare una stanza con {exits} uscite: parti dalle stanze con una sola uscita")
}

pub fn room_deleted(room: &str, fallback: &str) -> String {
    format!("La stanza '{room}' è stata cancellata. Ti ritrovi in '{fallback}'")
}

/// Placeholder description for rooms materialized by `crea`.
pub fn placeholder_description(name: &str) -> String {
    format!("Ti trovi in '{name}'. Nessuno ha ancora descritto questo posto.")
}
