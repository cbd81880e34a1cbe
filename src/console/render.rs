//! Text rendering of duel state.
//!
//! Every function writes to any `Write` and reports only I/O failures. Nothing
//! here decides anything; it formats what the snapshot holds.

use std::io::{self, Write};

use crate::cards::CardInstance;
use crate::command::{Rejection, HELP_LINE};
use crate::core::config::exp_to_next_level;
use crate::core::player::Player;
use crate::core::state::{DuelSnapshot, TurnData};
use crate::rules::DuelResult;
use crate::zones::Field;

const RULE: &str = "-=-=-=-=-=-=-=-=-=-=-";
const ANSI_CLEAR: &str = "\x1B[2J\x1B[1;1H";

/// Closing line, shown once the session is over.
pub const GAME_OVER: &str = "Game Over - Press Enter to Terminate";

/// Turn owner and remaining action points.
pub fn turn(out: &mut impl Write, turn: &TurnData, owner: &Player) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Turn Owner: {} | Remaining Actions: [{}]",
        owner.user_id, turn.action_points
    )?;
    writeln!(out, "{RULE}")
}

/// One player's stats block.
pub fn player_stats(out: &mut impl Write, player: &Player) -> io::Result<()> {
    writeln!(out, "_____________________")?;
    writeln!(out, "`````````````````````")?;
    writeln!(out, "{}\t\t\t{}", player.user_id, player.entity_id())?;
    writeln!(out, "Hero: {}", player.hero)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "HP: {} | {}", player.life, player.max_life)?;
    match exp_to_next_level(player.level) {
        Some(next) => writeln!(out, "Level: {} ... Exp: {} | {}", player.level, player.exp, next)?,
        None => writeln!(out, "Level: {} ... Exp: ---", player.level)?,
    }
    writeln!(out, "-- Mana --")?;
    for resource in player.resources.iter() {
        writeln!(out, "{}: {}", resource.name, resource.count)?;
    }
    if !player.values.is_empty() {
        writeln!(out, "{RULE}")?;
        let mut values: Vec<_> = player.values.iter().collect();
        values.sort();
        for (key, value) in values {
            writeln!(out, "{key}: {value}")?;
        }
    }
    writeln!(out, "_____________________")
}

/// The slot grid, then one detail line per creature.
///
/// Occupied slots are bracketed. The grid breaks between the two rows.
pub fn field(out: &mut impl Write, field: &Field) -> io::Result<()> {
    let width = field.row_width();
    write!(out, "{RULE}\n|")?;
    for slot in field.iter() {
        if slot.is_occupied() {
            write!(out, "[{}]|", slot.index)?;
        } else {
            write!(out, " {} |", slot.index)?;
        }
        if width > 0 && slot.index + 1 == width {
            write!(out, "\n---------------------\n|")?;
        }
    }
    writeln!(out, "\n{RULE}")?;

    let mut any = false;
    for (index, card) in field.occupied() {
        any = true;
        writeln!(
            out,
            "{index}: {}, Atk: {}, Def: {}, Life: {}/{}\t{}",
            card.card_id(),
            card.attack,
            card.armor,
            card.life,
            card.max_life,
            card.entity_id
        )?;
        let values = card.sorted_values();
        if !values.is_empty() {
            writeln!(out, "-- Values --")?;
            for (key, value) in values {
                writeln!(out, "{key}: {value}")?;
            }
            writeln!(out, "------------")?;
        }
    }
    if any {
        writeln!(out, "{RULE}")?;
    }
    Ok(())
}

/// A named, numbered card listing (hand or grave).
pub fn collection<'a>(
    out: &mut impl Write,
    name: &str,
    cards: impl IntoIterator<Item = &'a CardInstance>,
) -> io::Result<()> {
    writeln!(out, "---{name}-------")?;
    for (position, card) in cards.into_iter().enumerate() {
        writeln!(out, "{position}: {}", card.card_id())?;
        writeln!(
            out,
            "\tAtk: {}, Def: {}, Life: {}, Cost: {}\t{}",
            card.imprint.attack, card.imprint.armor, card.imprint.life, card.cost, card.entity_id
        )?;
        for (key, value) in card.sorted_values() {
            writeln!(out, "{key}: {value}")?;
        }
    }
    writeln!(out, "----------{}", "-".repeat(name.len()))
}

/// The verb list.
pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{HELP_LINE}")
}

/// A rejected line's message, followed by the verb list where it helps.
pub fn rejection(out: &mut impl Write, rejection: &Rejection) -> io::Result<()> {
    writeln!(out, "{rejection}")?;
    if rejection.shows_help() {
        help(out)?;
    }
    Ok(())
}

/// A full frame: turn banner, both players, the field.
pub fn frame(out: &mut impl Write, snapshot: &DuelSnapshot) -> io::Result<()> {
    let owner = snapshot.turn_owner();
    let opponent = snapshot.player(snapshot.opposing_player(owner.id));

    writeln!(out)?;
    turn(out, &snapshot.turn, owner)?;
    player_stats(out, owner)?;
    player_stats(out, opponent)?;
    writeln!(out)?;
    field(out, &snapshot.field)?;
    writeln!(out)?;
    writeln!(out)
}

/// The closing message, with the outcome when there is one.
pub fn closing(out: &mut impl Write, snapshot: &DuelSnapshot) -> io::Result<()> {
    match &snapshot.result {
        Some(DuelResult::Winner(id)) => writeln!(out, "Winner: {}", snapshot.player(*id).user_id)?,
        Some(DuelResult::Draw) => writeln!(out, "The duel is a draw.")?,
        None => {}
    }
    writeln!(out, "{GAME_OVER}")
}

/// Clear the terminal.
pub fn clear(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{ANSI_CLEAR}")
}
