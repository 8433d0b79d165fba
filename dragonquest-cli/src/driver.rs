//! Session driver: menu, choice, dispatch, narration, repeat.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use dragonquest_game::{Command, Ending, MenuAction, Pick, Session, Shop, ShopOutcome, TurnOutcome};

use crate::input::Prompter;
use crate::render::Narrator;

/// Play `session` to its end. Running out of input counts as quitting.
///
/// A refused purchase at the blacksmith keeps the player at the counter
/// until something is bought or they walk away.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn play<R: BufRead, W: Write>(
    session: &mut Session,
    prompter: &mut Prompter<R, W>,
    narrator: &Narrator,
) -> Result<Ending> {
    loop {
        if let Some(ending) = session.ending() {
            return Ok(ending);
        }
        narrator
            .location(prompter.output(), session.location())
            .context("failed to draw the menu")?;

        let command = next_command(session, prompter, narrator)?;
        let mut command = command.unwrap_or_else(out_of_input);
        loop {
            let outcome = session.perform(command);
            narrate(session, prompter, narrator)?;
            if !refused_at_counter(command.action, &outcome) {
                break;
            }
            command = match counter_pick(session, prompter)? {
                Some(pick) => Command::new(command.action).with_pick(pick),
                None => out_of_input(),
            };
        }
    }
}

fn out_of_input() -> Command {
    log::debug!("input exhausted, quitting");
    Command::new(MenuAction::Quit)
}

fn refused_at_counter(action: MenuAction, outcome: &TurnOutcome) -> bool {
    action == MenuAction::Buy(Shop::Blacksmith)
        && matches!(outcome, TurnOutcome::Shop(ShopOutcome::Refused(_)))
}

fn narrate<R: BufRead, W: Write>(
    session: &Session,
    prompter: &mut Prompter<R, W>,
    narrator: &Narrator,
) -> Result<()> {
    let snapshot = session.snapshot();
    let out = prompter.output();
    for event in &snapshot.events {
        narrator
            .event(out, event, &snapshot)
            .context("failed to narrate the turn")?;
    }
    out.flush().context("failed to flush output")
}

fn counter_pick<R: BufRead, W: Write>(
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<Pick>> {
    let stocked = session.stock(Shop::Blacksmith).len();
    prompter
        .shop_pick(stocked)
        .context("failed to read a purchase")
}

/// Read a menu choice plus any follow-up pick. `None` once input runs out.
fn next_command<R: BufRead, W: Write>(
    session: &Session,
    prompter: &mut Prompter<R, W>,
    narrator: &Narrator,
) -> Result<Option<Command>> {
    let Some(choice) = prompter
        .choice(session.menu().len())
        .context("failed to read a choice")?
    else {
        return Ok(None);
    };
    let location = session.location();
    let action = session
        .action_for(choice)
        .with_context(|| format!("choice {choice} is not on the {location} menu"))?;

    let pick = match action {
        MenuAction::UseItem if !session.player().inventory().is_empty() => {
            let items = session.player().inventory().items();
            narrator.inventory_choices(prompter.output(), items)?;
            prompter.item_pick().context("failed to read an item pick")?
        }
        MenuAction::Buy(Shop::Blacksmith) => {
            narrator.counter(prompter.output(), &session.stock(Shop::Blacksmith))?;
            counter_pick(session, prompter)?
        }
        _ => Some(Pick::Cancel),
    };
    Ok(pick.map(|pick| Command::new(action).with_pick(pick)))
}
