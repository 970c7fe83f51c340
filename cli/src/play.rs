use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use twostars_core::{Coord, Coord2, GameError, GameStatus, ToggleOutcome};
use twostars_session::{Session, Storage};
use web_time::Instant;

use crate::render::BoardView;

const HELP: &str = "\
  <row> <col>  toggle a star (1-based)
  reset        clear the board
  save         save now
  load         reload the saved game
  help         show this text
  quit         save and leave";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayCommand {
    Toggle(Coord2),
    Reset,
    Save,
    Load,
    Show,
    Help,
    Quit,
}

/// Parses one line of the interactive loop. Coordinates are 1-based.
pub fn parse_command(line: &str) -> Result<PlayCommand> {
    let words: Vec<&str> = line.split_whitespace().collect();
    Ok(match words.as_slice() {
        [] => PlayCommand::Show,
        ["reset"] => PlayCommand::Reset,
        ["save"] => PlayCommand::Save,
        ["load"] => PlayCommand::Load,
        ["help" | "?"] => PlayCommand::Help,
        ["quit" | "q" | "exit"] => PlayCommand::Quit,
        [row, col] => PlayCommand::Toggle((parse_index(row)?, parse_index(col)?)),
        _ => bail!("unknown command {line:?}, try `help`"),
    })
}

fn parse_index(word: &str) -> Result<Coord> {
    match word.parse::<Coord>() {
        Ok(index) if index > 0 => Ok(index - 1),
        _ => bail!("{word:?} is not a row or column number"),
    }
}

/// One-line reply to a toggle; `game_over` tells a refused move on a finished
/// board apart from a shaded cell.
pub fn describe(outcome: ToggleOutcome, game_over: bool) -> &'static str {
    match outcome {
        ToggleOutcome::NoChange if game_over => "The game is over. Type `reset` to play again.",
        ToggleOutcome::NoChange => "That cell is shaded.",
        ToggleOutcome::Placed => "Star placed.",
        ToggleOutcome::Removed => "Star removed.",
        ToggleOutcome::Won => "Solved! Every row, column and region holds two stars.",
        ToggleOutcome::Lost => "No open cell is left. Reset to try again.",
    }
}

/// Writes the board, its status and any storage diagnostic.
pub fn print_session<S: Storage>(session: &Session<S>, mut output: impl Write) -> Result<()> {
    let game = session.game();
    write!(output, "{}", BoardView::new(game))?;
    writeln!(
        output,
        "{}: {} ({} stars)",
        session.board_id(),
        game.status(),
        game.star_count()
    )?;
    if let Some(diagnostic) = session.diagnostic() {
        writeln!(output, "warning: {diagnostic}")?;
    }
    Ok(())
}

/// Interactive loop over `input` until `quit` or end of input. Pending
/// changes are written before returning.
pub fn run<S: Storage>(
    session: &mut Session<S>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    print_session(session, &mut output)?;
    writeln!(output, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        session.poll(Instant::now());

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        log::trace!("command: {command:?}");

        match command {
            PlayCommand::Toggle(coords) => match session.toggle(coords) {
                Ok(outcome) => {
                    print_session(session, &mut output)?;
                    let game_over = session.game().is_finished();
                    writeln!(output, "{}", describe(outcome, game_over))?;
                }
                Err(GameError::InvalidCoords) => {
                    let (rows, cols) = session.game().size();
                    writeln!(output, "Pick a row in 1..={rows} and a column in 1..={cols}.")?;
                }
                Err(err) => writeln!(output, "{err}")?,
            },
            PlayCommand::Reset => {
                session.reset();
                print_session(session, &mut output)?;
            }
            PlayCommand::Save => {
                if session.save() {
                    writeln!(output, "Saved.")?;
                } else {
                    print_session(session, &mut output)?;
                }
            }
            PlayCommand::Load => {
                if session.load() {
                    print_session(session, &mut output)?;
                } else if let Some(diagnostic) = session.diagnostic() {
                    writeln!(output, "warning: {diagnostic}")?;
                } else {
                    writeln!(output, "Nothing saved for this board.")?;
                }
            }
            PlayCommand::Show => print_session(session, &mut output)?,
            PlayCommand::Help => writeln!(output, "{HELP}")?,
            PlayCommand::Quit => break,
        }
    }

    session.flush();
    if session.status() == GameStatus::Won {
        log::info!("{} solved", session.board_id());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use twostars_core::BoardLayout;
    use twostars_session::{MemoryStorage, SessionConfig};

    use super::*;

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command("3 10").unwrap(), PlayCommand::Toggle((2, 9)));
        assert_eq!(parse_command("  quit ").unwrap(), PlayCommand::Quit);
        assert_eq!(parse_command("").unwrap(), PlayCommand::Show);
        assert!(parse_command("0 1").is_err());
        assert!(parse_command("1").is_err());
        assert!(parse_command("jump").is_err());
    }

    #[test]
    fn scripted_game_is_saved_on_exit() {
        let storage = MemoryStorage::new();
        let layout = BoardLayout::from_strs(&["AAAA", "AAAA", "BBBB", "BBBB"]).unwrap();
        let mut session = Session::open("halves", layout, &storage, &SessionConfig::default());
        let input = Cursor::new("1 1\n1 2\n9 9\nbogus\n1 3\nquit\n1 4\n");
        let mut output = Vec::new();

        run(&mut session, input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Star placed."));
        assert!(output.contains("That cell is shaded."));
        assert!(output.contains("Pick a row in 1..=4 and a column in 1..=4."));
        assert!(output.contains("unknown command"));
        assert!(!session.game().has_star_at((0, 3)));

        let saved = session.store().load("halves", None).unwrap();
        assert!(saved.stars[[0, 0]] && saved.stars[[0, 2]]);
    }
}
