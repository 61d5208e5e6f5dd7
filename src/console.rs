//! Terminal rendering and keyboard input.

use std::io::Write;
use timed_tictactoe::{Availability, Board, BoardView, Coord, MoveRequest};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Prints the board to stdout.
pub struct ConsoleView;

impl BoardView for ConsoleView {
    fn draw_board(&mut self, board: &Board) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "\n{}\n", board.display());
        let _ = out.flush();
    }
}

/// Parses `"row col"` or `"row,col"` into a coordinate.
pub fn parse_coord(line: &str) -> Option<Coord> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coord::new(row, col))
}

fn prompt(availability: &Availability) {
    let open: Vec<String> = availability
        .available_coords()
        .iter()
        .map(|c| format!("{} {}", c.row, c.col))
        .collect();
    print!("Your move [{}]: ", open.join(" | "));
    let _ = std::io::stdout().flush();
}

/// Answers move requests from stdin until the requests end, stdin closes
/// or `cancel` fires. Only open squares are ever sent back.
#[instrument(skip_all)]
pub async fn serve_input(mut requests: mpsc::Receiver<MoveRequest>, cancel: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let request = tokio::select! {
            _ = cancel.cancelled() => break,
            request = requests.recv() => match request {
                Some(request) => request,
                None => break,
            },
        };

        let coord = loop {
            prompt(request.availability());
            let line = tokio::select! {
                _ = cancel.cancelled() => return,
                line = lines.next_line() => line,
            };
            let line = match line {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("Stdin closed");
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    return;
                }
            };
            match parse_coord(&line) {
                Some(coord) if request.availability().is_available(coord) => break coord,
                Some(coord) => println!("{} is not open.", coord),
                None => println!("Enter a row and a column, e.g. `1 2`."),
            }
        };

        debug!(%coord, "Sending move");
        if !request.respond(coord) {
            debug!("Move request was abandoned");
        }
    }
}
