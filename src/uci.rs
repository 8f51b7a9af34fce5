use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::agent::Agent;
use crate::board::Position;
use crate::config::EngineConfig;
use crate::search::SearchParams;

pub struct UciEngine {
    pos: Position,
    agent: Agent,
}

impl Default for UciEngine {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl UciEngine {
    pub fn new(config: EngineConfig) -> Self { Self { pos: Position::startpos(), agent: Agent::new(config) } }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name Pawnstorm")?;
        writeln!(out, "id author Pawnstorm Team")?;
        writeln!(out, "uciok")
    }

    fn cmd_ucinewgame(&mut self) {
        self.pos = Position::startpos();
        self.agent.new_game();
    }

    /// `startpos [moves ...]` or `fen <fields> [moves ...]`. Unparseable input
    /// leaves the current position unchanged.
    pub fn cmd_position(&mut self, args: &str) {
        let (head, moves) = match args.split_once(" moves ") {
            Some((h, m)) => (h.trim(), m.split_whitespace().map(str::to_string).collect::<Vec<_>>()),
            None => (args.trim_end_matches(" moves").trim(), Vec::new()),
        };
        let base = if head == "startpos" {
            Ok(Position::startpos())
        } else if let Some(fen) = head.strip_prefix("fen ") {
            Position::from_fen(fen.trim())
        } else {
            debug!("ignoring position command: {}", args);
            return;
        };
        match base.and_then(|p| p.with_moves(&moves)) {
            Ok(p) => self.pos = p,
            Err(e) => debug!("position rejected: {}", e),
        }
    }

    /// `depth N` and `movetime MS`; unspecified values come from the config.
    pub fn parse_go(&self, args: &str) -> SearchParams {
        let mut params = self.agent.config().params();
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            match tok {
                "depth" => {
                    if let Some(d) = tokens.next().and_then(|s| s.parse::<u32>().ok()) { params.depth = d; }
                }
                "movetime" => {
                    if let Some(ms) = tokens.next().and_then(|s| s.parse::<u64>().ok()) { params.movetime = Duration::from_millis(ms); }
                }
                _ => {}
            }
        }
        params
    }

    pub fn cmd_go(&mut self, args: &str) -> String {
        let params = self.parse_go(args);
        let pos = self.pos.clone();
        match self.agent.choose_in(&pos, params) {
            Some(best) => format!("bestmove {}", best),
            None => "bestmove 0000".to_string(),
        }
    }

    /// Handle one line; returns false on `quit`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let line = line.trim();
        match line {
            "" | "stop" => {}
            "uci" => self.cmd_uci(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.cmd_ucinewgame(),
            "quit" => return Ok(false),
            _ => {
                if let Some(rest) = line.strip_prefix("position ") {
                    self.cmd_position(rest);
                } else if line == "go" || line.starts_with("go ") {
                    let reply = self.cmd_go(line.trim_start_matches("go").trim());
                    writeln!(out, "{}", reply)?;
                } else {
                    debug!("unknown command: {}", line);
                }
            }
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        info!("uci loop started");
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in stdin.lock().lines() {
            if !self.handle(&line?, &mut out)? { break; }
        }
        Ok(())
    }
}
