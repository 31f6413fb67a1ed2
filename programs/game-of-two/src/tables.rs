//! Plain-text result tables

use std::fmt;
use dilemma::{Standing, TournamentResult};

/// Head-to-head matrix, each cell "row \ column"
pub fn matrix(result: &TournamentResult) -> String {
    MatrixTable(result).to_string()
}

/// Ranking with total, average per game and average per round
pub fn ranking(title: &str, standings: &[Standing]) -> String {
    RankingTable { title, standings }.to_string()
}

struct MatrixTable<'a>(&'a TournamentResult);

impl fmt::Display for MatrixTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let corner = "      \\       ";
        let cells: Vec<Vec<String>> = result
            .matrix
            .iter()
            .map(|row| row.iter().map(|(a, b)| format!("{} \\ {}", a, b)).collect())
            .collect();

        let first = result
            .names
            .iter()
            .map(String::len)
            .chain([corner.len()])
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = result
            .names
            .iter()
            .enumerate()
            .map(|(j, name)| cells.iter().map(|row| row[j].len()).chain([name.len()]).max().unwrap_or(0))
            .collect();

        write!(f, "{:<first$}", corner)?;
        for (name, w) in result.names.iter().zip(&widths) {
            write!(f, "  {:>w$}", name, w = *w)?;
        }
        writeln!(f)?;
        write!(f, "{}", "-".repeat(first))?;
        for w in &widths {
            write!(f, "  {}", "-".repeat(*w))?;
        }
        writeln!(f)?;
        for (name, row) in result.names.iter().zip(&cells) {
            write!(f, "{:<first$}", name)?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct RankingTable<'a> {
    title: &'a str,
    standings: &'a [Standing],
}

impl fmt::Display for RankingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = [self.title, "AVERAGE PER GAME", "AVERAGE PER ROUND"];
        let first = self.standings.iter().map(|s| s.name.len()).max().unwrap_or(0);

        write!(f, "{:<first$}", "")?;
        for h in headers {
            write!(f, "  {}", h)?;
        }
        writeln!(f)?;
        write!(f, "{}", "-".repeat(first))?;
        for h in headers {
            write!(f, "  {}", "-".repeat(h.len()))?;
        }
        writeln!(f)?;
        for s in self.standings {
            writeln!(
                f,
                "{:<first$}  {:>w0$}  {:>w1$.3}  {:>w2$.5}",
                s.name,
                s.total,
                s.per_game,
                s.per_round,
                w0 = headers[0].len(),
                w1 = headers[1].len(),
                w2 = headers[2].len(),
            )?;
        }
        Ok(())
    }
}
