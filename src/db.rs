use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::feed::FeedFilm;

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database {}", path.display()))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS films (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT NOT NULL,
            release_year INTEGER,
            director     TEXT,
            box_office   REAL,
            country      TEXT
        );
        ",
    )?;
    Ok(())
}

/// Append one row per feed element.
///
/// Runs in autocommit on purpose: a coercion failure must leave the
/// rows inserted before it in the table. The box-office field is the
/// only coerced column — absent defaults to 0, anything non-numeric
/// (including the "N/A" sentinel) aborts the load right there.
/// release_year is stored as given, unvalidated.
pub fn insert_films(conn: &Connection, films: &[FeedFilm]) -> Result<usize> {
    let mut stmt = conn.prepare(
        "INSERT INTO films (title, release_year, director, box_office, country)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    let mut inserted = 0;
    for film in films {
        let box_office = match &film.box_office {
            Some(raw) => raw.parse::<f64>().with_context(|| {
                format!("box office {:?} for {:?} is not numeric", raw, film.title)
            })?,
            None => 0.0,
        };
        stmt.execute(rusqlite::params![
            film.title,
            film.release_year,
            film.director,
            box_office,
            film.country,
        ])?;
        inserted += 1;
    }
    Ok(inserted)
}

// ── Stats ──

pub struct Stats {
    pub films: usize,
    pub top_grossing: f64,
    pub total_gross: f64,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let films: usize = conn.query_row("SELECT COUNT(*) FROM films", [], |r| r.get(0))?;
    let top_grossing: f64 = conn.query_row(
        "SELECT COALESCE(MAX(box_office), 0) FROM films",
        [],
        |r| r.get(0),
    )?;
    let total_gross: f64 = conn.query_row(
        "SELECT COALESCE(SUM(box_office), 0) FROM films",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        films,
        top_grossing,
        total_gross,
    })
}

// ── Tests ──
