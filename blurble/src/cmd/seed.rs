use crate::modules::store::{init_schema, PgQuoteStore};
use anyhow::{Context, Result};
use clap::Args;
use sqlx::{postgres::Postgres, Pool};
use std::env;

#[derive(Debug, Args)]
pub struct SeedArgs {}

/// The bundled quote corpus. Each entry is trimmed to roughly one typing
/// run (about 200 characters).
const SEED_QUOTES: &[(&str, &str)] = &[
    (
        "It was the best of times, it was the worst of times, it was the age of wisdom, it was the age of foolishness, it was the epoch of belief, it was the epoch of incredulity, it was the season.",
        "Charles Dickens, A Tale of Two Cities",
    ),
    (
        "To be, or not to be, that is the question. Whether it is nobler in the mind to suffer the slings and arrows of outrageous fortune, or to take arms against a sea of troubles and end them.",
        "William Shakespeare, Hamlet",
    ),
    (
        "Four score and seven years ago our fathers brought forth on this continent, a new nation, conceived in Liberty, and dedicated to the proposition that all men are created equal. Now we are engaged in a great civil war.",
        "Abraham Lincoln, Gettysburg Address",
    ),
    (
        "We choose to go to the moon in this decade and do the other things, not because they are easy, but because they are hard, because that goal will serve to organize and measure the best of our energies.",
        "John F. Kennedy, Rice University Speech",
    ),
    (
        "It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife. However little known the feelings or views of such a man may be on his first entering.",
        "Jane Austen, Pride and Prejudice",
    ),
    (
        "Call me Ishmael. Some years ago, never mind how long precisely, having little or no money in my purse, and nothing particular to interest me on shore, I thought I would sail about a little and see the watery part.",
        "Herman Melville, Moby-Dick",
    ),
    (
        "Two roads diverged in a wood, and I took the one less traveled by, and that has made all the difference. I shall be telling this with a sigh somewhere ages and ages hence: Two roads diverged in the wood.",
        "Robert Frost, The Road Not Taken",
    ),
    (
        "In a hole in the ground there lived a hobbit. Not a nasty, dirty, wet hole, filled with the ends of worms and an oozy smell, nor yet a dry, bare, sandy hole with nothing in it to sit on.",
        "J.R.R. Tolkien, The Hobbit",
    ),
    (
        "The man in black fled across the desert, and the gunslinger followed. The desert was the apotheosis of all deserts, huge, standing to the sky for what looked like eternity in all directions. It was white and blinding and waterless.",
        "Stephen King, The Dark Tower",
    ),
    (
        "The cosmos is all that is or ever was or ever will be. Our feeblest contemplations of the cosmos stir us. There is a tingling in the spine, a catch in the voice, a faint sensation, as if a distant memory.",
        "Carl Sagan, Cosmos",
    ),
    (
        "Not all those who wander are lost. All we have to decide is what to do with the time that is given us. Even the smallest person can change the course of the future. There is some good in this world.",
        "J.R.R. Tolkien, The Lord of the Rings",
    ),
    (
        "So we beat on, boats against the current, borne back ceaselessly into the past. In my younger and more vulnerable years my father gave me some advice that I've been turning over in my mind ever since: reserve all judgments.",
        "F. Scott Fitzgerald, The Great Gatsby",
    ),
    (
        "It was a bright cold day in April, and the clocks were striking thirteen. Winston Smith, his chin nuzzled into his breast in an effort to escape the vile wind, slipped quickly through the glass doors of Victory Mansions.",
        "George Orwell, 1984",
    ),
];

pub async fn run(_args: SeedArgs) -> Result<()> {
    let database_url = env::var("DATABASE_URL").with_context(|| {
        let message = "DATABASE_URL environment variable must be set";
        tracing::error!(message);
        format!("{}", message)
    })?;

    let pool: Pool<Postgres> = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .with_context(|| {
            let message = "couldn't create database connection pool. check your database status and value of DATABASE_URL environment variable.";
            tracing::error!(message);
            format!("{}", message)
        })?;

    init_schema(&pool).await.with_context(|| {
        let message = "couldn't create database schema";
        tracing::error!(message);
        format!("{}", message)
    })?;

    let quotes = PgQuoteStore::new(pool);
    let mut inserted = 0usize;
    for (text, source) in SEED_QUOTES {
        if quotes.insert_if_missing(text, source).await? {
            inserted += 1;
        }
    }

    tracing::info!(
        "seeded {} quotes ({} already present)",
        inserted,
        SEED_QUOTES.len() - inserted
    );

    Ok(())
}
