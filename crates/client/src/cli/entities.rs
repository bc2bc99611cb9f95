//! Entity CLI commands.

use clap::{Parser, Subcommand};

/// Entity management commands.
#[derive(Debug, Parser)]
pub struct EntitiesCommand {
    #[command(subcommand)]
    pub action: EntitiesAction,
}

/// Available entity actions.
#[derive(Debug, Subcommand)]
pub enum EntitiesAction {
    /// List entities of a type.
    List {
        /// Entity type, e.g. campers, groups, staff-members.
        entity: String,
        /// Camp ID.
        #[arg(long)]
        camp: String,
        /// Query filter as key=value (repeatable).
        #[arg(long = "query", short = 'q', value_parser = parse_key_value)]
        query: Vec<(String, String)>,
        /// Repeat the request N times (to exercise the cache).
        #[arg(long, default_value = "1")]
        repeat: u32,
    },
    /// Get an entity by ID.
    Get {
        /// Entity type.
        entity: String,
        /// Entity ID.
        id: String,
        /// Camp ID.
        #[arg(long)]
        camp: String,
    },
    /// Create an entity from a JSON body.
    Create {
        /// Entity type.
        entity: String,
        /// Camp ID.
        #[arg(long)]
        camp: String,
        /// JSON body.
        #[arg(long)]
        data: String,
    },
    /// Update an entity from a JSON body.
    Update {
        /// Entity type.
        entity: String,
        /// Entity ID.
        id: String,
        /// Camp ID.
        #[arg(long)]
        camp: String,
        /// JSON body.
        #[arg(long)]
        data: String,
    },
    /// Delete an entity by ID.
    Delete {
        /// Entity type.
        entity: String,
        /// Entity ID.
        id: String,
        /// Camp ID.
        #[arg(long)]
        camp: String,
    },
}

/// Parse a `key=value` pair.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {:?}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("sessionId=s1").unwrap(),
            ("sessionId".to_string(), "s1".to_string())
        );
        assert_eq!(
            parse_key_value("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
